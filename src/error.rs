//! Error types for the simulation core
//!
//! Everything here is a precondition violation reported to the driver. The
//! simulation never retries; a rejected tick leaves the state untouched.

use crate::sim::{EntityId, Role};

/// Simulation error
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    /// Tick called with a negative elapsed time
    #[error("elapsed time must be non-negative, got {0} ms")]
    NegativeElapsed(f32),

    /// Tick called with NaN or infinite elapsed time
    #[error("elapsed time must be finite")]
    NonFiniteElapsed,

    /// Pointer target that is NaN or infinite
    #[error("pointer x must be finite, got {0}")]
    NonFinitePointer(f32),

    /// A ball or paddle referenced by the game is not in the arena
    #[error("{role:?} entity {id} is not present in the arena")]
    MissingEntity { id: EntityId, role: Role },

    /// Tuning values out of range
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    /// Tuning file could not be read
    #[error("tuning IO error: {0}")]
    TuningIo(#[from] std::io::Error),

    /// Tuning file could not be parsed
    #[error("tuning parse error: {0}")]
    TuningParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject elapsed times the resolver cannot integrate
pub fn check_elapsed(elapsed_ms: f32) -> Result<()> {
    if !elapsed_ms.is_finite() {
        return Err(SimError::NonFiniteElapsed);
    }
    if elapsed_ms < 0.0 {
        return Err(SimError::NegativeElapsed(elapsed_ms));
    }
    Ok(())
}

/// Reject pointer targets the paddle clamp cannot handle
pub fn check_pointer(pointer_x: Option<f32>) -> Result<()> {
    match pointer_x {
        Some(x) if !x.is_finite() => Err(SimError::NonFinitePointer(x)),
        _ => Ok(()),
    }
}
