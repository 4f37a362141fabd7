//! Brick Breaker - collision-and-bounce simulation core
//!
//! Core modules:
//! - `sim`: Simulation (ball kinematics, bounce resolution, round bookkeeping)
//! - `tuning`: Data-driven game balance
//! - `error`: Precondition violations reported to the driver
//!
//! Rendering, asset loading and raw input plumbing live outside this crate.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{Result, SimError};
pub use tuning::Tuning;

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;
    /// Wall strips sit just outside the arena (top, left, right)
    pub const WALL_THICKNESS: f32 = 10.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 16.0;
    /// Base speed on each axis (units/second)
    pub const BALL_SPEED: f32 = 200.0;
    /// Horizontal speed from an edge strike on the paddle
    pub const MAX_DEFLECTION: f32 = 300.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 150.0;
    /// Paddle top edge sits this far above the arena bottom
    pub const PADDLE_TOP_OFFSET: f32 = 100.0;

    pub const INITIAL_LIVES: u32 = 3;

    /// Brick grid defaults
    pub const BRICK_ROWS: u32 = 2;
    pub const BRICK_COLS: u32 = 8;
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_TOP: f32 = 50.0;

    /// Gap between a glued ball and the paddle top
    pub const GLUE_GAP: f32 = 1.0;
}
