//! Simulation module
//!
//! All gameplay logic lives here. This module is single-threaded and free of
//! rendering or platform dependencies:
//! - Variable timestep in milliseconds, supplied by the driver
//! - Stable iteration order (registration order for queries, spawn order for balls)
//! - Destruction deferred to the end of each tick

pub mod arena;
pub mod ball;
pub mod bookkeeper;
pub mod collision;
pub mod entity;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod paddle;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use ball::{Ball, BallStep};
pub use bookkeeper::{BallLoss, Bookkeeper};
pub use collision::{
    Bounce, BounceAxis, DEFLECTION_ZONES, apply_paddle_deflection, bounce_velocity,
    deflection_for_offset, paddle_offset, resolve_bounce,
};
pub use entity::{Entity, EntityId, Movable, Role};
pub use geometry::Aabb;
pub use input::{InputState, Key};
pub use layout::{Scene, build_scene, paddle_start};
pub use paddle::{Direction, Paddle};
pub use state::{BallView, GameEvent, GameState, RoundState};
pub use tick::{TickInput, tick};
