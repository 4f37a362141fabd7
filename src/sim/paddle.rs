//! Player paddle controller
//!
//! Driven either by a pointer target (absolute x) or by held left/right keys
//! (constant speed, no acceleration). The paddle box never leaves the arena
//! horizontally.

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::entity::{EntityId, Movable, Role};
use crate::error::Result;

/// Held key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    #[default]
    Idle,
}

impl Direction {
    /// Combine held keys; holding both cancels out
    pub fn from_keys(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::Idle,
        }
    }

    fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
            Direction::Idle => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: EntityId,
    pub direction: Direction,
    /// Pointer target for the paddle center, consumed by the next advance
    pub target_x: Option<f32>,
    /// Key-driven speed (units/second)
    pub speed: f32,
    /// Effective horizontal velocity over the last advance
    pub vel_x: f32,
}

impl Paddle {
    pub fn new(id: EntityId, speed: f32) -> Self {
        Self {
            id,
            direction: Direction::Idle,
            target_x: None,
            speed,
            vel_x: 0.0,
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Non-finite targets are ignored so the clamp always yields a position
    pub fn set_target_position(&mut self, x: f32) {
        if x.is_finite() {
            self.target_x = Some(x);
        }
    }
}

impl Movable for Paddle {
    type Outcome = ();

    fn id(&self) -> EntityId {
        self.id
    }

    fn advance(&mut self, arena: &mut Arena, elapsed_ms: f32) -> Result<()> {
        let (min_x, max_x) = (arena.bounds.left(), arena.bounds.right());
        let entity = arena.require_mut(self.id, Role::Paddle)?;
        let half_width = entity.size.x / 2.0;
        let old_x = entity.pos.x;

        let wanted = match self.target_x.take() {
            Some(x) => x,
            None => old_x + self.direction.sign() * self.speed * elapsed_ms / 1000.0,
        };
        // Paddle wider than the arena pins to the center
        let new_x = if max_x - min_x >= 2.0 * half_width {
            wanted.clamp(min_x + half_width, max_x - half_width)
        } else {
            (min_x + max_x) / 2.0
        };

        entity.pos.x = new_x;
        self.vel_x = if elapsed_ms > 0.0 {
            (new_x - old_x) * 1000.0 / elapsed_ms
        } else {
            0.0
        };
        Ok(())
    }
}
