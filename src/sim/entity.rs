//! Entity data model shared by every object in the arena

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::geometry::Aabb;
use crate::error::Result;

/// Stable entity identifier, allocated by the arena in registration order
pub type EntityId = u32;

/// What an entity is, for collision response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Ball,
    Paddle,
    Brick,
    Wall,
}

/// An axis-aligned rectangle living in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub role: Role,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    /// Only meaningful for bricks; balls, paddles and walls are never destroyed by contact
    pub destructible: bool,
}

impl Entity {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// A brick the ball is allowed to break
    pub fn is_breakable_brick(&self) -> bool {
        self.role == Role::Brick && self.destructible
    }
}

/// Something that moves once per tick
///
/// Positions live in the arena; implementors hold the per-entity motion state
/// and commit their new position through `arena`.
pub trait Movable {
    /// Per-tick result reported back to the round driver
    type Outcome;

    fn id(&self) -> EntityId;

    /// Advance by `elapsed_ms` milliseconds
    fn advance(&mut self, arena: &mut Arena, elapsed_ms: f32) -> Result<Self::Outcome>;
}
