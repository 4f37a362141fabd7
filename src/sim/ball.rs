//! Ball kinematics and collision resolution
//!
//! Per tick the ball looks one step ahead: it builds the box it would occupy
//! after moving, asks the arena what that box overlaps, bounces off the first
//! hit, and only then commits its position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::{
    Bounce, apply_paddle_deflection, bounce_velocity, deflection_for_offset, paddle_offset,
    resolve_bounce,
};
use super::entity::{EntityId, Movable, Role};
use super::geometry::Aabb;
use crate::consts::GLUE_GAP;
use crate::error::Result;

/// A ball entity's motion state (its box lives in the arena)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: EntityId,
    /// Units per second
    pub vel: Vec2,
    /// Per-axis speed restored by every bounce
    pub base_speed: Vec2,
    /// Horizontal speed from an edge strike on the paddle
    pub max_deflection: f32,
    /// Resting on the paddle, waiting for launch
    pub glued: bool,
}

/// What happened to a ball during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BallStep {
    /// Entity that decided the bounce, if any
    pub bounced_off: Option<EntityId>,
    /// Breakable bricks newly scheduled for destruction
    pub bricks_hit: Vec<EntityId>,
    /// Ball left the arena with nothing to bounce off and is scheduled for removal
    pub escaped: bool,
}

impl Ball {
    pub fn new(id: EntityId, base_speed: Vec2, max_deflection: f32) -> Self {
        Self {
            id,
            vel: Vec2::ZERO,
            base_speed,
            max_deflection,
            glued: true,
        }
    }

    /// Sit the ball on top of the paddle, horizontally centered, at rest
    pub fn glue_to(&mut self, arena: &mut Arena, paddle: &Aabb) -> Result<()> {
        let entity = arena.require_mut(self.id, Role::Ball)?;
        entity.pos = Vec2::new(
            paddle.center().x,
            paddle.top() - entity.size.y / 2.0 - GLUE_GAP,
        );
        self.vel = Vec2::ZERO;
        self.glued = true;
        Ok(())
    }

    pub fn launch(&mut self, velocity: Vec2) {
        self.vel = velocity;
        self.glued = false;
    }
}

impl Movable for Ball {
    type Outcome = BallStep;

    fn id(&self) -> EntityId {
        self.id
    }

    fn advance(&mut self, arena: &mut Arena, elapsed_ms: f32) -> Result<BallStep> {
        let current = arena.require(self.id, Role::Ball)?.bounds();
        let mut displacement = self.vel * elapsed_ms / 1000.0;
        let next = current.translated(displacement);

        let colliding: Vec<EntityId> = arena
            .colliding_entities(&next)
            .into_iter()
            .filter(|&id| id != self.id)
            .collect();

        let mut step = BallStep::default();

        // Only the first hit (registration order) decides the bounce
        let first_hit = colliding
            .first()
            .and_then(|&id| arena.entity(id))
            .map(|e| (e.id, e.role, e.bounds()));

        if let Some((other_id, other_role, other_bounds)) = first_hit {
            let bounce: Bounce = resolve_bounce(&next, &other_bounds);
            self.vel = bounce_velocity(self.vel, self.base_speed, &bounce);

            if other_role == Role::Paddle {
                let offset = paddle_offset(&next, &other_bounds);
                let deflection = deflection_for_offset(offset, self.max_deflection);
                self.vel = apply_paddle_deflection(self.vel, bounce.axis, deflection);
            }

            displacement = self.vel * elapsed_ms / 1000.0;
            step.bounced_off = Some(other_id);

            // Every breakable brick touched this tick breaks, not just the first
            for &id in &colliding {
                let breakable = arena.entity(id).is_some_and(|e| e.is_breakable_brick());
                if breakable && arena.schedule_destroy(id) {
                    step.bricks_hit.push(id);
                }
            }
        }

        if colliding.is_empty() && !arena.is_inside(&next) {
            arena.schedule_destroy(self.id);
            step.escaped = true;
        }

        arena.require_mut(self.id, Role::Ball)?.pos += displacement;
        Ok(step)
    }
}
