//! Brick and life counters
//!
//! The only place the round counters change. Balls and bricks never touch
//! them; the tick driver reports removals here after draining the arena.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// Consequence of losing a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallLoss {
    /// Other balls are still in play
    BallsRemain,
    /// Last ball gone, a life was spent, serve a fresh ball
    LifeLost { lives_remaining: u32 },
    /// Last ball gone and no lives left
    OutOfLives,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookkeeper {
    lives_remaining: u32,
    bricks_remaining: u32,
    live_balls: u32,
    /// Bricks already counted, so repeated notifications are no-ops
    destroyed: BTreeSet<EntityId>,
}

impl Bookkeeper {
    pub fn new(lives: u32, bricks: u32) -> Self {
        Self {
            lives_remaining: lives,
            bricks_remaining: bricks,
            live_balls: 0,
            destroyed: BTreeSet::new(),
        }
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives_remaining
    }

    pub fn bricks_remaining(&self) -> u32 {
        self.bricks_remaining
    }

    pub fn live_balls(&self) -> u32 {
        self.live_balls
    }

    /// A ball entered play
    pub fn record_ball_served(&mut self) {
        self.live_balls += 1;
    }

    /// A ball left the arena
    pub fn record_ball_lost(&mut self) -> BallLoss {
        self.live_balls = self.live_balls.saturating_sub(1);
        if self.live_balls > 0 {
            return BallLoss::BallsRemain;
        }

        self.lives_remaining = self.lives_remaining.saturating_sub(1);
        if self.lives_remaining == 0 {
            BallLoss::OutOfLives
        } else {
            BallLoss::LifeLost {
                lives_remaining: self.lives_remaining,
            }
        }
    }

    /// A breakable brick was removed. Returns false if `id` was already counted.
    pub fn record_brick_destroyed(&mut self, id: EntityId) -> bool {
        if !self.destroyed.insert(id) {
            return false;
        }
        self.bricks_remaining = self.bricks_remaining.saturating_sub(1);
        true
    }
}
