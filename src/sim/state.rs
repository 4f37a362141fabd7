//! Round state and the types the presentation layer reads
//!
//! `GameState` owns the arena, the movable entities and the bookkeeper. The
//! per-tick driver lives in `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::ball::Ball;
use super::bookkeeper::Bookkeeper;
use super::entity::{EntityId, Role};
use super::geometry::Aabb;
use super::layout::build_scene;
use super::paddle::Paddle;
use crate::error::Result;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Ball glued to the paddle, waiting for launch input
    AwaitingLaunch,
    /// Ball simulation active
    Playing,
    /// All breakable bricks destroyed with lives to spare
    Won,
    /// No lives left
    Lost,
}

impl RoundState {
    /// Won and Lost only leave through an explicit restart
    pub fn is_over(self) -> bool {
        matches!(self, RoundState::Won | RoundState::Lost)
    }
}

/// Discrete events for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BallLaunched { id: EntityId },
    BallLost { id: EntityId, lives_remaining: u32 },
    BrickDestroyed { id: EntityId },
    RoundWon,
    RoundLost,
    Restarted,
}

/// Snapshot of a ball for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Complete round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub round: RoundState,
    /// Balls are off the tick roster while paused
    pub paused: bool,
    pub arena: Arena,
    pub paddle: Paddle,
    /// Balls in spawn order
    pub balls: Vec<Ball>,
    pub books: Bookkeeper,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a round from validated tuning
    pub fn new(tuning: Tuning) -> Result<Self> {
        tuning.validate()?;
        let scene = build_scene(&tuning);
        let mut arena = scene.arena;
        arena.register_for_tick(scene.paddle_id);

        let mut state = Self {
            paddle: Paddle::new(scene.paddle_id, tuning.paddle_speed),
            books: Bookkeeper::new(tuning.lives, scene.breakable_bricks),
            tuning,
            round: RoundState::AwaitingLaunch,
            paused: false,
            arena,
            balls: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
        };
        state.serve_glued_ball()?;
        Ok(state)
    }

    /// Rebuild entities and counters; back to `AwaitingLaunch`
    pub fn restart(&mut self) -> Result<()> {
        let tuning = self.tuning.clone();
        *self = Self::new(tuning)?;
        self.events.push(GameEvent::Restarted);
        log::info!("Round restarted");
        Ok(())
    }

    pub fn round_state(&self) -> RoundState {
        self.round
    }

    pub fn lives_remaining(&self) -> u32 {
        self.books.lives_remaining()
    }

    pub fn bricks_remaining(&self) -> u32 {
        self.books.bricks_remaining()
    }

    pub fn paddle_box(&self) -> Result<Aabb> {
        Ok(self.arena.require(self.paddle.id, Role::Paddle)?.bounds())
    }

    pub fn ball_views(&self) -> Vec<BallView> {
        self.balls
            .iter()
            .filter_map(|b| {
                self.arena.entity(b.id).map(|e| BallView {
                    id: b.id,
                    pos: e.pos,
                    vel: b.vel,
                })
            })
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn a ball resting on the paddle. It is not ticked until launched.
    pub fn serve_glued_ball(&mut self) -> Result<EntityId> {
        let paddle = self.paddle_box()?;
        let id = self
            .arena
            .spawn(Role::Ball, paddle.center(), self.tuning.ball_size, false);
        let mut ball = Ball::new(id, self.tuning.base_speed(), self.tuning.max_deflection);
        ball.glue_to(&mut self.arena, &paddle)?;
        self.balls.push(ball);
        self.round = RoundState::AwaitingLaunch;
        Ok(id)
    }

    /// Keep glued balls on top of the paddle as it moves
    pub fn follow_paddle(&mut self) -> Result<()> {
        let paddle = self.paddle_box()?;
        for ball in &mut self.balls {
            if ball.glued {
                ball.glue_to(&mut self.arena, &paddle)?;
            }
        }
        Ok(())
    }

    /// Launch every glued ball and start play
    pub fn launch(&mut self) {
        if self.round != RoundState::AwaitingLaunch {
            return;
        }
        let velocity = self.tuning.ball_velocity;
        for ball in &mut self.balls {
            if ball.glued {
                ball.launch(velocity);
                if !self.paused {
                    self.arena.register_for_tick(ball.id);
                }
                self.books.record_ball_served();
                self.events.push(GameEvent::BallLaunched { id: ball.id });
            }
        }
        self.round = RoundState::Playing;
        log::info!(
            "Ball launched ({} lives, {} bricks)",
            self.lives_remaining(),
            self.bricks_remaining()
        );
    }

    /// Put an additional ball into play from the paddle (only while playing)
    pub fn serve_extra_ball(&mut self) -> Result<Option<EntityId>> {
        if self.round != RoundState::Playing {
            return Ok(None);
        }
        let paddle = self.paddle_box()?;
        let id = self
            .arena
            .spawn(Role::Ball, paddle.center(), self.tuning.ball_size, false);
        let mut ball = Ball::new(id, self.tuning.base_speed(), self.tuning.max_deflection);
        ball.glue_to(&mut self.arena, &paddle)?;
        ball.launch(self.tuning.ball_velocity);
        if !self.paused {
            self.arena.register_for_tick(id);
        }
        self.balls.push(ball);
        self.books.record_ball_served();
        self.events.push(GameEvent::BallLaunched { id });
        log::debug!("Extra ball {} served ({} in play)", id, self.books.live_balls());
        Ok(Some(id))
    }

    /// Pausing takes launched balls off the tick roster; resuming puts them back
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        for ball in &self.balls {
            // Glued balls are never on the roster
            if ball.glued {
                continue;
            }
            if paused {
                self.arena.unregister_from_tick(ball.id);
            } else {
                self.arena.register_for_tick(ball.id);
            }
        }
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
    }

    /// Check win/loss after this tick's updates
    pub fn poll_round(&mut self) {
        if self.round.is_over() {
            return;
        }
        if self.books.lives_remaining() == 0 {
            self.round = RoundState::Lost;
            self.events.push(GameEvent::RoundLost);
            log::info!("Round lost");
        } else if self.books.bricks_remaining() == 0 {
            self.round = RoundState::Won;
            self.events.push(GameEvent::RoundWon);
            log::info!("Round won with {} lives left", self.books.lives_remaining());
        }
    }
}
