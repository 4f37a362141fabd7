//! Per-frame simulation tick
//!
//! Order within a tick:
//! 1. validate preconditions (elapsed time, ball/paddle present) before touching state
//! 2. one-shot inputs (restart, pause)
//! 3. balls advance in spawn order, then the paddle
//! 4. scheduled destructions are drained and reported to the bookkeeper
//! 5. win/loss is polled

use super::bookkeeper::BallLoss;
use super::entity::{Movable, Role};
use super::paddle::Direction;
use super::state::{GameEvent, GameState, RoundState};
use crate::error::{Result, check_elapsed, check_pointer};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Target paddle center x (from pointer position)
    pub pointer_x: Option<f32>,
    /// Held left/right keys
    pub direction: Direction,
    /// Launch the glued ball (click/space)
    pub launch: bool,
    /// Serve an additional ball while playing
    pub extra_ball: bool,
    /// Pause toggle
    pub pause: bool,
    /// Rebuild the round
    pub restart: bool,
}

/// Advance the game by `elapsed_ms` milliseconds of wall-clock time
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) -> Result<()> {
    check_elapsed(elapsed_ms)?;
    check_pointer(input.pointer_x)?;
    state.arena.require(state.paddle.id, Role::Paddle)?;
    for ball in &state.balls {
        state.arena.require(ball.id, Role::Ball)?;
    }

    if input.restart {
        return state.restart();
    }

    if input.pause && !state.round.is_over() {
        state.set_paused(!state.paused);
    }

    // Nothing moves while paused or after the round ended
    if state.paused || state.round.is_over() {
        return Ok(());
    }

    state.time_ticks += 1;

    state.paddle.set_direction(input.direction);
    if let Some(x) = input.pointer_x {
        state.paddle.set_target_position(x);
    }

    match state.round {
        RoundState::AwaitingLaunch => {
            state.paddle.advance(&mut state.arena, elapsed_ms)?;
            state.follow_paddle()?;

            if input.launch {
                state.launch();
            }
        }

        RoundState::Playing => {
            if input.extra_ball {
                state.serve_extra_ball()?;
            }

            // Balls see the paddle where the previous tick left it
            for ball in &mut state.balls {
                if !state.arena.is_ticking(ball.id) {
                    continue;
                }
                let step = ball.advance(&mut state.arena, elapsed_ms)?;
                if let Some(other) = step.bounced_off {
                    log::trace!("Ball {} bounced off {} -> vel {}", ball.id(), other, ball.vel);
                }
                if !step.bricks_hit.is_empty() {
                    log::trace!("Ball {} hit bricks {:?}", ball.id(), step.bricks_hit);
                }
                if step.escaped {
                    log::debug!("Ball {} left the arena", ball.id());
                }
            }

            if state.arena.is_ticking(state.paddle.id) {
                state.paddle.advance(&mut state.arena, elapsed_ms)?;
            }

            settle_destroyed(state)?;
            state.poll_round();
        }

        RoundState::Won | RoundState::Lost => {}
    }

    Ok(())
}

/// Remove everything scheduled this tick and update the counters
fn settle_destroyed(state: &mut GameState) -> Result<()> {
    for entity in state.arena.drain_pending() {
        match entity.role {
            Role::Brick => {
                if state.books.record_brick_destroyed(entity.id) {
                    state.events.push(GameEvent::BrickDestroyed { id: entity.id });
                    log::debug!(
                        "Brick {} destroyed, {} remaining",
                        entity.id,
                        state.books.bricks_remaining()
                    );
                }
            }
            Role::Ball => {
                state.balls.retain(|b| b.id != entity.id);
                let loss = state.books.record_ball_lost();
                state.events.push(GameEvent::BallLost {
                    id: entity.id,
                    lives_remaining: state.books.lives_remaining(),
                });
                match loss {
                    BallLoss::BallsRemain => {}
                    BallLoss::LifeLost { lives_remaining } => {
                        log::info!("Life lost, {} remaining", lives_remaining);
                        state.serve_glued_ball()?;
                    }
                    BallLoss::OutOfLives => {
                        log::info!("Last life lost");
                    }
                }
            }
            Role::Paddle | Role::Wall => {
                log::warn!("{:?} {} was scheduled for destruction", entity.role, entity.id);
            }
        }
    }
    Ok(())
}
