//! Brick Breaker headless driver
//!
//! Runs the simulation at a fixed frame interval with an optional autopilot
//! feeding pointer events, and logs the events a renderer would react to.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;

use brick_breaker::Tuning;
use brick_breaker::sim::{GameEvent, GameState, InputState, Key, RoundState, tick};

#[derive(Parser, Debug)]
#[command(name = "brick-breaker", about = "Run the brick breaker simulation headless")]
struct Args {
    /// JSON tuning file (missing fields use defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Milliseconds per frame
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,

    /// Override the brick layout seed
    #[arg(long)]
    seed: Option<u64>,

    /// Let the autopilot track the ball with the pointer
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    autopilot: bool,

    /// Print the effective tuning as JSON and exit
    #[arg(long)]
    dump_tuning: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> brick_breaker::Result<()> {
    let mut tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    if let Some(seed) = args.seed {
        tuning.layout_seed = seed;
    }

    if args.dump_tuning {
        println!("{}", tuning.to_json()?);
        return Ok(());
    }

    let mut state = GameState::new(tuning)?;
    let mut input = InputState::new(state.arena.bounds);
    log::info!(
        "Brick Breaker starting: {} bricks, {} lives",
        state.bricks_remaining(),
        state.lives_remaining()
    );

    for frame in 0..args.frames {
        if args.autopilot {
            autopilot(&state, &mut input);
        }

        let tick_input = input.take_tick_input();
        tick(&mut state, &tick_input, args.frame_ms)?;

        for event in state.drain_events() {
            match event {
                GameEvent::BrickDestroyed { id } => {
                    let left = state.bricks_remaining();
                    log::info!("frame {frame}: brick {id} destroyed, {left} left");
                }
                GameEvent::BallLost { id, lives_remaining } => {
                    log::info!("frame {frame}: ball {id} lost, {lives_remaining} lives left")
                }
                other => log::info!("frame {frame}: {other:?}"),
            }
        }

        if state.round_state().is_over() {
            break;
        }
    }

    println!(
        "{:?} after {} ticks: {} bricks remaining, {} lives remaining",
        state.round_state(),
        state.time_ticks,
        state.bricks_remaining(),
        state.lives_remaining()
    );
    Ok(())
}

/// Follow the lowest ball with the pointer, nudged off-center so rebounds
/// pick up some angle; launch whenever a ball is waiting
fn autopilot(state: &GameState, input: &mut InputState) {
    if state.round_state() == RoundState::AwaitingLaunch {
        input.on_key_down(Key::Space);
        return;
    }

    let lowest = state
        .ball_views()
        .into_iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(ball) = lowest {
        let nudge = if ball.vel.x >= 0.0 { -20.0 } else { 20.0 };
        let target = Vec2::new(ball.pos.x + nudge, state.arena.bounds.center().y);
        let target = target.clamp(state.arena.bounds.min, state.arena.bounds.max);
        input.on_pointer_moved(target.x, target.y);
    }
}
