//! End-to-end round scenarios driven through the public tick API.

use brick_breaker::Tuning;
use brick_breaker::sim::{Aabb, GameEvent, GameState, RoundState, Role, TickInput, tick};
use glam::Vec2;
use proptest::prelude::*;

fn launch(state: &mut GameState) {
    let input = TickInput {
        launch: true,
        ..Default::default()
    };
    tick(state, &input, 0.0).unwrap();
    assert_eq!(state.round_state(), RoundState::Playing);
}

fn place_ball(state: &mut GameState, pos: Vec2, vel: Vec2) {
    let id = state.balls[0].id;
    state.arena.entity_mut(id).unwrap().pos = pos;
    state.balls[0].vel = vel;
}

#[test]
fn ball_falling_on_paddle_center_rebounds_straight_up() {
    // Paddle 120x60 with its top 100 above the bottom: centered at (640, 650)
    let tuning = Tuning {
        paddle_size: Vec2::new(120.0, 60.0),
        ball_size: Vec2::splat(24.0),
        ..Default::default()
    };
    let mut state = GameState::new(tuning).unwrap();
    launch(&mut state);

    let paddle = state.paddle_box().unwrap();
    assert_eq!(paddle.center(), Vec2::new(640.0, 650.0));
    assert_eq!(paddle.size().x, 120.0);

    place_ball(&mut state, Vec2::new(640.0, 600.0), Vec2::new(0.0, 200.0));
    tick(&mut state, &TickInput::default(), 50.0).unwrap();

    // Where the ball would have been after 50 ms overlaps the paddle
    let landed = Aabb::from_center(Vec2::new(640.0, 610.0), Vec2::splat(24.0));
    assert!(landed.intersects(&paddle));

    let ball = state.ball_views()[0];
    assert_eq!(ball.vel, Vec2::new(0.0, -200.0));
    assert!(ball.pos.x >= paddle.left() && ball.pos.x <= paddle.right());
    assert_eq!(ball.pos, Vec2::new(640.0, 590.0));
    assert_eq!(state.lives_remaining(), 3);
}

#[test]
fn clearing_all_sixteen_bricks_wins() {
    let mut state = GameState::new(Tuning::default()).unwrap();
    assert_eq!(state.bricks_remaining(), 16);
    launch(&mut state);

    let mut bricks: Vec<(u32, Vec2)> = state
        .arena
        .entities()
        .filter(|e| e.role == Role::Brick)
        .map(|e| (e.id, e.pos))
        .collect();
    assert_eq!(bricks.len(), 16);
    // Bottom row first so the top row is reachable from below
    bricks.reverse();

    for (i, (id, center)) in bricks.iter().enumerate() {
        // Ball 5 units short of the brick's bottom edge, rising 10 units this tick
        place_ball(&mut state, *center + Vec2::new(0.0, 10.0 + 8.0 + 5.0), Vec2::new(0.0, -200.0));
        tick(&mut state, &TickInput::default(), 50.0).unwrap();

        assert!(state.arena.entity(*id).is_none(), "brick {id} should be gone");
        assert_eq!(state.bricks_remaining(), 15 - i as u32);
        assert!(state
            .drain_events()
            .contains(&GameEvent::BrickDestroyed { id: *id }));
    }

    assert_eq!(state.bricks_remaining(), 0);
    assert_eq!(state.round_state(), RoundState::Won);

    // A late duplicate notification does not underflow
    assert!(!state.books.record_brick_destroyed(bricks[0].0));
    assert_eq!(state.bricks_remaining(), 0);
}

#[test]
fn unbreakable_bricks_survive_and_do_not_count() {
    let tuning = Tuning {
        unbreakable_ratio: 1.0,
        ..Default::default()
    };
    let mut state = GameState::new(tuning).unwrap();
    assert_eq!(state.bricks_remaining(), 0);
    launch(&mut state);

    let (id, center) = state
        .arena
        .entities()
        .filter(|e| e.role == Role::Brick)
        .last()
        .map(|e| (e.id, e.pos))
        .unwrap();
    place_ball(&mut state, center + Vec2::new(0.0, 23.0), Vec2::new(0.0, -200.0));
    tick(&mut state, &TickInput::default(), 50.0).unwrap();

    assert!(state.arena.entity(id).is_some());
    assert_eq!(state.arena.count_role(Role::Brick), 16);
    assert_eq!(state.ball_views()[0].vel.y, 200.0);
    // Nothing breakable means nothing left to clear
    assert_eq!(state.round_state(), RoundState::Won);
}

#[test]
fn last_life_lost_is_terminal_until_restart() {
    let tuning = Tuning {
        lives: 1,
        ..Default::default()
    };
    let mut state = GameState::new(tuning).unwrap();
    launch(&mut state);

    place_ball(&mut state, Vec2::new(100.0, 715.0), Vec2::new(0.0, 200.0));
    tick(&mut state, &TickInput::default(), 50.0).unwrap();

    assert_eq!(state.lives_remaining(), 0);
    assert_eq!(state.round_state(), RoundState::Lost);
    assert!(state.balls.is_empty());
    let events = state.drain_events();
    assert!(events.contains(&GameEvent::RoundLost));

    for _ in 0..10 {
        let input = TickInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &input, 16.0).unwrap();
        assert_eq!(state.round_state(), RoundState::Lost);
    }

    state.restart().unwrap();
    assert_eq!(state.round_state(), RoundState::AwaitingLaunch);
    assert_eq!(state.lives_remaining(), 1);
    assert_eq!(state.bricks_remaining(), 16);
    assert_eq!(state.balls.len(), 1);
}

#[test]
fn ball_bounces_around_walls_for_a_long_run() {
    let mut state = GameState::new(Tuning::default()).unwrap();
    launch(&mut state);
    // Keep the paddle under the ball so it never escapes
    for _ in 0..2000 {
        let ball = state.ball_views()[0];
        let input = TickInput {
            pointer_x: Some(ball.pos.x),
            ..Default::default()
        };
        tick(&mut state, &input, 16.0).unwrap();
        if state.round_state() != RoundState::Playing {
            break;
        }
        for ball in state.ball_views() {
            assert_eq!(ball.vel.y.abs(), 200.0);
        }
    }
    assert_eq!(state.lives_remaining(), 3);
}

proptest! {
    #[test]
    fn free_flight_is_linear(
        x in 100.0f32..1180.0,
        y in 150.0f32..550.0,
        vx in prop::sample::select(vec![-200.0f32, 0.0, 200.0]),
        vy in prop::sample::select(vec![-200.0f32, 200.0]),
        dt in 0.0f32..50.0,
    ) {
        let mut state = GameState::new(Tuning::default()).unwrap();
        launch(&mut state);
        // Park the paddle far from the ball
        let parked = if x < 640.0 { 1200.0 } else { 80.0 };
        state.arena.entity_mut(state.paddle.id).unwrap().pos.x = parked;

        let vel = Vec2::new(vx, vy);
        place_ball(&mut state, Vec2::new(x, y), vel);
        tick(&mut state, &TickInput::default(), dt).unwrap();

        let ball = state.ball_views()[0];
        let expected = Vec2::new(x, y) + vel * dt / 1000.0;
        prop_assert!((ball.pos - expected).length() < 1e-3);
        prop_assert_eq!(ball.vel, vel);
    }
}
