//! Scene construction: walls, brick grid and paddle
//!
//! Registration order is walls, bricks, paddle; balls are added later by the
//! round. Because the resolver bounces off the first hit in registration
//! order, a ball touching a wall and a brick at once bounces off the wall.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::entity::{EntityId, Role};
use super::geometry::Aabb;
use crate::tuning::Tuning;

/// A freshly built arena and the ids the round needs
#[derive(Debug, Clone)]
pub struct Scene {
    pub arena: Arena,
    pub paddle_id: EntityId,
    pub walls: Vec<EntityId>,
    pub bricks: Vec<EntityId>,
    /// Bricks that must be destroyed to win
    pub breakable_bricks: u32,
}

/// Build the arena for a new round
pub fn build_scene(tuning: &Tuning) -> Scene {
    let mut arena = Arena::new(tuning.arena_size);
    let walls = spawn_walls(&mut arena, tuning);
    let bricks = spawn_bricks(&mut arena, tuning);
    let breakable_bricks = bricks
        .iter()
        .filter_map(|&id| arena.entity(id))
        .filter(|e| e.is_breakable_brick())
        .count() as u32;
    let paddle_id = arena.spawn(Role::Paddle, paddle_start(tuning), tuning.paddle_size, false);

    log::debug!(
        "Scene built: {} walls, {} bricks ({} breakable)",
        walls.len(),
        bricks.len(),
        breakable_bricks
    );

    Scene {
        arena,
        paddle_id,
        walls,
        bricks,
        breakable_bricks,
    }
}

/// Paddle center at round start: horizontally centered, top edge
/// `paddle_top_offset` above the arena bottom
pub fn paddle_start(tuning: &Tuning) -> Vec2 {
    Vec2::new(
        tuning.arena_size.x / 2.0,
        tuning.arena_size.y - tuning.paddle_top_offset + tuning.paddle_size.y / 2.0,
    )
}

/// Top, left and right strips just outside the arena. The bottom stays open.
fn spawn_walls(arena: &mut Arena, tuning: &Tuning) -> Vec<EntityId> {
    let Vec2 { x: w, y: h } = tuning.arena_size;
    let t = tuning.wall_thickness;

    let strips = [
        Aabb::from_origin(Vec2::new(-t, -t), Vec2::new(w + 2.0 * t, t)),
        Aabb::from_origin(Vec2::new(-t, 0.0), Vec2::new(t, h)),
        Aabb::from_origin(Vec2::new(w, 0.0), Vec2::new(t, h)),
    ];

    strips
        .iter()
        .map(|b| arena.spawn(Role::Wall, b.center(), b.size(), false))
        .collect()
}

/// Centered grid of bricks, row by row from the top
fn spawn_bricks(arena: &mut Arena, tuning: &Tuning) -> Vec<EntityId> {
    let mut rng = Pcg32::seed_from_u64(tuning.layout_seed);
    let size = tuning.brick_size;
    let left = (tuning.arena_size.x - tuning.brick_cols as f32 * size.x) / 2.0;

    let mut ids = Vec::with_capacity(tuning.brick_rows as usize * tuning.brick_cols as usize);
    for row in 0..tuning.brick_rows {
        for col in 0..tuning.brick_cols {
            let origin = Vec2::new(
                left + col as f32 * size.x,
                tuning.brick_top + row as f32 * size.y,
            );
            let unbreakable = rng.random::<f32>() < tuning.unbreakable_ratio;
            let center = Aabb::from_origin(origin, size).center();
            ids.push(arena.spawn(Role::Brick, center, size, !unbreakable));
        }
    }
    ids
}
