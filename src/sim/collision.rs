//! Collision response for axis-aligned boxes
//!
//! The bounce rule is an approximation: instead of computing a true contact
//! normal, the ball is assumed to have come from the side with the smaller
//! overlap on each axis, and the axis with the smaller of those two overlaps
//! is the one that reverses.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;

/// Velocity component reversed by a bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BounceAxis {
    /// Ball struck a vertical surface
    X,
    /// Ball struck a horizontal surface
    Y,
}

/// Result of comparing the ball's next box against the box it hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub axis: BounceAxis,
    /// Ball approached from the left of the obstacle
    pub from_left: bool,
    /// Ball approached from above the obstacle
    pub from_top: bool,
    /// Signed overlap on the approach side, x axis
    pub min_overlap_x: f32,
    /// Signed overlap on the approach side, y axis
    pub min_overlap_y: f32,
}

/// Decide how `ball` (its box at the tentative next position) bounces off `other`
///
/// Ties between the two axes resolve to `BounceAxis::Y`.
pub fn resolve_bounce(ball: &Aabb, other: &Aabb) -> Bounce {
    let overlap_left = ball.right() - other.left();
    let overlap_right = other.right() - ball.left();
    let overlap_top = ball.bottom() - other.top();
    let overlap_bottom = other.bottom() - ball.top();

    let from_left = overlap_left.abs() < overlap_right.abs();
    let from_top = overlap_top.abs() < overlap_bottom.abs();

    let min_overlap_x = if from_left { overlap_left } else { overlap_right };
    let min_overlap_y = if from_top { overlap_top } else { overlap_bottom };

    let axis = if min_overlap_x.abs() < min_overlap_y.abs() {
        BounceAxis::X
    } else {
        BounceAxis::Y
    };

    Bounce {
        axis,
        from_left,
        from_top,
        min_overlap_x,
        min_overlap_y,
    }
}

/// Velocity after a bounce. Only the bounce axis changes; it is reset to the
/// base magnitude pointing away from the obstacle.
pub fn bounce_velocity(vel: Vec2, base_speed: Vec2, bounce: &Bounce) -> Vec2 {
    match bounce.axis {
        BounceAxis::X => Vec2::new(
            if bounce.from_left { -base_speed.x } else { base_speed.x },
            vel.y,
        ),
        BounceAxis::Y => Vec2::new(
            vel.x,
            if bounce.from_top { -base_speed.y } else { base_speed.y },
        ),
    }
}

/// Deflection bands as (minimum |offset|, fraction of max deflection), widest first.
/// The outermost band covers the outer 15% of the paddle width on each side.
pub const DEFLECTION_ZONES: [(f32, f32); 4] =
    [(0.70, 1.0), (0.40, 0.60), (0.10, 0.25), (0.0, 0.0)];

/// Horizontal offset of the ball's center from the paddle's center,
/// normalized by the paddle half-width and clamped to [-1, 1].
/// Negative means left of center.
pub fn paddle_offset(ball: &Aabb, paddle: &Aabb) -> f32 {
    let half_width = (paddle.size().x / 2.0).max(f32::EPSILON);
    ((ball.center().x - paddle.center().x) / half_width).clamp(-1.0, 1.0)
}

/// Signed horizontal speed imparted by striking the paddle at `offset`
pub fn deflection_for_offset(offset: f32, max_deflection: f32) -> f32 {
    let t = offset.abs();
    let fraction = DEFLECTION_ZONES
        .iter()
        .find(|(min, _)| t >= *min)
        .map(|(_, fraction)| *fraction)
        .unwrap_or(0.0);
    let magnitude = fraction * max_deflection;
    if offset < 0.0 { -magnitude } else { magnitude }
}

/// Apply paddle deflection to an already-bounced velocity.
///
/// A top/bottom strike replaces the x speed outright; a side strike adds to
/// the x speed the bounce just set.
pub fn apply_paddle_deflection(vel: Vec2, axis: BounceAxis, deflection: f32) -> Vec2 {
    match axis {
        BounceAxis::Y => Vec2::new(deflection, vel.y),
        BounceAxis::X => Vec2::new(vel.x + deflection, vel.y),
    }
}
