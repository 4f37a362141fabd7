//! Data-driven game balance
//!
//! Every field has a default, so a tuning file only needs the values it
//! overrides. Loaded from JSON by the driver; the simulation only reads it.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Arena width and height
    pub arena_size: Vec2,
    /// Thickness of the top/left/right wall strips outside the arena
    pub wall_thickness: f32,

    pub ball_size: Vec2,
    /// Velocity given to a ball on launch; its absolute components are the
    /// base speeds every bounce restores
    pub ball_velocity: Vec2,
    /// Horizontal speed imparted by an edge strike on the paddle
    pub max_deflection: f32,

    pub paddle_size: Vec2,
    /// Key-driven paddle speed (units/second)
    pub paddle_speed: f32,
    /// Distance from the arena bottom to the paddle's top edge
    pub paddle_top_offset: f32,

    pub lives: u32,

    pub brick_rows: u32,
    pub brick_cols: u32,
    pub brick_size: Vec2,
    /// Y of the top brick row's top edge
    pub brick_top: f32,
    /// Probability that a brick is unbreakable (0 = all breakable)
    pub unbreakable_ratio: f32,
    /// Seed for the layout RNG
    pub layout_seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_size: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            wall_thickness: WALL_THICKNESS,

            ball_size: Vec2::splat(BALL_SIZE),
            ball_velocity: Vec2::new(BALL_SPEED, -BALL_SPEED),
            max_deflection: MAX_DEFLECTION,

            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            paddle_speed: PADDLE_SPEED,
            paddle_top_offset: PADDLE_TOP_OFFSET,

            lives: INITIAL_LIVES,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            brick_top: BRICK_TOP,
            unbreakable_ratio: 0.0,
            layout_seed: 0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Base speed magnitudes restored on every bounce
    pub fn base_speed(&self) -> Vec2 {
        self.ball_velocity.abs()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: Vec2) -> Result<()> {
            if v.x > 0.0 && v.y > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(SimError::InvalidTuning(format!("{name} must be positive, got {v}")))
            }
        }

        positive("arena_size", self.arena_size)?;
        positive("ball_size", self.ball_size)?;
        positive("paddle_size", self.paddle_size)?;
        positive("brick_size", self.brick_size)?;
        positive("ball_velocity magnitude", self.base_speed())?;

        if self.paddle_size.x > self.arena_size.x {
            return Err(SimError::InvalidTuning(
                "paddle is wider than the arena".to_string(),
            ));
        }
        if !(self.paddle_speed >= 0.0 && self.max_deflection >= 0.0 && self.wall_thickness > 0.0) {
            return Err(SimError::InvalidTuning(
                "paddle_speed and max_deflection must be non-negative, wall_thickness positive"
                    .to_string(),
            ));
        }
        if !(self.paddle_top_offset > 0.0 && self.paddle_top_offset <= self.arena_size.y) {
            return Err(SimError::InvalidTuning(format!(
                "paddle_top_offset must be within (0, {}]",
                self.arena_size.y
            )));
        }
        if !(0.0..=1.0).contains(&self.unbreakable_ratio) {
            return Err(SimError::InvalidTuning(format!(
                "unbreakable_ratio must be within [0, 1], got {}",
                self.unbreakable_ratio
            )));
        }
        self.validate_brick_grid()?;
        if self.lives == 0 {
            return Err(SimError::InvalidTuning("lives must be at least 1".to_string()));
        }
        Ok(())
    }

    /// The grid must fit the arena width and sit above a ball resting on the paddle
    fn validate_brick_grid(&self) -> Result<()> {
        if self.brick_rows.checked_mul(self.brick_cols).is_none() {
            return Err(SimError::InvalidTuning(format!(
                "brick grid {}x{} is too large",
                self.brick_rows, self.brick_cols
            )));
        }

        let grid = Vec2::new(
            self.brick_cols as f32 * self.brick_size.x,
            self.brick_rows as f32 * self.brick_size.y,
        );
        if grid.x > self.arena_size.x {
            return Err(SimError::InvalidTuning(format!(
                "brick grid is {} wide, arena is {}",
                grid.x, self.arena_size.x
            )));
        }

        let glued_ball_top =
            self.arena_size.y - self.paddle_top_offset - GLUE_GAP - self.ball_size.y;
        if !(self.brick_top >= 0.0 && self.brick_top + grid.y <= glued_ball_top) {
            return Err(SimError::InvalidTuning(format!(
                "brick grid spans y {}..{}, must fit within 0..{}",
                self.brick_top,
                self.brick_top + grid.y,
                glued_ball_top
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.base_speed(), Vec2::splat(BALL_SPEED));
        assert_eq!(tuning.brick_rows * tuning.brick_cols, 16);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "lives": 5, "max_deflection": 120.0 }"#).unwrap();
        assert_eq!(tuning.lives, 5);
        assert_eq!(tuning.max_deflection, 120.0);
        assert_eq!(tuning.arena_size, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT));
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            unbreakable_ratio: 0.25,
            layout_seed: 42,
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "lives": 0 }"#),
            Err(SimError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "paddle_size": [2000.0, 20.0] }"#),
            Err(SimError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "unbreakable_ratio": 1.5 }"#),
            Err(SimError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(SimError::TuningParse(_))
        ));
    }

    #[test]
    fn test_rejects_brick_grid_that_does_not_fit() {
        // Row x column count overflows u32
        assert!(matches!(
            Tuning::from_json(r#"{ "brick_rows": 70000, "brick_cols": 70000 }"#),
            Err(SimError::InvalidTuning(_))
        ));
        // Rows run past the paddle
        assert!(matches!(
            Tuning::from_json(r#"{ "brick_rows": 40 }"#),
            Err(SimError::InvalidTuning(_))
        ));
        // Columns wider than the arena
        assert!(matches!(
            Tuning::from_json(r#"{ "brick_cols": 30 }"#),
            Err(SimError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "brick_top": -5.0 }"#),
            Err(SimError::InvalidTuning(_))
        ));
        // Deepest grid that still leaves room for the glued ball: 50 + 27 * 20 = 590 <= 603
        assert!(Tuning::from_json(r#"{ "brick_rows": 27 }"#).is_ok());
        assert!(Tuning::from_json(r#"{ "brick_rows": 28 }"#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Tuning::load(Path::new("/nonexistent/tuning.json")),
            Err(SimError::TuningIo(_))
        ));
    }
}
