//! Board and entity tuning
//!
//! Loaded from a JSON file; every field has a default so a partial file
//! only overrides what it names. Positions and speeds are in unscaled
//! sprite pixels and get multiplied by `layout.scale` when the board is built.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_COLLISIONS, MAX_FRAME_DELTA, SUB_STEPS};
use crate::error::{Result, SimError};
use crate::level::SpriteSheet;
use crate::sim::{BoardLayout, BounceZoneTable};

/// Ball start state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    /// Sprite top-left at round start
    pub start: Vec2,
    pub sprite_size: Vec2,
    /// Initial direction (normalized on construction, must be non-zero)
    pub direction: Vec2,
    /// Pixels per second
    pub speed: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            start: Vec2::new(62.0, 101.0),
            sprite_size: Vec2::new(4.0, 4.0),
            direction: Vec2::new(1.0, -1.0),
            speed: 52.0,
        }
    }
}

/// Paddle start state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleTuning {
    pub start: Vec2,
    pub sprite_size: Vec2,
    /// Pixels per second
    pub speed: f32,
}

impl Default for PaddleTuning {
    fn default() -> Self {
        Self {
            start: Vec2::new(50.0, 106.0),
            sprite_size: Vec2::new(27.0, 6.0),
            speed: 72.0,
        }
    }
}

/// Everything needed to build a `GameBoard`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layout: BoardLayout,
    pub ball: BallTuning,
    pub paddle: PaddleTuning,
    pub bounce_zones: BounceZoneTable,

    // === Resolver ===
    /// Equal slices per tick
    pub sub_steps: u32,
    /// Collision retries per tick before motion halts
    pub max_collisions: u32,
    /// Frame delta clamp (seconds)
    pub max_frame_delta: f32,

    // === Level fill ===
    /// Seed for generated levels
    pub seed: u64,
    /// Chance that a cell gets a brick
    pub brick_density: f64,
    pub brick_sheet: SpriteSheet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: BoardLayout::default(),
            ball: BallTuning::default(),
            paddle: PaddleTuning::default(),
            bounce_zones: BounceZoneTable::default(),

            sub_steps: SUB_STEPS,
            max_collisions: MAX_COLLISIONS,
            max_frame_delta: MAX_FRAME_DELTA,

            seed: 0x5eed,
            brick_density: 0.2,
            brick_sheet: SpriteSheet::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SimError::Config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(SimError::Config)
    }

    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"seed": 7, "layout": {"scale": 2}}"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.layout.scale, 2.0);
        assert_eq!(settings.layout.cells_x, 14);
        assert_eq!(settings.sub_steps, 10);
        assert_eq!(settings.max_collisions, 5);
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings::default();
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(Settings::from_json("[1, 2"), Err(SimError::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load("definitely/not/here/settings.json").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
