//! Level records: the brick grid as the editor writes it
//!
//! A level is a row-major `(BrickRecord | null)[][]` in JSON. The collision
//! core only reads geometry (`spriteWidth`, `spriteHeight`) and `hp`; every
//! other field is carried through so a saved level reloads unchanged.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::sim::grid::check_shape;
use crate::sim::{BoardLayout, Brick, SpatialGrid};

/// Record `type` tag for bricks
pub const BRICK_TYPE: &str = "brick";

/// Position as the editor stores it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPoint {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for RecordPoint {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// One serialized brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrickRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub sprite_path: String,
    pub sprite_x: f32,
    pub sprite_y: f32,
    pub sprite_width: f32,
    pub sprite_height: f32,
    #[serde(default)]
    pub position: RecordPoint,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_hp")]
    pub hp: u8,
}

fn default_scale() -> f32 {
    1.0
}

fn default_hp() -> u8 {
    1
}

impl Default for BrickRecord {
    fn default() -> Self {
        Self {
            kind: BRICK_TYPE.to_string(),
            sprite_path: String::new(),
            sprite_x: 0.0,
            sprite_y: 0.0,
            sprite_width: 8.0,
            sprite_height: 4.0,
            position: RecordPoint::default(),
            scale: default_scale(),
            hp: default_hp(),
        }
    }
}

/// Row-major level contents
pub type Tiles = Vec<Vec<Option<BrickRecord>>>;

/// Parse a level. Records of any type other than `"brick"` load as empty cells.
pub fn decode_tiles(json: &str) -> Result<Tiles> {
    let tiles: Tiles = serde_json::from_str(json).map_err(SimError::Level)?;
    Ok(tiles
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.filter(|record| record.kind == BRICK_TYPE))
                .collect()
        })
        .collect())
}

pub fn encode_tiles(tiles: &Tiles) -> Result<String> {
    serde_json::to_string(tiles).map_err(SimError::Level)
}

impl SpatialGrid {
    /// Place each record in its cell. Bricks are positioned by the cell and
    /// sized by the board scale, whatever position/scale the record carries.
    pub fn from_records(layout: &BoardLayout, tiles: Tiles) -> Result<Self> {
        check_shape(layout.cells_x, layout.cells_y, tiles.iter().map(Vec::len))?;

        let rows = tiles
            .into_iter()
            .enumerate()
            .map(|(y, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(x, cell)| {
                        cell.map(|record| {
                            Brick::from_record(record, layout.cell_to_local(x, y), layout.scale)
                        })
                    })
                    .collect()
            })
            .collect();

        SpatialGrid::from_rows(layout.cells_x, layout.cells_y, rows)
    }

    /// Current contents as records, destroyed bricks included until purged
    pub fn to_records(&self) -> Tiles {
        self.rows()
            .take(self.cells_y())
            .map(|row| row.iter().map(|cell| cell.as_ref().map(Brick::to_record)).collect())
            .collect()
    }
}

/// Evenly spaced sprite cells in a sheet image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSheet {
    pub path: String,
    pub start_x: f32,
    pub start_y: f32,
    pub tile_width: f32,
    pub tile_height: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    pub cells_x: u32,
    pub cells_y: u32,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self {
            path: "resources/spritesheets/bricks.png".to_string(),
            start_x: 2.0,
            start_y: 2.0,
            tile_width: 8.0,
            tile_height: 4.0,
            gap_x: 2.0,
            gap_y: 1.0,
            cells_x: 4,
            cells_y: 6,
        }
    }
}

impl SpriteSheet {
    /// Record for the sprite in sheet cell `(x, y)`
    pub fn record(&self, x: u32, y: u32) -> BrickRecord {
        BrickRecord {
            sprite_path: self.path.clone(),
            sprite_x: self.start_x + (self.tile_width + self.gap_x) * x as f32,
            sprite_y: self.start_y + (self.tile_height + self.gap_y) * y as f32,
            sprite_width: self.tile_width,
            sprite_height: self.tile_height,
            ..BrickRecord::default()
        }
    }
}

/// Seeded random level: each cell gets a brick with probability `density`
pub fn generate(layout: &BoardLayout, sheet: &SpriteSheet, seed: u64, density: f64) -> Tiles {
    let mut rng = Pcg32::seed_from_u64(seed);
    let density = if density.is_finite() { density.clamp(0.0, 1.0) } else { 0.0 };

    let tiles: Tiles = (0..layout.cells_y)
        .map(|y| {
            (0..layout.cells_x)
                .map(|x| {
                    if !rng.random_bool(density) {
                        return None;
                    }
                    let sx = rng.random_range(0..sheet.cells_x.max(1));
                    let sy = rng.random_range(0..sheet.cells_y.max(1));
                    Some(BrickRecord {
                        position: layout.cell_to_local(x, y).into(),
                        scale: layout.scale,
                        ..sheet.record(sx, sy)
                    })
                })
                .collect()
        })
        .collect();

    let count = tiles.iter().flatten().flatten().count();
    log::info!("Generated level (seed {}): {} bricks", seed, count);
    tiles
}
