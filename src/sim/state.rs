//! Board geometry and simulation entities
//!
//! Everything the resolver touches each tick lives on `GameBoard`; the
//! board is handed to `tick` explicitly rather than reached through globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::BoxCollider;
use super::bounce::BounceZoneTable;
use super::collision::CircleCollider;
use super::grid::SpatialGrid;
use super::tick::ResolverLimits;
use crate::error::{Result, SimError};
use crate::level::BrickRecord;
use crate::settings::Settings;

/// Board geometry in unscaled sprite pixels plus a scale factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardLayout {
    pub cells_x: usize,
    pub cells_y: usize,
    pub scale: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    /// Thickness of the top/left/right pipes
    pub pipe_size: f32,
    /// Score strip above the top pipe
    pub score_height: f32,
    /// Gap between the top pipe and the first brick row
    pub padding_top: f32,
    pub background_width: f32,
    pub background_height: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            cells_x: 14,
            cells_y: 9,
            scale: 6.0,
            cell_width: 8.0,
            cell_height: 4.0,
            pipe_size: 8.0,
            score_height: 13.0,
            padding_top: 12.0,
            background_width: 128.0,
            background_height: 128.0,
        }
    }
}

impl BoardLayout {
    #[inline]
    pub fn tile_width(&self) -> f32 {
        self.cell_width * self.scale
    }

    #[inline]
    pub fn tile_height(&self) -> f32 {
        self.cell_height * self.scale
    }

    #[inline]
    pub fn pipe(&self) -> f32 {
        self.pipe_size * self.scale
    }

    pub fn width(&self) -> f32 {
        self.background_width * self.scale
    }

    pub fn height(&self) -> f32 {
        self.background_height * self.scale
    }

    /// Top-left corner of cell (0, 0) in board space
    pub fn game_offset(&self) -> Vec2 {
        Vec2::new(
            self.pipe(),
            (self.score_height + self.pipe_size + self.padding_top) * self.scale,
        )
    }

    /// Top-left corner of a cell in board space
    pub fn cell_to_local(&self, x: usize, y: usize) -> Vec2 {
        self.game_offset() + Vec2::new(x as f32 * self.tile_width(), y as f32 * self.tile_height())
    }

    /// Cell containing a board-space point.
    ///
    /// Accepts one ring of cells around the grid (`-1..=cells`) so that a
    /// ball just outside the brick area still checks the border bricks.
    pub fn local_to_cell(&self, point: Vec2) -> Option<(isize, isize)> {
        let rel = point - self.game_offset();
        let cx = (rel.x / self.tile_width()).floor();
        let cy = (rel.y / self.tile_height()).floor();

        let in_x = cx >= -1.0 && cx <= self.cells_x as f32;
        let in_y = cy >= -1.0 && cy <= self.cells_y as f32;
        (in_x && in_y).then_some((cx as isize, cy as isize))
    }

    /// Static colliders for the top, left and right pipes
    pub fn pipe_colliders(&self) -> Vec<BoxCollider> {
        let pipe = self.pipe();
        let score = self.score_height * self.scale;
        let side_height = self.height() - score - pipe;

        vec![
            BoxCollider::from_size(Vec2::new(0.0, score), Vec2::new(self.width(), pipe))
                .with_label("pipe-top"),
            BoxCollider::from_size(Vec2::new(0.0, score + pipe), Vec2::new(pipe, side_height))
                .with_label("pipe-left"),
            BoxCollider::from_size(
                Vec2::new(self.width() - pipe, score + pipe),
                Vec2::new(pipe, side_height),
            )
            .with_label("pipe-right"),
        ]
    }
}

/// A destructible brick occupying one grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    /// Record it was built from; sprite fields pass through untouched
    pub record: BrickRecord,
    pub hp: u8,
    pub destroyed: bool,
    pub collider: BoxCollider,
}

impl Brick {
    /// Brick with its top-left corner at `position` (board space)
    pub fn from_record(record: BrickRecord, position: Vec2, scale: f32) -> Self {
        let size = Vec2::new(record.sprite_width, record.sprite_height) * scale;
        Self {
            hp: record.hp,
            destroyed: record.hp == 0,
            collider: BoxCollider::from_size(position, size).with_label("brick"),
            record,
        }
    }

    /// Take one hit; returns true when this hit destroyed the brick
    pub fn damage(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 && !self.destroyed {
            self.destroyed = true;
            return true;
        }
        false
    }

    /// Record reflecting the current hit points
    pub fn to_record(&self) -> BrickRecord {
        BrickRecord {
            hp: self.hp,
            ..self.record.clone()
        }
    }
}

/// Player paddle, sliding horizontally between two pipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub position: Vec2,
    pub size: Vec2,
    pub min_x: f32,
    pub max_x: f32,
    /// Pixels per second
    pub speed: f32,
    pub collider: BoxCollider,
    pub zones: BounceZoneTable,
}

impl Paddle {
    pub fn new(position: Vec2, size: Vec2, min_x: f32, max_x: f32, speed: f32) -> Self {
        let mut paddle = Self {
            position,
            size,
            min_x,
            max_x,
            speed,
            collider: BoxCollider::from_size(position, size).with_label("paddle"),
            zones: BounceZoneTable::default(),
        };
        paddle.set_x(position.x);
        paddle
    }

    pub fn with_zones(mut self, zones: BounceZoneTable) -> Self {
        self.zones = zones;
        self
    }

    /// Move to `x`, clamped to the travel range
    pub fn set_x(&mut self, x: f32) {
        self.position.x = x.clamp(self.min_x, self.max_x.max(self.min_x));
        self.collider.update(self.position);
    }

    /// Move by `speed * direction * delta`; `direction` is -1, 0 or 1
    pub fn slide(&mut self, direction: f32, delta: f32) {
        self.set_x(self.position.x + self.speed * direction * delta);
    }

    /// Bounce angle for a ball at `x` landing on the paddle's top edge
    pub fn bounce_angle(&self, x: f32) -> f32 {
        self.zones.angle_for(x, &self.collider)
    }

    pub fn center(&self) -> Vec2 {
        self.collider.center()
    }
}

/// The ball: a circle moving along a unit direction at constant speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner of the sprite
    pub position: Vec2,
    pub size: Vec2,
    /// Unit direction of travel
    pub direction: Vec2,
    /// Pixels per second
    pub speed: f32,
    pub collider: CircleCollider,
}

impl Ball {
    /// The direction is normalized here; a zero direction is rejected so the
    /// resolver never normalizes a zero vector.
    pub fn new(position: Vec2, size: Vec2, direction: Vec2, speed: f32) -> Result<Self> {
        let Some(direction) = direction.try_normalize() else {
            return Err(SimError::DegenerateDirection {
                x: direction.x,
                y: direction.y,
            });
        };
        if !speed.is_finite() || speed < 0.0 {
            return Err(SimError::InvalidSpeed(speed));
        }

        let offset = size / 2.0;
        Ok(Self {
            position,
            size,
            direction,
            speed,
            collider: CircleCollider::new(position, offset, size.x / 2.0 + 1.0),
        })
    }

    pub fn center(&self) -> Vec2 {
        self.collider.center_at(self.position)
    }
}

/// Static pipe colliders
#[derive(Debug, Clone, Default)]
pub struct Walls {
    pub colliders: Vec<BoxCollider>,
}

/// The whole simulation context for one session
#[derive(Debug, Clone)]
pub struct GameBoard {
    pub layout: BoardLayout,
    pub paddle: Paddle,
    pub ball: Ball,
    pub walls: Walls,
    pub grid: SpatialGrid,
    pub limits: ResolverLimits,
    /// Largest frame delta passed to the resolver (seconds)
    pub max_frame_delta: f32,
    /// Motion is frozen until the player starts the round
    pub started: bool,
}

impl GameBoard {
    /// Build paddle, ball and pipes from `settings` around an existing grid
    pub fn new(settings: &Settings, grid: SpatialGrid) -> Result<Self> {
        let layout = settings.layout.clone();
        if grid.cells_x() != layout.cells_x || grid.cells_y() != layout.cells_y {
            return Err(SimError::GridShape {
                expected_rows: layout.cells_y,
                expected_cols: layout.cells_x,
                row: grid.cells_y(),
                found: grid.cells_x(),
            });
        }

        let scale = layout.scale;
        let paddle_size = settings.paddle.sprite_size * scale;
        let paddle = Paddle::new(
            settings.paddle.start * scale,
            paddle_size,
            layout.pipe(),
            layout.width() - layout.pipe() - paddle_size.x,
            settings.paddle.speed * scale,
        )
        .with_zones(settings.bounce_zones.clone());

        let ball = Ball::new(
            settings.ball.start * scale,
            settings.ball.sprite_size * scale,
            settings.ball.direction,
            settings.ball.speed * scale,
        )?;

        log::info!(
            "Board {}x{} cells at scale {}, {} bricks",
            layout.cells_x,
            layout.cells_y,
            scale,
            grid.brick_count()
        );

        Ok(Self {
            walls: Walls {
                colliders: layout.pipe_colliders(),
            },
            layout,
            paddle,
            ball,
            grid,
            limits: ResolverLimits {
                sub_steps: settings.sub_steps,
                max_collisions: settings.max_collisions,
            },
            max_frame_delta: settings.max_frame_delta,
            started: false,
        })
    }
}
