//! Collision simulation
//!
//! Pure and single-threaded: a tick reads the board and a frame delta,
//! mutates ball/paddle/bricks and returns a report. No rendering, no timers.

pub mod aabb;
pub mod bounce;
pub mod collision;
pub mod grid;
pub mod state;
pub mod tick;
pub mod vector;

pub use aabb::{BoxCollider, Side};
pub use bounce::{BounceZone, BounceZoneTable, ZoneAngle};
pub use collision::{CircleCollider, Contact};
pub use grid::{CellWindow, SpatialGrid};
pub use state::{Ball, BoardLayout, Brick, GameBoard, Paddle, Walls};
pub use tick::{
    BrickField, CandidateSource, Hit, MotionReport, Obstacles, ResolverLimits, Surface, TickInput,
    TickReport, clamp_frame_delta, resolve_motion, tick,
};
pub use vector::{SegmentHit, Vec2Ext, segment_intersection};
