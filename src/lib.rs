//! Pipe Breaker - collision core for a pipe-walled brick breaker
//!
//! Core modules:
//! - `sim`: Ball motion, colliders, brick grid and the per-tick resolver
//! - `level`: Brick records, level decoding and seeded level fill
//! - `platform`: Wall-clock frame timing
//! - `settings`: Data-driven board and entity tuning

pub mod error;
pub mod level;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::Settings;

/// Simulation constants
pub mod consts {
    /// Equal slices each tick's displacement is cut into
    pub const SUB_STEPS: u32 = 10;
    /// Direction-changing collisions allowed per tick before motion halts
    pub const MAX_COLLISIONS: u32 = 5;
    /// Largest frame delta fed to the resolver (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;
    /// Grid window radius (in cells) searched around the ball for bricks
    pub const BRICK_SEARCH_RADIUS: usize = 1;
}

/// Linear interpolation between `v0` and `v1`
#[inline]
pub fn lerp(v0: f32, v1: f32, t: f32) -> f32 {
    v0 * (1.0 - t) + v1 * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert!((lerp(2.0, 6.0, 0.25) - 3.0).abs() < 1e-6);
    }
}
