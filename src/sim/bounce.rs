//! Paddle bounce-angle zones
//!
//! The paddle's width is split into six zones by the fraction
//! `(x - paddle_left) / paddle_width`. Fixed zones return one angle, blend
//! zones interpolate between their two neighbours. Left of center sends the
//! ball up-left, right of center up-right.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_4, FRAC_PI_6, PI};

use super::aabb::BoxCollider;
use crate::lerp;

/// Angle assigned by one zone (radians, screen space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoneAngle {
    Fixed(f32),
    /// Linear blend from the first angle at `start` to the second at `end`
    Blend(f32, f32),
}

/// Half-open fraction range `[start, end)` of the paddle width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceZone {
    pub start: f32,
    pub end: f32,
    pub angle: ZoneAngle,
}

impl BounceZone {
    #[inline]
    fn contains(&self, frac: f32) -> bool {
        frac >= self.start && frac < self.end
    }

    fn angle_at(&self, frac: f32) -> f32 {
        match self.angle {
            ZoneAngle::Fixed(angle) => angle,
            ZoneAngle::Blend(from, to) => {
                lerp(from, to, (frac - self.start) / (self.end - self.start))
            }
        }
    }
}

/// Ordered zones covering `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BounceZoneTable {
    zones: Vec<BounceZone>,
}

impl Default for BounceZoneTable {
    fn default() -> Self {
        let steep_left = 5.0 * PI / 6.0;
        let left = 3.0 * PI / 4.0;
        let right = FRAC_PI_4;
        let steep_right = FRAC_PI_6;

        Self {
            zones: vec![
                BounceZone { start: 0.0, end: 0.05, angle: ZoneAngle::Fixed(steep_left) },
                BounceZone { start: 0.05, end: 0.30, angle: ZoneAngle::Blend(steep_left, left) },
                BounceZone { start: 0.30, end: 0.50, angle: ZoneAngle::Fixed(left) },
                BounceZone { start: 0.50, end: 0.70, angle: ZoneAngle::Fixed(right) },
                BounceZone { start: 0.70, end: 0.95, angle: ZoneAngle::Blend(right, steep_right) },
                // Ends past 1.0 so the right edge itself is covered
                BounceZone { start: 0.95, end: 1.01, angle: ZoneAngle::Fixed(steep_right) },
            ],
        }
    }
}

impl BounceZoneTable {
    pub fn new(zones: Vec<BounceZone>) -> Self {
        Self { zones }
    }

    pub fn zones(&self) -> &[BounceZone] {
        &self.zones
    }

    /// Bounce angle for a ball at `x` hitting the top of `paddle`
    pub fn angle_for(&self, x: f32, paddle: &BoxCollider) -> f32 {
        let width = paddle.width();
        let frac = if width > 0.0 {
            ((x - paddle.min_x()) / width).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.angle_at_fraction(frac)
    }

    /// Bounce angle for a fraction of the paddle width
    pub fn angle_at_fraction(&self, frac: f32) -> f32 {
        match self.zones.iter().find(|zone| zone.contains(frac)) {
            Some(zone) => zone.angle_at(frac),
            None => {
                // Gap in a custom table: fall back to the nearest zone
                let nearest = self.zones.iter().min_by(|a, b| {
                    distance_to(a, frac)
                        .partial_cmp(&distance_to(b, frac))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                nearest.map_or(PI / 2.0, |zone| zone.angle_at(frac.clamp(zone.start, zone.end)))
            }
        }
    }
}

fn distance_to(zone: &BounceZone, frac: f32) -> f32 {
    if frac < zone.start {
        zone.start - frac
    } else {
        (frac - zone.end).max(0.0)
    }
}
