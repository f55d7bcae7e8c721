//! Screen-space vector helpers on top of `glam::Vec2`
//!
//! Board space has y growing downward, so angles are measured with the
//! y axis flipped: an angle of `PI / 2` points straight up the screen.

use glam::Vec2;

/// In-place direction operations used by the resolver.
pub trait Vec2Ext {
    /// Negate the x component. Returns self for chaining.
    fn reflect_x(&mut self) -> &mut Self;
    /// Negate the y component. Returns self for chaining.
    fn reflect_y(&mut self) -> &mut Self;
    /// Replace with the unit vector for `angle` (radians, screen space).
    fn set_from_angle(&mut self, angle: f32) -> &mut Self;
    /// `atan2(y, x)` of the vector as stored.
    fn screen_angle(&self) -> f32;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn reflect_x(&mut self) -> &mut Self {
        self.x = -self.x;
        self
    }

    #[inline]
    fn reflect_y(&mut self) -> &mut Self {
        self.y = -self.y;
        self
    }

    fn set_from_angle(&mut self, angle: f32) -> &mut Self {
        *self = Vec2::new(angle.cos(), -angle.sin()).normalize();
        self
    }

    #[inline]
    fn screen_angle(&self) -> f32 {
        self.y.atan2(self.x)
    }
}

/// Result of intersecting two segments as infinite lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Point where the two lines cross
    pub point: Vec2,
    /// Crossing lies within the first segment
    pub on_first: bool,
    /// Crossing lies within the second segment
    pub on_second: bool,
}

impl SegmentHit {
    /// Both segments actually touch
    #[inline]
    pub fn on_both(&self) -> bool {
        self.on_first && self.on_second
    }
}

/// Parametric intersection of segment `a1-a2` with segment `b1-b2`.
///
/// Returns `None` for parallel (or degenerate) segments.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<SegmentHit> {
    let da = a2 - a1;
    let db = b2 - b1;
    let denom = db.y * da.x - db.x * da.y;
    if denom == 0.0 {
        return None;
    }

    let ua = (db.x * (a1.y - b1.y) - db.y * (a1.x - b1.x)) / denom;
    let ub = (da.x * (a1.y - b1.y) - da.y * (a1.x - b1.x)) / denom;

    Some(SegmentHit {
        point: a1 + da * ua,
        on_first: (0.0..=1.0).contains(&ua),
        on_second: (0.0..=1.0).contains(&ub),
    })
}
