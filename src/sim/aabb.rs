//! Axis-aligned box collider for walls, the paddle and bricks
//!
//! A box is a position plus two corner offsets:
//! - x1 = position.x + offset1.x, x2 = position.x + offset2.x (same for y)
//! - the offsets name opposite corners but are not assumed ordered, so
//!   `min_*`/`max_*` are always derived

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which side of a box a contact is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Tie-break order when several sides qualify
    pub const PRIORITY: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Left/right sides flip horizontal motion
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// A rectangle positioned by an owner and two corner offsets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    pub position: Vec2,
    pub offset1: Vec2,
    pub offset2: Vec2,
    /// Debug label ("paddle", "pipe-left", ...)
    #[serde(default)]
    pub label: String,
}

impl BoxCollider {
    pub fn new(position: Vec2, offset1: Vec2, offset2: Vec2) -> Self {
        Self {
            position,
            offset1,
            offset2,
            label: String::new(),
        }
    }

    /// Box anchored at `position` spanning `size` to the right and down
    pub fn from_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position, Vec2::ZERO, size)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Move the box; offsets are kept
    #[inline]
    pub fn update(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn x1(&self) -> f32 {
        self.position.x + self.offset1.x
    }

    #[inline]
    pub fn x2(&self) -> f32 {
        self.position.x + self.offset2.x
    }

    #[inline]
    pub fn y1(&self) -> f32 {
        self.position.y + self.offset1.y
    }

    #[inline]
    pub fn y2(&self) -> f32 {
        self.position.y + self.offset2.y
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.x1().min(self.x2())
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x1().max(self.x2())
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.y1().min(self.y2())
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y1().max(self.y2())
    }

    pub fn width(&self) -> f32 {
        (self.offset1.x - self.offset2.x).abs()
    }

    pub fn height(&self) -> f32 {
        (self.offset1.y - self.offset2.y).abs()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x1() + self.x2()) / 2.0, (self.y1() + self.y2()) / 2.0)
    }

    /// Corners in winding order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let (x0, x1) = (self.min_x(), self.max_x());
        let (y0, y1) = (self.min_y(), self.max_y());
        [
            Vec2::new(x0, y0),
            Vec2::new(x1, y0),
            Vec2::new(x1, y1),
            Vec2::new(x0, y1),
        ]
    }

    /// Endpoints of one side of the box
    pub fn edge(&self, side: Side) -> (Vec2, Vec2) {
        let [tl, tr, br, bl] = self.corners();
        match side {
            Side::Left => (tl, bl),
            Side::Right => (tr, br),
            Side::Top => (tl, tr),
            Side::Bottom => (bl, br),
        }
    }

    /// Strict containment: points on the boundary are outside
    pub fn point_inside(&self, point: Vec2) -> bool {
        point.x > self.min_x()
            && point.x < self.max_x()
            && point.y > self.min_y()
            && point.y < self.max_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_box() -> BoxCollider {
        BoxCollider::from_size(Vec2::ZERO, Vec2::new(20.0, 20.0))
    }

    #[test]
    fn test_derived_bounds() {
        let b = BoxCollider::new(Vec2::new(10.0, 5.0), Vec2::new(2.0, 3.0), Vec2::new(12.0, 8.0));
        assert_eq!(b.x1(), 12.0);
        assert_eq!(b.x2(), 22.0);
        assert_eq!(b.y1(), 8.0);
        assert_eq!(b.y2(), 13.0);
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 5.0);
        assert_eq!(b.center(), Vec2::new(17.0, 10.5));
    }

    #[test]
    fn test_unordered_offsets() {
        let b = BoxCollider::new(Vec2::ZERO, Vec2::new(20.0, 20.0), Vec2::ZERO);
        assert_eq!(b.min_x(), 0.0);
        assert_eq!(b.max_y(), 20.0);
        assert_eq!(b.width(), 20.0);
        assert!(b.point_inside(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_update_moves_box() {
        let mut b = unit_box();
        b.update(Vec2::new(100.0, 50.0));
        assert_eq!(b.min_x(), 100.0);
        assert_eq!(b.max_y(), 70.0);
    }

    #[test]
    fn test_point_inside_strict() {
        let b = unit_box();
        assert!(b.point_inside(Vec2::new(1.0, 1.0)));
        assert!(!b.point_inside(Vec2::new(0.0, 10.0)));
        assert!(!b.point_inside(Vec2::new(20.0, 20.0)));
        assert!(!b.point_inside(Vec2::new(-1.0, 10.0)));
    }

    #[test]
    fn test_edges() {
        let b = unit_box();
        assert_eq!(b.edge(Side::Left), (Vec2::ZERO, Vec2::new(0.0, 20.0)));
        assert_eq!(b.edge(Side::Bottom), (Vec2::new(0.0, 20.0), Vec2::new(20.0, 20.0)));
    }

    proptest! {
        #[test]
        fn prop_boundary_points_are_outside(t in 0.0f32..=1.0, side in 0usize..4) {
            let b = unit_box();
            let (a, c) = b.edge(Side::PRIORITY[side]);
            let p = a + (c - a) * t;
            prop_assert!(!b.point_inside(p));
        }
    }
}
