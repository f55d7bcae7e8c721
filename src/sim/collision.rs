//! Circle-versus-box contact classification
//!
//! The ball is a circle; everything it bounces off is an axis-aligned box.
//! A test is two-phase:
//! 1. Vertex: a box corner lies strictly inside the circle. The side is the
//!    first edge (left, right, top, bottom) crossed by the segment from the
//!    circle center to the box center.
//! 2. Edge: no corner inside, but the center is within `radius` of an edge
//!    line while strictly inside that edge's span.
//!
//! The two kinds bounce differently, so they are never merged.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::{BoxCollider, Side};
use super::vector::segment_intersection;

/// How the circle touches a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// A box corner penetrates the circle
    Vertex(Side),
    /// The circle overlaps an edge band with no corner inside
    Edge(Side),
}

impl Contact {
    #[inline]
    pub fn side(self) -> Side {
        match self {
            Contact::Vertex(side) | Contact::Edge(side) => side,
        }
    }
}

/// A circle bound to an owner's position plus an offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    pub offset: Vec2,
    /// Circle center (owner position + offset)
    pub position: Vec2,
    pub radius: f32,
}

impl CircleCollider {
    pub fn new(owner_position: Vec2, offset: Vec2, radius: f32) -> Self {
        Self {
            offset,
            position: owner_position + offset,
            radius,
        }
    }

    /// Re-derive the center from the owner's position
    #[inline]
    pub fn update(&mut self, owner_position: Vec2) {
        self.position = owner_position + self.offset;
    }

    /// Center the circle would have if its owner stood at `owner_position`
    #[inline]
    pub fn center_at(&self, owner_position: Vec2) -> Vec2 {
        owner_position + self.offset
    }

    /// Strict containment of `point` in the circle centered at `center`
    #[inline]
    pub fn contains_point(&self, point: Vec2, center: Vec2) -> bool {
        center.distance_squared(point) < self.radius * self.radius
    }

    /// Test a box against the circle centered at `center`
    pub fn check_box(&self, bx: &BoxCollider, center: Vec2) -> Option<Contact> {
        if bx.corners().iter().any(|&c| self.contains_point(c, center)) {
            return Some(Contact::Vertex(vertex_side(bx, center)));
        }

        Side::PRIORITY
            .into_iter()
            .find(|&side| self.in_edge_band(bx, side, center))
            .map(Contact::Edge)
    }

    /// Center within `radius` of the edge line and strictly inside its span
    fn in_edge_band(&self, bx: &BoxCollider, side: Side, center: Vec2) -> bool {
        match side {
            Side::Left | Side::Right => {
                let x = if side == Side::Left { bx.min_x() } else { bx.max_x() };
                (center.x - x).abs() < self.radius && center.y > bx.min_y() && center.y < bx.max_y()
            }
            Side::Top | Side::Bottom => {
                let y = if side == Side::Top { bx.min_y() } else { bx.max_y() };
                (center.y - y).abs() < self.radius && center.x > bx.min_x() && center.x < bx.max_x()
            }
        }
    }
}

/// Side crossed by the segment from `center` to the box center.
///
/// The segment misses every edge only when `center` is already inside the
/// box; that contact falls back to the side of least penetration.
fn vertex_side(bx: &BoxCollider, center: Vec2) -> Side {
    let box_center = bx.center();
    let crossed = Side::PRIORITY.into_iter().find(|&side| {
        let (a, b) = bx.edge(side);
        segment_intersection(center, box_center, a, b).is_some_and(|hit| hit.on_both())
    });

    match crossed {
        Some(side) => side,
        None => {
            let side = shallowest_side(bx, center);
            log::warn!(
                "vertex contact at ({:.2}, {:.2}) crossed no edge of {:?}; using {:?}",
                center.x,
                center.y,
                bx.label,
                side
            );
            side
        }
    }
}

/// Side whose edge line is closest to `center`, ties broken by priority
fn shallowest_side(bx: &BoxCollider, center: Vec2) -> Side {
    let depth = |side: Side| match side {
        Side::Left => (center.x - bx.min_x()).abs(),
        Side::Right => (bx.max_x() - center.x).abs(),
        Side::Top => (center.y - bx.min_y()).abs(),
        Side::Bottom => (bx.max_y() - center.y).abs(),
    };

    let mut best = Side::Left;
    for side in Side::PRIORITY {
        if depth(side) < depth(best) {
            best = side;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> BoxCollider {
        BoxCollider::from_size(Vec2::ZERO, Vec2::new(20.0, 20.0))
    }

    fn circle(radius: f32) -> CircleCollider {
        CircleCollider::new(Vec2::ZERO, Vec2::ZERO, radius)
    }

    #[test]
    fn test_update_tracks_owner() {
        let mut c = CircleCollider::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, 2.0), 3.0);
        assert_eq!(c.position, Vec2::new(12.0, 12.0));
        c.update(Vec2::new(0.0, 5.0));
        assert_eq!(c.position, Vec2::new(2.0, 7.0));
    }

    #[test]
    fn test_miss_far_away() {
        assert_eq!(circle(5.0).check_box(&square(), Vec2::new(40.0, 40.0)), None);
        // Beside the box but level with no edge band
        assert_eq!(circle(5.0).check_box(&square(), Vec2::new(-10.0, 10.0)), None);
    }

    #[test]
    fn test_centered_inside_no_corner_no_band() {
        // Radius 5 at (10, 10): corners are ~14.1 away and every edge is 10 away
        assert_eq!(circle(5.0).check_box(&square(), Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_edge_top() {
        let contact = circle(5.0).check_box(&square(), Vec2::new(10.0, 3.0));
        assert_eq!(contact, Some(Contact::Edge(Side::Top)));
    }

    #[test]
    fn test_edge_from_outside() {
        let c = circle(5.0);
        assert_eq!(c.check_box(&square(), Vec2::new(-3.0, 10.0)), Some(Contact::Edge(Side::Left)));
        assert_eq!(c.check_box(&square(), Vec2::new(23.0, 10.0)), Some(Contact::Edge(Side::Right)));
        assert_eq!(c.check_box(&square(), Vec2::new(10.0, 24.0)), Some(Contact::Edge(Side::Bottom)));
    }

    #[test]
    fn test_edge_band_is_strict() {
        // Exactly `radius` away from the left edge
        assert_eq!(circle(5.0).check_box(&square(), Vec2::new(-5.0, 10.0)), None);
    }

    #[test]
    fn test_edge_priority_left_before_top() {
        // Approaching the top-left corner diagonally
        let bx = BoxCollider::from_size(Vec2::ZERO, Vec2::new(40.0, 40.0));
        // Corner (0,0) is ~2.83 away; the diagonal to the center crosses left and top at the corner
        let contact = circle(5.0).check_box(&bx, Vec2::new(-2.0, -2.0));
        assert_eq!(contact, Some(Contact::Vertex(Side::Left)));

        let contact = circle(3.0).check_box(&bx, Vec2::new(2.5, 2.5));
        // Corner is ~3.54 away, outside radius 3: both bands qualify, left wins
        assert_eq!(contact, Some(Contact::Edge(Side::Left)));
    }

    #[test]
    fn test_vertex_exactly_on_corner() {
        let contact = circle(5.0).check_box(&square(), Vec2::ZERO);
        assert_eq!(contact, Some(Contact::Vertex(Side::Left)));
    }

    #[test]
    fn test_vertex_from_above_right_corner() {
        // Above the top-right corner: the segment to the box center enters through the top
        let contact = circle(5.0).check_box(&square(), Vec2::new(21.0, -3.0));
        assert_eq!(contact, Some(Contact::Vertex(Side::Top)));
    }

    #[test]
    fn test_vertex_from_right_of_bottom_right_corner() {
        let contact = circle(5.0).check_box(&square(), Vec2::new(23.0, 21.0));
        assert_eq!(contact, Some(Contact::Vertex(Side::Right)));
    }

    #[test]
    fn test_vertex_center_inside_box_falls_back() {
        // Tiny box swallowed by the circle; center sits inside the box near its bottom
        let bx = BoxCollider::from_size(Vec2::ZERO, Vec2::new(4.0, 4.0));
        let contact = circle(10.0).check_box(&bx, Vec2::new(2.0, 3.5));
        assert_eq!(contact, Some(Contact::Vertex(Side::Bottom)));
    }

    #[test]
    fn test_corner_touching_boundary_is_not_vertex() {
        // Corner (20, 20) is exactly radius 5 from (23, 24)
        let contact = circle(5.0).check_box(&square(), Vec2::new(23.0, 24.0));
        assert_eq!(contact, None);
    }
}
