//! Screen-space geometry for hit-testing and spawn validation
//!
//! Coordinates are logical viewport pixels: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::is_finite_point;

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

/// True iff `pos` is finite and strictly inside `(0, area.x) × (0, area.y)`
///
/// Walls sit exactly on the boundary, so the boundary itself is rejected.
pub fn is_valid_position(pos: Vec2, area: Vec2) -> bool {
    is_finite_point(pos) && pos.x > 0.0 && pos.x < area.x && pos.y > 0.0 && pos.y < area.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};
    use proptest::prelude::*;

    const AREA: Vec2 = Vec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT);

    #[test]
    fn test_rect_contains_half_open() {
        let r = Rect::new(820.0, 50.0, 160.0, 40.0);
        assert!(r.contains(Vec2::new(820.0, 50.0)));
        assert!(r.contains(Vec2::new(900.0, 70.0)));
        assert!(r.contains(Vec2::new(979.9, 89.9)));
        assert!(!r.contains(Vec2::new(980.0, 70.0)));
        assert!(!r.contains(Vec2::new(900.0, 90.0)));
        assert!(!r.contains(Vec2::new(819.9, 70.0)));
        assert!(!r.contains(Vec2::new(f32::NAN, 70.0)));
    }

    #[test]
    fn test_rect_extents() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.min(), Vec2::new(10.0, 20.0));
        assert_eq!(r.max(), Vec2::new(40.0, 60.0));
        assert_eq!(r.size(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_boundary_is_invalid() {
        assert!(!is_valid_position(Vec2::new(0.0, 300.0), AREA));
        assert!(!is_valid_position(Vec2::new(PLAY_AREA_WIDTH, 300.0), AREA));
        assert!(!is_valid_position(Vec2::new(400.0, 0.0), AREA));
        assert!(!is_valid_position(Vec2::new(400.0, PLAY_AREA_HEIGHT), AREA));
        assert!(is_valid_position(Vec2::new(400.0, 300.0), AREA));
    }

    #[test]
    fn test_sidebar_is_invalid() {
        assert!(!is_valid_position(Vec2::new(900.0, 300.0), AREA));
        assert!(!is_valid_position(Vec2::new(-5.0, 300.0), AREA));
    }

    fn non_finite() -> impl Strategy<Value = f32> {
        prop_oneof![Just(f32::NAN), Just(f32::INFINITY), Just(f32::NEG_INFINITY)]
    }

    proptest! {
        #[test]
        fn prop_interior_is_valid(
            x in 0.001f32..(PLAY_AREA_WIDTH - 0.001),
            y in 0.001f32..(PLAY_AREA_HEIGHT - 0.001),
        ) {
            prop_assert!(is_valid_position(Vec2::new(x, y), AREA));
        }

        #[test]
        fn prop_non_finite_x_is_invalid(x in non_finite(), y in any::<f32>()) {
            prop_assert!(!is_valid_position(Vec2::new(x, y), AREA));
        }

        #[test]
        fn prop_non_finite_y_is_invalid(x in any::<f32>(), y in non_finite()) {
            prop_assert!(!is_valid_position(Vec2::new(x, y), AREA));
        }
    }
}
