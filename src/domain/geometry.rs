//! Geometric types for the selection region and pointer coordinates

use serde::{Deserialize, Serialize};

/// Viewport-relative pointer position in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of the visible viewport in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned selection rectangle in viewport coordinates
///
/// Width and height are never negative; the rectangle is always normalized
/// from the two corners it was built from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl SelectionRect {
    /// Build the box spanned by an anchor and the current pointer position
    pub fn from_corners(anchor: Point, end: Point) -> Self {
        Self {
            x: anchor.x.min(end.x),
            y: anchor.y.min(end.y),
            w: (anchor.x - end.x).abs(),
            h: (anchor.y - end.y).abs(),
        }
    }

    /// Whether both sides are strictly longer than `min`
    pub fn exceeds(&self, min: f32) -> bool {
        self.w > min && self.h > min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let r = SelectionRect::from_corners(Point::new(250.0, 220.0), Point::new(100.0, 100.0));
        assert_eq!(
            r,
            SelectionRect {
                x: 100.0,
                y: 100.0,
                w: 150.0,
                h: 120.0
            }
        );
    }

    #[test]
    fn test_from_corners_mixed_directions() {
        let anchor = Point::new(40.0, 10.0);
        let end = Point::new(15.0, 90.0);
        let r = SelectionRect::from_corners(anchor, end);
        assert_eq!(r.x, anchor.x.min(end.x));
        assert_eq!(r.y, anchor.y.min(end.y));
        assert_eq!(r.w, (anchor.x - end.x).abs());
        assert_eq!(r.h, (anchor.y - end.y).abs());
        assert!(r.w >= 0.0 && r.h >= 0.0);
    }

    #[test]
    fn test_exceeds_is_strict_on_both_axes() {
        let r = SelectionRect::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 50.0));
        assert!(!r.exceeds(10.0));
        let r = SelectionRect::from_corners(Point::new(0.0, 0.0), Point::new(11.0, 11.0));
        assert!(r.exceeds(10.0));
    }
}
