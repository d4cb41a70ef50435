// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry helpers shared by resolution, hit testing, and drag math.
//!
//! All functions are pure. Ratios divide by the rectangle's width and height,
//! so zero-sized rectangles produce infinite or NaN ratios; callers must not
//! rely on ratio values for zero-sized views.

use kurbo::{Point, Rect, Size, Vec2};

/// The rectangle [`clip`] returns when there is no overlap.
pub const CLIPPED_OUT: Rect = Rect::new(-1.0, -1.0, -1.0, -1.0);

/// Returns the portion of `rect` that lies within `bound`.
///
/// When the two do not overlap (touching edges count as no overlap), returns
/// [`CLIPPED_OUT`]: a zero-area rectangle positioned at (-1, -1).
pub fn clip(rect: Rect, bound: Rect) -> Rect {
    let rect = rect.abs();
    let bound = bound.abs();
    if rect.x0 >= bound.x1 || rect.x1 <= bound.x0 || rect.y0 >= bound.y1 || rect.y1 <= bound.y0 {
        return CLIPPED_OUT;
    }
    Rect::new(
        rect.x0.max(bound.x0),
        rect.y0.max(bound.y0),
        rect.x1.min(bound.x1),
        rect.y1.min(bound.y1),
    )
}

/// Half-open containment test: `x0 <= x < x1` and `y0 <= y < y1`.
#[inline]
pub fn is_inside(point: Point, rect: Rect) -> bool {
    point.x >= rect.x0 && point.x < rect.x1 && point.y >= rect.y0 && point.y < rect.y1
}

/// A point expressed relative to a rectangle's origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RelativePosition {
    /// Offset from the rectangle's origin.
    pub offset: Vec2,
    /// The offset as a fraction of the rectangle's width and height.
    pub ratio: Vec2,
}

/// Position of `point` relative to `rect`, as an offset and as a ratio of its size.
pub fn relative_position(point: Point, rect: Rect) -> RelativePosition {
    let offset = point - rect.origin();
    RelativePosition {
        offset,
        ratio: ratio_of(offset, rect.size()),
    }
}

/// Divide an offset by a size, component-wise.
#[inline]
pub fn ratio_of(offset: Vec2, size: Size) -> Vec2 {
    Vec2::new(offset.x / size.width, offset.y / size.height)
}

/// Width and height of a rectangle.
#[inline]
pub fn dimensions(rect: Rect) -> Size {
    rect.size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_partial_overlap() {
        let child = Rect::new(50.0, -20.0, 150.0, 30.0);
        let parent = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(clip(child, parent), Rect::new(50.0, 0.0, 100.0, 30.0));
    }

    #[test]
    fn clip_contained_is_identity() {
        let child = Rect::new(10.0, 10.0, 20.0, 20.0);
        let parent = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(clip(child, parent), child);
    }

    #[test]
    fn clip_disjoint_is_degenerate() {
        let child = Rect::new(200.0, 0.0, 250.0, 50.0);
        let parent = Rect::new(0.0, 0.0, 100.0, 100.0);
        let clipped = clip(child, parent);
        assert_eq!(clipped, CLIPPED_OUT);
        assert_eq!(clipped.area(), 0.0, "no overlap must yield zero area");
        assert_eq!(clipped.origin(), Point::new(-1.0, -1.0));
    }

    #[test]
    fn clip_touching_edges_is_degenerate() {
        let child = Rect::new(100.0, 0.0, 150.0, 50.0);
        let parent = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(clip(child, parent), CLIPPED_OUT);
    }

    #[test]
    fn inside_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(is_inside(Point::new(0.0, 0.0), r));
        assert!(is_inside(Point::new(9.999, 5.0), r));
        assert!(!is_inside(Point::new(10.0, 5.0), r));
        assert!(!is_inside(Point::new(5.0, 10.0), r));
        assert!(!is_inside(Point::new(-0.1, 5.0), r));
    }

    #[test]
    fn relative_position_offset_and_ratio() {
        let r = Rect::new(100.0, 50.0, 300.0, 150.0);
        let rel = relative_position(Point::new(150.0, 100.0), r);
        assert_eq!(rel.offset, Vec2::new(50.0, 50.0));
        assert_eq!(rel.ratio, Vec2::new(0.25, 0.5));
    }

    #[test]
    fn zero_size_ratio_is_not_finite() {
        let r = Rect::new(0.0, 0.0, 0.0, 0.0);
        let rel = relative_position(Point::new(5.0, 0.0), r);
        assert!(rel.ratio.x.is_infinite());
        assert!(rel.ratio.y.is_nan());
    }

    #[test]
    fn dimensions_of_rect() {
        assert_eq!(
            dimensions(Rect::new(5.0, 5.0, 25.0, 45.0)),
            Size::new(20.0, 40.0)
        );
    }
}
