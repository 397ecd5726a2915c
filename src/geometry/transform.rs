//! Coordinate-system conversions between frames.

use crate::geometry::{BBox, FrameSize};

/// Maps a box from a `src` sized frame onto a `dst` sized frame.
pub fn rescale(bbox: &BBox, src: FrameSize, dst: FrameSize) -> BBox {
    bbox.scale(dst.width() / src.width(), dst.height() / src.height())
}

/// Converts absolute pixel coordinates into coordinates relative to `frame`.
pub fn absolute_to_relative(bbox: &BBox, frame: FrameSize) -> BBox {
    bbox.to_relative(frame.width(), frame.height())
}

/// Converts relative coordinates into absolute pixels of `frame`.
pub fn relative_to_absolute(bbox: &BBox, frame: FrameSize) -> BBox {
    bbox.to_absolute(frame.width(), frame.height())
}

/// Applies a 2x3 affine matrix `[a, b, tx, c, d, ty]` to the box corners.
///
/// The result is the axis-aligned hull of the four transformed corners, so
/// rotations grow the box rather than producing a rotated rectangle.
pub fn transform_affine(bbox: &BBox, m: [f32; 6]) -> BBox {
    let map = |x: f32, y: f32| (m[0] * x + m[1] * y + m[2], m[3] * x + m[4] * y + m[5]);
    let corners = [
        map(bbox.x1, bbox.y1),
        map(bbox.x2, bbox.y1),
        map(bbox.x1, bbox.y2),
        map(bbox.x2, bbox.y2),
    ];

    let mut x1 = f32::INFINITY;
    let mut y1 = f32::INFINITY;
    let mut x2 = f32::NEG_INFINITY;
    let mut y2 = f32::NEG_INFINITY;
    for (x, y) in corners {
        x1 = x1.min(x);
        y1 = y1.min(y);
        x2 = x2.max(x);
        y2 = y2.max(y);
    }
    bbox.with_corners(x1, y1, x2, y2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_maps_between_frames() {
        let src = FrameSize::new(640.0, 640.0).unwrap();
        let dst = FrameSize::new(1280.0, 320.0).unwrap();
        let b = BBox::new(64.0, 64.0, 128.0, 128.0, 0.8, 0);
        let out = rescale(&b, src, dst);
        assert_eq!((out.x1, out.y1, out.x2, out.y2), (128.0, 32.0, 256.0, 64.0));
    }

    #[test]
    fn identity_affine_is_noop() {
        let b = BBox::new(1.0, 2.0, 3.0, 4.0, 0.8, 0);
        let out = transform_affine(&b, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(out, b);
    }

    #[test]
    fn quarter_turn_swaps_extent() {
        let b = BBox::new(0.0, 0.0, 4.0, 2.0, 0.8, 0);
        // (x, y) -> (-y, x)
        let out = transform_affine(&b, [0.0, -1.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!((out.x1, out.y1, out.x2, out.y2), (-2.0, 0.0, 0.0, 4.0));
    }
}
