//! Axis-aligned detection boxes and frame sizes.
//!
//! `BBox` is an immutable value type: every transform returns a new box and
//! width, height, area and center are derived from the corners on demand. A box
//! is valid only when all four corners are finite and `x2 > x1`, `y2 > y1`;
//! derived quantities of an invalid box are reported as zero.

use crate::util::{DetNmsError, DetNmsResult};

pub mod ops;
pub mod transform;

/// Detection box in corner form with a confidence score and class id.
#[derive(Clone, Debug, PartialEq)]
pub struct BBox {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
    /// Detector confidence, expected in `[0, 1]`.
    pub confidence: f32,
    /// Object category.
    pub class_id: i32,
    /// Display label; never used in computation.
    pub label: Option<String>,
}

impl BBox {
    /// Creates an unlabeled box.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32, class_id: i32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
            class_id,
            label: None,
        }
    }

    /// Returns a copy carrying `label`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns a copy with replaced corners, keeping score, class and label.
    pub fn with_corners(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            ..self.clone()
        }
    }

    /// Returns true when all corners are finite and the box has positive extent.
    pub fn is_valid(&self) -> bool {
        self.x1.is_finite()
            && self.y1.is_finite()
            && self.x2.is_finite()
            && self.y2.is_finite()
            && self.x2 > self.x1
            && self.y2 > self.y1
    }

    /// Returns the width, or 0 for an invalid box.
    pub fn width(&self) -> f32 {
        if self.is_valid() {
            self.x2 - self.x1
        } else {
            0.0
        }
    }

    /// Returns the height, or 0 for an invalid box.
    pub fn height(&self) -> f32 {
        if self.is_valid() {
            self.y2 - self.y1
        } else {
            0.0
        }
    }

    /// Returns the area, or 0 for an invalid box.
    pub fn area(&self) -> f32 {
        if self.is_valid() {
            (self.x2 - self.x1) * (self.y2 - self.y1)
        } else {
            0.0
        }
    }

    /// Returns the center point, or the origin for an invalid box.
    pub fn center(&self) -> (f32, f32) {
        if self.is_valid() {
            ((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
        } else {
            (0.0, 0.0)
        }
    }

    /// Scales all four coordinates.
    pub fn scale(&self, sx: f32, sy: f32) -> Self {
        self.with_corners(self.x1 * sx, self.y1 * sy, self.x2 * sx, self.y2 * sy)
    }

    /// Translates all four coordinates.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        self.with_corners(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }

    /// Clamps the corners into `[0, width] x [0, height]`.
    ///
    /// Never fails: a box entirely outside the frame collapses to zero area
    /// and must be rejected by the caller through [`BBox::is_valid`].
    pub fn clip(&self, width: f32, height: f32) -> Self {
        let cx = |v: f32| v.max(0.0).min(width);
        let cy = |v: f32| v.max(0.0).min(height);
        self.with_corners(cx(self.x1), cy(self.y1), cx(self.x2), cy(self.y2))
    }

    /// Converts absolute pixel coordinates into `[0, 1]` relative ones.
    pub fn to_relative(&self, width: f32, height: f32) -> Self {
        self.with_corners(
            self.x1 / width,
            self.y1 / height,
            self.x2 / width,
            self.y2 / height,
        )
    }

    /// Converts relative coordinates back into absolute pixels.
    pub fn to_absolute(&self, width: f32, height: f32) -> Self {
        self.with_corners(
            self.x1 * width,
            self.y1 * height,
            self.x2 * width,
            self.y2 * height,
        )
    }

    /// Intersection over union with `other`.
    pub fn iou(&self, other: &BBox) -> f32 {
        ops::iou(self, other)
    }
}

/// Frame dimensions used for coordinate conversions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSize {
    width: f32,
    height: f32,
}

impl FrameSize {
    /// Creates a frame size; both dimensions must be finite and positive.
    pub fn new(width: f32, height: f32) -> DetNmsResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(DetNmsError::InvalidFrameSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Returns the frame width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the frame height.
    pub fn height(&self) -> f32 {
        self.height
    }
}
