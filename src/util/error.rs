//! Error types for detnms.

use thiserror::Error;

/// Result alias for detnms operations.
pub type DetNmsResult<T> = std::result::Result<T, DetNmsError>;

/// Errors that can occur when configuring or driving suppression.
///
/// Geometry and the suppression strategies themselves are total; only
/// configuration, frame sizes and image I/O can be rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DetNmsError {
    /// A threshold that must lie in `[0, 1]` is out of range or not finite.
    #[error("{name} must be a finite value in [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    /// The soft suppression sigma must be finite and strictly positive.
    #[error("soft_sigma must be finite and > 0, got {value}")]
    InvalidSigma { value: f32 },
    /// A per-class IoU threshold is out of range.
    #[error("iou threshold for class {class_id} must be in [0, 1], got {value}")]
    InvalidClassThreshold { class_id: i32, value: f32 },
    /// The temporal blend weight is out of range.
    #[error("temporal_weight must be a finite value in [0, 1], got {value}")]
    InvalidTemporalWeight { value: f32 },
    /// A frame size is not strictly positive and finite.
    #[error("invalid frame size {width}x{height}")]
    InvalidFrameSize { width: f32, height: f32 },
    /// Image decoding failed while reading frame dimensions.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
