//! Batch IoU kernels.
//!
//! Every suppression strategy repeatedly compares the current pick against the
//! remaining candidates. Kernels compute that whole row of IoU values at once;
//! the SIMD kernel must agree with the scalar one bit-for-bit on valid boxes.

use crate::geometry::BBox;

/// Kernel trait for one-against-many IoU evaluation.
pub trait IouKernel {
    /// Writes `iou(reference, boxes[i])` into `out[i]`, replacing its contents.
    fn iou_row_into(reference: &BBox, boxes: &[BBox], out: &mut Vec<f32>);
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(not(feature = "simd"))]
pub(crate) use scalar::IouScalar as DefaultIou;
#[cfg(feature = "simd")]
pub(crate) use simd::IouSimd as DefaultIou;

/// Computes the IoU of `reference` against every box in `boxes`.
///
/// Uses the SIMD kernel when the `simd` feature is enabled.
pub fn iou_row(reference: &BBox, boxes: &[BBox]) -> Vec<f32> {
    let mut out = Vec::with_capacity(boxes.len());
    <DefaultIou as IouKernel>::iou_row_into(reference, boxes, &mut out);
    out
}
