//! SIMD-accelerated IoU kernel using the `wide` crate.
//!
//! Candidate boxes are processed four at a time with `f64x4`, the same
//! precision the scalar formula accumulates in, so large boxes cannot overflow
//! and both kernels round identically. The tail that does not fill a register
//! falls back to the scalar formula. Lanes whose box is invalid are forced to
//! zero afterwards.

use crate::geometry::ops::{area_f64, iou, overlap_ratio};
use crate::geometry::BBox;
use crate::kernel::IouKernel;
use wide::f64x4;

const LANES: usize = 4;

/// Gathers one field of four consecutive boxes into a register.
#[inline]
fn gather(chunk: &[BBox], field: impl Fn(&BBox) -> f64) -> f64x4 {
    f64x4::from([
        field(&chunk[0]),
        field(&chunk[1]),
        field(&chunk[2]),
        field(&chunk[3]),
    ])
}

/// SIMD IoU kernel.
pub struct IouSimd;

impl IouKernel for IouSimd {
    fn iou_row_into(reference: &BBox, boxes: &[BBox], out: &mut Vec<f32>) {
        out.clear();
        if !reference.is_valid() {
            out.resize(boxes.len(), 0.0);
            return;
        }

        let zero = f64x4::ZERO;
        let ax1 = f64x4::splat(f64::from(reference.x1));
        let ay1 = f64x4::splat(f64::from(reference.y1));
        let ax2 = f64x4::splat(f64::from(reference.x2));
        let ay2 = f64x4::splat(f64::from(reference.y2));
        let area_a = f64x4::splat(area_f64(reference));

        let mut chunks = boxes.chunks_exact(LANES);
        for chunk in chunks.by_ref() {
            let bx1 = gather(chunk, |b| f64::from(b.x1));
            let by1 = gather(chunk, |b| f64::from(b.y1));
            let bx2 = gather(chunk, |b| f64::from(b.x2));
            let by2 = gather(chunk, |b| f64::from(b.y2));
            let area_b = gather(chunk, area_f64);

            let w = (ax2.min(bx2) - ax1.max(bx1)).max(zero);
            let h = (ay2.min(by2) - ay1.max(by1)).max(zero);
            let inter = (w * h).to_array();
            let union = (area_a + area_b - w * h).to_array();

            for (lane, b) in chunk.iter().enumerate() {
                out.push(if b.is_valid() {
                    overlap_ratio(inter[lane], union[lane])
                } else {
                    0.0
                });
            }
        }

        out.extend(chunks.remainder().iter().map(|b| iou(reference, b)));
    }
}
