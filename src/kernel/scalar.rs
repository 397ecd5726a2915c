//! Scalar IoU kernel.

use crate::geometry::ops::iou;
use crate::geometry::BBox;
use crate::kernel::IouKernel;

/// Reference kernel evaluating one pair at a time.
pub struct IouScalar;

impl IouKernel for IouScalar {
    fn iou_row_into(reference: &BBox, boxes: &[BBox], out: &mut Vec<f32>) {
        out.clear();
        out.extend(boxes.iter().map(|b| iou(reference, b)));
    }
}

#[cfg(test)]
mod tests {
    use super::IouScalar;
    use crate::geometry::BBox;
    use crate::kernel::IouKernel;

    #[test]
    fn row_matches_pairwise_values() {
        let reference = BBox::new(0.0, 0.0, 10.0, 10.0, 0.9, 0);
        let boxes = vec![
            reference.clone(),
            BBox::new(1.0, 1.0, 11.0, 11.0, 0.8, 0),
            BBox::new(20.0, 20.0, 30.0, 30.0, 0.7, 0),
        ];
        let mut out = vec![42.0];
        IouScalar::iou_row_into(&reference, &boxes, &mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], 1.0);
        assert!((out[1] - 81.0 / 119.0).abs() < 1e-6);
        assert_eq!(out[2], 0.0);
    }
}
