//! Soft non-maximum suppression with Gaussian score decay.

use crate::candidate::order::sort_by_confidence;
use crate::geometry::BBox;
use crate::kernel::{DefaultIou, IouKernel};
use crate::util::math::gaussian_decay;

/// Soft non-maximum suppression.
///
/// Instead of deleting boxes that overlap the current pick
/// (`iou >= iou_threshold`), their confidence is multiplied by
/// `exp(-iou^2 / sigma)`. Boxes whose decayed score falls below
/// `score_threshold` are dropped; the survivors are re-sorted and the loop
/// continues. Kept boxes carry their decayed confidence.
pub fn soft_nms(boxes: &[BBox], iou_threshold: f32, sigma: f32, score_threshold: f32) -> Vec<BBox> {
    let mut remaining: Vec<BBox> = boxes
        .iter()
        .filter(|b| b.confidence >= score_threshold)
        .cloned()
        .collect();
    sort_by_confidence(&mut remaining);

    let mut kept = Vec::new();
    let mut ious = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let pick = remaining.remove(0);
        DefaultIou::iou_row_into(&pick, &remaining, &mut ious);

        let mut decayed = false;
        for (bbox, &iou) in remaining.iter_mut().zip(&ious) {
            if iou >= iou_threshold {
                bbox.confidence *= gaussian_decay(iou, sigma);
                decayed = true;
            }
        }
        if decayed {
            remaining.retain(|b| b.confidence >= score_threshold);
            sort_by_confidence(&mut remaining);
        }
        kept.push(pick);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::soft_nms;
    use crate::geometry::BBox;

    #[test]
    fn overlapping_box_is_rescored_not_removed() {
        let boxes = vec![
            BBox::new(0.0, 0.0, 10.0, 10.0, 0.9, 0),
            BBox::new(1.0, 1.0, 11.0, 11.0, 0.8, 0),
        ];
        let kept = soft_nms(&boxes, 0.5, 0.5, 0.1);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].confidence, 0.9);

        let iou = 81.0f32 / 119.0;
        let expected = 0.8 * (-(iou * iou) / 0.5).exp();
        assert!((kept[1].confidence - expected).abs() < 1e-5);
    }

    #[test]
    fn decay_below_threshold_drops_box() {
        let boxes = vec![
            BBox::new(0.0, 0.0, 10.0, 10.0, 0.9, 0),
            BBox::new(0.0, 0.0, 10.0, 10.0, 0.8, 0),
        ];
        // iou = 1, decay = exp(-2) ~ 0.135, 0.8 * 0.135 < 0.5
        let kept = soft_nms(&boxes, 0.5, 0.5, 0.5);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn decay_can_reorder_candidates() {
        let boxes = vec![
            BBox::new(0.0, 0.0, 10.0, 10.0, 0.9, 0),
            BBox::new(0.5, 0.5, 10.5, 10.5, 0.85, 1),
            BBox::new(30.0, 30.0, 40.0, 40.0, 0.6, 2),
        ];
        let kept = soft_nms(&boxes, 0.3, 0.5, 0.05);
        let classes: Vec<i32> = kept.iter().map(|b| b.class_id).collect();
        assert_eq!(classes, vec![0, 2, 1]);
    }
}
