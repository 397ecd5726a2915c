//! Greedy pick-and-eliminate strategies.
//!
//! All three strategies sort the group by confidence, repeatedly take the best
//! remaining box and compare it against the rest with one IoU row. They differ
//! in what happens to the overlapping set.

use crate::candidate::order::sort_by_confidence;
use crate::geometry::BBox;
use crate::kernel::{DefaultIou, IouKernel};

/// Drops every box whose IoU with the pick is at or above `threshold`.
fn retain_below(remaining: Vec<BBox>, ious: &[f32], threshold: f32) -> Vec<BBox> {
    remaining
        .into_iter()
        .zip(ious)
        .filter(|(_, &iou)| iou < threshold)
        .map(|(bbox, _)| bbox)
        .collect()
}

/// Standard greedy non-maximum suppression.
///
/// Keeps the highest-confidence box, removes all remaining boxes with
/// `iou >= iou_threshold` against it, and repeats until the group is empty.
pub fn standard_nms(boxes: &[BBox], iou_threshold: f32) -> Vec<BBox> {
    let mut remaining = boxes.to_vec();
    sort_by_confidence(&mut remaining);

    let mut kept = Vec::new();
    let mut ious = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let pick = remaining.remove(0);
        DefaultIou::iou_row_into(&pick, &remaining, &mut ious);
        remaining = retain_below(remaining, &ious, iou_threshold);
        kept.push(pick);
    }
    kept
}

/// Weighted non-maximum suppression.
///
/// Like [`standard_nms`], but the kept box's corners become the
/// confidence-weighted mean of itself and every box it suppresses. Score,
/// class and label of the pick are unchanged.
pub fn weighted_nms(boxes: &[BBox], iou_threshold: f32) -> Vec<BBox> {
    let mut remaining = boxes.to_vec();
    sort_by_confidence(&mut remaining);

    let mut kept = Vec::new();
    let mut ious = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let pick = remaining.remove(0);
        DefaultIou::iou_row_into(&pick, &remaining, &mut ious);

        let cluster: Vec<&BBox> = remaining
            .iter()
            .zip(&ious)
            .filter(|(_, &iou)| iou >= iou_threshold)
            .map(|(bbox, _)| bbox)
            .collect();

        let merged = if cluster.is_empty() {
            pick
        } else {
            weighted_corners(&pick, &cluster)
        };
        remaining = retain_below(remaining, &ious, iou_threshold);
        kept.push(merged);
    }
    kept
}

fn weighted_corners(pick: &BBox, cluster: &[&BBox]) -> BBox {
    let mut total = pick.confidence;
    let mut acc = [
        pick.confidence * pick.x1,
        pick.confidence * pick.y1,
        pick.confidence * pick.x2,
        pick.confidence * pick.y2,
    ];
    for bbox in cluster {
        let w = bbox.confidence;
        total += w;
        acc[0] += w * bbox.x1;
        acc[1] += w * bbox.y1;
        acc[2] += w * bbox.x2;
        acc[3] += w * bbox.y2;
    }
    if total <= 0.0 {
        return pick.clone();
    }
    pick.with_corners(acc[0] / total, acc[1] / total, acc[2] / total, acc[3] / total)
}

/// Density-adaptive non-maximum suppression.
///
/// For each pick, `density` is the fraction of remaining boxes with
/// `iou >= base_threshold` against it, and overlapping boxes are removed at
/// `base_threshold + (1 - base_threshold) * density`. Crowded picks therefore
/// tolerate more overlap before eliminating a neighbor.
pub fn adaptive_nms(boxes: &[BBox], base_threshold: f32) -> Vec<BBox> {
    let mut remaining = boxes.to_vec();
    sort_by_confidence(&mut remaining);

    let mut kept = Vec::new();
    let mut ious = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let pick = remaining.remove(0);
        DefaultIou::iou_row_into(&pick, &remaining, &mut ious);

        let density = if ious.is_empty() {
            0.0
        } else {
            let near = ious.iter().filter(|&&iou| iou >= base_threshold).count();
            near as f32 / ious.len() as f32
        };
        let effective = base_threshold + (1.0 - base_threshold) * density;

        remaining = retain_below(remaining, &ious, effective);
        kept.push(pick);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Vec<BBox> {
        vec![
            BBox::new(0.0, 0.0, 10.0, 10.0, 0.9, 0),
            BBox::new(1.0, 1.0, 11.0, 11.0, 0.8, 0),
        ]
    }

    #[test]
    fn standard_keeps_best_of_overlapping_pair() {
        let kept = standard_nms(&pair(), 0.5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].confidence, 0.9);

        let kept = standard_nms(&pair(), 0.7);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn weighted_pulls_corners_toward_cluster() {
        let kept = weighted_nms(&pair(), 0.5);
        assert_eq!(kept.len(), 1);
        let expected = 0.8 / 1.7;
        assert!((kept[0].x1 - expected).abs() < 1e-5);
        assert!((kept[0].x2 - (10.0 + expected)).abs() < 1e-5);
        assert_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn single_box_passes_through_every_greedy_strategy() {
        let one = vec![BBox::new(1.5, 2.5, 7.25, 9.75, 0.61, 3)];
        assert_eq!(standard_nms(&one, 0.5), one);
        assert_eq!(weighted_nms(&one, 0.5), one);
        assert_eq!(adaptive_nms(&one, 0.5), one);
    }

    #[test]
    fn adaptive_raises_threshold_in_crowds() {
        // Pick overlaps both neighbors at ~0.68; density is 1.0, so the
        // effective threshold becomes 1.0 and nothing is removed.
        let boxes = vec![
            BBox::new(0.0, 0.0, 10.0, 10.0, 0.9, 0),
            BBox::new(1.0, 1.0, 11.0, 11.0, 0.8, 0),
            BBox::new(-1.0, -1.0, 9.0, 9.0, 0.7, 0),
        ];
        assert_eq!(adaptive_nms(&boxes, 0.5).len(), 3);
        assert_eq!(standard_nms(&boxes, 0.5).len(), 1);
    }
}
