//! Class-grouping conveniences over [`standard_nms`].
//!
//! These skip the confidence/validity filter and the output cap of the full
//! pipeline; use [`crate::suppress::suppress`] when those are wanted.

use crate::candidate::filter::group_by_class;
use crate::candidate::order::sort_by_confidence;
use crate::geometry::BBox;
use crate::suppress::greedy::standard_nms;
use std::collections::BTreeMap;

/// Standard suppression across all classes at once.
pub fn class_agnostic_nms(boxes: &[BBox], iou_threshold: f32) -> Vec<BBox> {
    standard_nms(boxes, iou_threshold)
}

/// Standard suppression inside each class, merged by confidence.
pub fn per_class_nms(boxes: &[BBox], iou_threshold: f32) -> Vec<BBox> {
    class_specific_nms(boxes, &BTreeMap::new(), iou_threshold)
}

/// Standard suppression inside each class with per-class thresholds.
///
/// Classes missing from `thresholds` use `default_threshold`.
pub fn class_specific_nms(
    boxes: &[BBox],
    thresholds: &BTreeMap<i32, f32>,
    default_threshold: f32,
) -> Vec<BBox> {
    let mut kept = Vec::with_capacity(boxes.len());
    for (class_id, group) in group_by_class(boxes.to_vec()) {
        let threshold = thresholds
            .get(&class_id)
            .copied()
            .unwrap_or(default_threshold);
        kept.extend(standard_nms(&group, threshold));
    }
    sort_by_confidence(&mut kept);
    kept
}
