//! Deterministic box orderings.

use crate::geometry::BBox;
use std::cmp::Ordering;

fn confidence_cmp_desc(a: &BBox, b: &BBox) -> Ordering {
    b.confidence.total_cmp(&a.confidence)
}

/// Sorts boxes by descending confidence.
///
/// The sort is stable: boxes with equal confidence keep their input order, which
/// makes every greedy strategy reproducible.
pub fn sort_by_confidence(boxes: &mut [BBox]) {
    boxes.sort_by(confidence_cmp_desc);
}

/// Sorts boxes by descending area, keeping input order on ties.
pub fn sort_by_area(boxes: &mut [BBox]) {
    boxes.sort_by(|a, b| b.area().total_cmp(&a.area()));
}
