//! Order-preserving predicate filters and class grouping.

use crate::geometry::BBox;

/// Keeps boxes with `confidence >= threshold`; NaN scores are dropped.
pub fn filter_by_confidence(boxes: &[BBox], threshold: f32) -> Vec<BBox> {
    boxes
        .iter()
        .filter(|b| b.confidence >= threshold)
        .cloned()
        .collect()
}

/// Keeps boxes whose area lies in `[min_area, max_area]`.
pub fn filter_by_area(boxes: &[BBox], min_area: f32, max_area: f32) -> Vec<BBox> {
    boxes
        .iter()
        .filter(|b| {
            let area = b.area();
            area >= min_area && area <= max_area
        })
        .cloned()
        .collect()
}

/// Keeps boxes of a single class.
pub fn filter_by_class(boxes: &[BBox], class_id: i32) -> Vec<BBox> {
    boxes
        .iter()
        .filter(|b| b.class_id == class_id)
        .cloned()
        .collect()
}

/// Partitions boxes by class id.
///
/// Groups appear in order of the first box of each class, and boxes keep their
/// relative order inside a group.
pub fn group_by_class(boxes: Vec<BBox>) -> Vec<(i32, Vec<BBox>)> {
    let mut groups: Vec<(i32, Vec<BBox>)> = Vec::new();
    for bbox in boxes {
        match groups.iter_mut().find(|(class_id, _)| *class_id == bbox.class_id) {
            Some((_, group)) => group.push(bbox),
            None => groups.push((bbox.class_id, vec![bbox])),
        }
    }
    groups
}
