//! Pairwise box geometry: overlap, merging and distance.

use crate::geometry::BBox;

// Areas are accumulated in f64: corners of large but finite boxes would
// overflow an f32 product.

/// Area of a box in `f64`, 0 for an invalid box.
pub(crate) fn area_f64(b: &BBox) -> f64 {
    if b.is_valid() {
        (f64::from(b.x2) - f64::from(b.x1)) * (f64::from(b.y2) - f64::from(b.y1))
    } else {
        0.0
    }
}

fn intersection_f64(a: &BBox, b: &BBox) -> f64 {
    let w = (f64::from(a.x2.min(b.x2)) - f64::from(a.x1.max(b.x1))).max(0.0);
    let h = (f64::from(a.y2.min(b.y2)) - f64::from(a.y1.max(b.y1))).max(0.0);
    w * h
}

/// Narrows `inter / union` to `f32`, 0 when the union is empty.
pub(crate) fn overlap_ratio(inter: f64, union: f64) -> f32 {
    if union <= 0.0 {
        return 0.0;
    }
    let ratio = (inter / union) as f32;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Overlap area of two boxes, clamped to zero when they do not intersect.
pub fn intersection_area(a: &BBox, b: &BBox) -> f32 {
    intersection_f64(a, b) as f32
}

/// Area covered by either box.
pub fn union_area(a: &BBox, b: &BBox) -> f32 {
    (area_f64(a) + area_f64(b) - intersection_f64(a, b)) as f32
}

/// Intersection over union in `[0, 1]`.
///
/// Returns 0 when the union is empty or either box is invalid.
pub fn iou(a: &BBox, b: &BBox) -> f32 {
    if !a.is_valid() || !b.is_valid() {
        return 0.0;
    }
    let inter = intersection_f64(a, b);
    overlap_ratio(inter, area_f64(a) + area_f64(b) - inter)
}

/// Returns true when `iou(a, b) >= threshold`.
///
/// The boundary is inclusive: a pair exactly at the threshold overlaps.
pub fn is_overlapping(a: &BBox, b: &BBox, threshold: f32) -> bool {
    iou(a, b) >= threshold
}

/// Smallest box enclosing both inputs.
///
/// Confidence is the maximum of the two; class id and label come from the
/// more confident input, with ties going to `a`.
pub fn merge(a: &BBox, b: &BBox) -> BBox {
    let winner = if b.confidence > a.confidence { b } else { a };
    BBox {
        x1: a.x1.min(b.x1),
        y1: a.y1.min(b.y1),
        x2: a.x2.max(b.x2),
        y2: a.y2.max(b.y2),
        confidence: a.confidence.max(b.confidence),
        class_id: winner.class_id,
        label: winner.label.clone(),
    }
}

/// Euclidean distance between box centers.
pub fn center_distance(a: &BBox, b: &BBox) -> f32 {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    (ax - bx).hypot(ay - by)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_boxes_keep_a_finite_ratio() {
        let a = BBox::new(0.0, 0.0, 3e19, 3e19, 0.9, 0);
        let b = BBox::new(1e19, 1e19, 3.2e19, 3.2e19, 0.8, 0);
        assert_eq!(iou(&a, &a), 1.0);
        let ab = iou(&a, &b);
        assert!((ab - 4.0 / 9.84).abs() < 1e-5, "{ab}");
        assert_eq!(ab, iou(&b, &a));
    }

    #[test]
    fn disjoint_boxes_have_zero_intersection() {
        let a = BBox::new(0.0, 0.0, 5.0, 5.0, 0.9, 0);
        let b = BBox::new(10.0, 10.0, 15.0, 15.0, 0.9, 0);
        assert_eq!(intersection_area(&a, &b), 0.0);
        assert_eq!(union_area(&a, &b), 50.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = BBox::new(0.0, 0.0, 5.0, 5.0, 0.9, 0);
        let b = BBox::new(5.0, 0.0, 10.0, 5.0, 0.9, 0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn merge_tie_keeps_first_class() {
        let a = BBox::new(0.0, 0.0, 5.0, 5.0, 0.5, 1).with_label("first");
        let b = BBox::new(2.0, 2.0, 9.0, 9.0, 0.5, 2);
        let m = merge(&a, &b);
        assert_eq!(m.class_id, 1);
        assert_eq!(m.label.as_deref(), Some("first"));
        assert_eq!((m.x1, m.y1, m.x2, m.y2), (0.0, 0.0, 9.0, 9.0));
    }

    #[test]
    fn center_distance_is_euclidean() {
        let a = BBox::new(0.0, 0.0, 2.0, 2.0, 0.5, 0);
        let b = BBox::new(3.0, 4.0, 5.0, 6.0, 0.5, 0);
        assert!((center_distance(&a, &b) - 5.0).abs() < 1e-6);
    }
}
