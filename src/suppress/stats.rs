use crate::geometry::BBox;
use std::collections::BTreeMap;
use std::time::Duration;

/// Counts and timing for one or more suppression calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuppressionStats {
    /// Boxes handed to the call.
    pub input_boxes: usize,
    /// Boxes returned.
    pub output_boxes: usize,
    /// Boxes filtered, suppressed or truncated away.
    pub suppressed_boxes: usize,
    /// Output count per class id.
    pub boxes_per_class: BTreeMap<i32, usize>,
    /// Wall-clock time spent inside suppression.
    pub elapsed: Duration,
}

impl SuppressionStats {
    pub(crate) fn from_call(input_boxes: usize, kept: &[BBox], elapsed: Duration) -> Self {
        let mut boxes_per_class = BTreeMap::new();
        for bbox in kept {
            *boxes_per_class.entry(bbox.class_id).or_insert(0) += 1;
        }
        Self {
            input_boxes,
            output_boxes: kept.len(),
            suppressed_boxes: input_boxes - kept.len(),
            boxes_per_class,
            elapsed,
        }
    }

    /// Elapsed time in milliseconds.
    pub fn processing_time_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e3
    }

    /// Adds the counts and time of `other` into `self`.
    pub fn merge(&mut self, other: &SuppressionStats) {
        self.input_boxes += other.input_boxes;
        self.output_boxes += other.output_boxes;
        self.suppressed_boxes += other.suppressed_boxes;
        for (&class_id, &count) in &other.boxes_per_class {
            *self.boxes_per_class.entry(class_id).or_insert(0) += count;
        }
        self.elapsed += other.elapsed;
    }
}
