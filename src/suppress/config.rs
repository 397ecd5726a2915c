use crate::util::math::is_unit_interval;
use crate::util::{DetNmsError, DetNmsResult};
use std::collections::BTreeMap;

/// Suppression strategy applied to each class group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Greedy: keep the best box, delete everything overlapping it.
    #[default]
    Standard,
    /// Gaussian score decay instead of deletion.
    Soft,
    /// Greedy with confidence-weighted coordinate averaging of each cluster.
    Weighted,
    /// Greedy with a threshold raised in dense neighborhoods.
    Adaptive,
}

impl Strategy {
    /// Lowercase name used in logs and configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Standard => "standard",
            Strategy::Soft => "soft",
            Strategy::Weighted => "weighted",
            Strategy::Adaptive => "adaptive",
        }
    }
}

/// Configuration for suppression calls.
#[derive(Clone, Debug, PartialEq)]
pub struct SuppressionConfig {
    /// IoU at or above which a lower-scored box overlaps a pick.
    pub iou_threshold: f32,
    /// Boxes scoring below this are dropped before and during suppression.
    pub confidence_threshold: f32,
    /// Strategy run on every group.
    pub strategy: Strategy,
    /// Treat all classes as one group.
    pub class_agnostic: bool,
    /// Gaussian sigma for [`Strategy::Soft`].
    pub soft_sigma: f32,
    /// Output cap; 0 means unbounded.
    pub max_detections: usize,
    /// Base threshold (and density radius) for [`Strategy::Adaptive`].
    pub adaptive_base_threshold: f32,
    /// Per-class IoU threshold overrides.
    pub per_class_thresholds: BTreeMap<i32, f32>,
    /// Suppress class groups on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.45,
            confidence_threshold: 0.5,
            strategy: Strategy::Standard,
            class_agnostic: false,
            soft_sigma: 0.5,
            max_detections: 300,
            adaptive_base_threshold: 0.5,
            per_class_thresholds: BTreeMap::new(),
            parallel: false,
        }
    }
}

impl SuppressionConfig {
    /// Validates every field, returning the first violation.
    pub fn validate(&self) -> DetNmsResult<()> {
        let unit_fields = [
            ("iou_threshold", self.iou_threshold),
            ("confidence_threshold", self.confidence_threshold),
            ("adaptive_base_threshold", self.adaptive_base_threshold),
        ];
        for (name, value) in unit_fields {
            if !is_unit_interval(value) {
                return Err(DetNmsError::InvalidThreshold { name, value });
            }
        }
        if !(self.soft_sigma.is_finite() && self.soft_sigma > 0.0) {
            return Err(DetNmsError::InvalidSigma {
                value: self.soft_sigma,
            });
        }
        for (&class_id, &value) in &self.per_class_thresholds {
            if !is_unit_interval(value) {
                return Err(DetNmsError::InvalidClassThreshold { class_id, value });
            }
        }
        Ok(())
    }

    /// IoU threshold for `class_id`, honoring per-class overrides.
    pub fn threshold_for(&self, class_id: i32) -> f32 {
        self.per_class_thresholds
            .get(&class_id)
            .copied()
            .unwrap_or(self.iou_threshold)
    }
}
