//! Non-maximum suppression strategies and the suppression engine.
//!
//! `suppress` is the pure entry point: it validates a configuration, runs the
//! filter/group/strategy/truncate pipeline and returns the kept boxes together
//! with the statistics of that call. `Suppressor` wraps the same pipeline for
//! long-lived use across frames and owns its configuration and statistics.

mod classes;
mod config;
mod engine;
mod greedy;
mod pipeline;
mod soft;
mod stats;
mod temporal;

pub use classes::{class_agnostic_nms, class_specific_nms, per_class_nms};
pub use config::{Strategy, SuppressionConfig};
pub use engine::Suppressor;
pub use greedy::{adaptive_nms, standard_nms, weighted_nms};
pub use soft::soft_nms;
pub use stats::SuppressionStats;
pub use temporal::{blend_with_previous, temporal_nms};

use crate::geometry::BBox;
use crate::util::DetNmsResult;

/// Kept boxes of one suppression call and the statistics describing it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Suppression {
    /// Kept boxes, confidence-descending, at most `max_detections` long.
    pub boxes: Vec<BBox>,
    /// Counts and timing for this call.
    pub stats: SuppressionStats,
}

/// Runs the configured strategy over `boxes`.
///
/// Invalid boxes and boxes below `confidence_threshold` are dropped and counted
/// as suppressed. Fails only when `config` does not validate.
pub fn suppress(boxes: &[BBox], config: &SuppressionConfig) -> DetNmsResult<Suppression> {
    config.validate()?;
    Ok(pipeline::run(boxes, config, None))
}

/// Blends `current` with the previous frame's boxes, then runs Standard
/// suppression on the blended set.
///
/// Matching uses `config.iou_threshold`; the configured strategy is ignored.
pub fn suppress_temporal(
    current: &[BBox],
    previous: &[BBox],
    config: &SuppressionConfig,
    temporal_weight: f32,
) -> DetNmsResult<Suppression> {
    config.validate()?;
    temporal::validate_weight(temporal_weight)?;
    Ok(pipeline::run(
        current,
        config,
        Some(pipeline::PreviousFrame {
            boxes: previous,
            temporal_weight,
        }),
    ))
}
