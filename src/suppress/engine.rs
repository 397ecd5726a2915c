use crate::geometry::BBox;
use crate::suppress::config::SuppressionConfig;
use crate::suppress::pipeline::{self, PreviousFrame};
use crate::suppress::stats::SuppressionStats;
use crate::suppress::temporal::validate_weight;
use crate::util::DetNmsResult;

/// Long-lived suppression engine for a stream of frames.
///
/// Holds a validated configuration and the statistics of the most recent call
/// (or the running total when accumulating). Calls take `&mut self`, so one
/// instance serves one worker; give each thread its own `Suppressor` or wrap a
/// shared one in a mutex.
#[derive(Debug, Default)]
pub struct Suppressor {
    config: SuppressionConfig,
    stats: SuppressionStats,
}

impl Suppressor {
    /// Creates an engine after validating `config`.
    pub fn new(config: SuppressionConfig) -> DetNmsResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stats: SuppressionStats::default(),
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SuppressionConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// On error the previous configuration stays in effect.
    pub fn set_config(&mut self, config: SuppressionConfig) -> DetNmsResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Suppresses one frame, overwriting the statistics.
    pub fn suppress(&mut self, boxes: &[BBox]) -> Vec<BBox> {
        let result = pipeline::run(boxes, &self.config, None);
        self.stats = result.stats;
        result.boxes
    }

    /// Suppresses one frame, adding its statistics to the running total.
    pub fn suppress_accumulate(&mut self, boxes: &[BBox]) -> Vec<BBox> {
        let result = pipeline::run(boxes, &self.config, None);
        self.stats.merge(&result.stats);
        result.boxes
    }

    /// Temporal suppression against the caller-supplied previous frame.
    ///
    /// Fails only for a `temporal_weight` outside `[0, 1]`, in which case the
    /// statistics are left untouched.
    pub fn suppress_temporal(
        &mut self,
        current: &[BBox],
        previous: &[BBox],
        temporal_weight: f32,
    ) -> DetNmsResult<Vec<BBox>> {
        validate_weight(temporal_weight)?;
        let result = pipeline::run(
            current,
            &self.config,
            Some(PreviousFrame {
                boxes: previous,
                temporal_weight,
            }),
        );
        self.stats = result.stats;
        Ok(result.boxes)
    }

    /// Returns the statistics of the last call or the accumulated total.
    pub fn stats(&self) -> &SuppressionStats {
        &self.stats
    }

    /// Clears the statistics.
    pub fn reset_stats(&mut self) {
        self.stats = SuppressionStats::default();
    }
}
