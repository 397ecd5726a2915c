//! Filter, group, suppress, merge and truncate.

use crate::candidate::filter::group_by_class;
use crate::candidate::order::sort_by_confidence;
use crate::geometry::BBox;
use crate::suppress::config::{Strategy, SuppressionConfig};
use crate::suppress::greedy::{adaptive_nms, standard_nms, weighted_nms};
use crate::suppress::soft::soft_nms;
use crate::suppress::stats::SuppressionStats;
use crate::suppress::temporal::blend_with_previous;
use crate::suppress::Suppression;
use crate::trace::{trace_event, trace_span};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::time::Instant;

/// Previous-frame input for temporal suppression.
pub(crate) struct PreviousFrame<'a> {
    pub(crate) boxes: &'a [BBox],
    pub(crate) temporal_weight: f32,
}

/// A class group; `class_id` is `None` for class-agnostic runs.
struct Group {
    class_id: Option<i32>,
    boxes: Vec<BBox>,
}

/// Runs the full pipeline. `cfg` must already be validated.
pub(crate) fn run(
    boxes: &[BBox],
    cfg: &SuppressionConfig,
    previous: Option<PreviousFrame<'_>>,
) -> Suppression {
    let start = Instant::now();
    // Temporal runs always finish with Standard suppression.
    let strategy = match previous {
        Some(_) => Strategy::Standard,
        None => cfg.strategy,
    };
    let _span = trace_span!(
        "suppress",
        input = boxes.len(),
        strategy = strategy.name(),
        class_agnostic = cfg.class_agnostic
    )
    .entered();

    let mut candidates: Vec<BBox> = boxes
        .iter()
        .filter(|b| b.is_valid() && b.confidence >= cfg.confidence_threshold)
        .cloned()
        .collect();

    if let Some(prev) = previous {
        let (blended, matched) = blend_with_previous(
            &candidates,
            prev.boxes,
            cfg.iou_threshold,
            prev.temporal_weight,
        );
        trace_event!("temporal_blend", matched = matched);
        candidates = blended;
    }

    let groups = if cfg.class_agnostic {
        vec![Group {
            class_id: None,
            boxes: candidates,
        }]
    } else {
        group_by_class(candidates)
            .into_iter()
            .map(|(class_id, boxes)| Group {
                class_id: Some(class_id),
                boxes,
            })
            .collect()
    };

    let results = suppress_groups(&groups, cfg, strategy);

    let mut kept: Vec<BBox> = results.into_iter().flatten().collect();
    sort_by_confidence(&mut kept);
    if cfg.max_detections > 0 && kept.len() > cfg.max_detections {
        kept.truncate(cfg.max_detections);
    }

    let stats = SuppressionStats::from_call(boxes.len(), &kept, start.elapsed());
    trace_event!(
        "suppression_done",
        output = stats.output_boxes,
        suppressed = stats.suppressed_boxes
    );
    Suppression { boxes: kept, stats }
}

#[cfg(feature = "rayon")]
fn suppress_groups(groups: &[Group], cfg: &SuppressionConfig, strategy: Strategy) -> Vec<Vec<BBox>> {
    if cfg.parallel {
        groups
            .par_iter()
            .map(|group| suppress_group(group, cfg, strategy))
            .collect()
    } else {
        groups
            .iter()
            .map(|group| suppress_group(group, cfg, strategy))
            .collect()
    }
}

#[cfg(not(feature = "rayon"))]
fn suppress_groups(groups: &[Group], cfg: &SuppressionConfig, strategy: Strategy) -> Vec<Vec<BBox>> {
    groups
        .iter()
        .map(|group| suppress_group(group, cfg, strategy))
        .collect()
}

fn suppress_group(group: &Group, cfg: &SuppressionConfig, strategy: Strategy) -> Vec<BBox> {
    let override_threshold = group
        .class_id
        .and_then(|class_id| cfg.per_class_thresholds.get(&class_id).copied());
    let iou_threshold = override_threshold.unwrap_or(cfg.iou_threshold);

    let kept = match strategy {
        Strategy::Standard => standard_nms(&group.boxes, iou_threshold),
        Strategy::Soft => soft_nms(
            &group.boxes,
            iou_threshold,
            cfg.soft_sigma,
            cfg.confidence_threshold,
        ),
        Strategy::Weighted => weighted_nms(&group.boxes, iou_threshold),
        Strategy::Adaptive => adaptive_nms(
            &group.boxes,
            override_threshold.unwrap_or(cfg.adaptive_base_threshold),
        ),
    };

    trace_event!(
        "group_done",
        class_id = group.class_id.unwrap_or(-1),
        input = group.boxes.len(),
        kept = kept.len()
    );
    kept
}
