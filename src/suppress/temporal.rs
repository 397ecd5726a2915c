//! Cross-frame blending for video streams.
//!
//! No frame history is kept here: callers pass the previous frame's accepted
//! boxes on every call.

use crate::geometry::BBox;
use crate::kernel::{DefaultIou, IouKernel};
use crate::suppress::greedy::standard_nms;
use crate::util::math::{is_unit_interval, lerp};
use crate::util::{DetNmsError, DetNmsResult};

pub(crate) fn validate_weight(temporal_weight: f32) -> DetNmsResult<()> {
    if is_unit_interval(temporal_weight) {
        Ok(())
    } else {
        Err(DetNmsError::InvalidTemporalWeight {
            value: temporal_weight,
        })
    }
}

/// Blends each current box with its best previous-frame match.
///
/// The match is the previous box with the highest IoU (first on ties). If that
/// IoU exceeds `iou_threshold`, each corner becomes
/// `temporal_weight * current + (1 - temporal_weight) * previous`; score, class
/// and label stay those of the current box. Returns the blended boxes and how
/// many of them were matched.
pub fn blend_with_previous(
    current: &[BBox],
    previous: &[BBox],
    iou_threshold: f32,
    temporal_weight: f32,
) -> (Vec<BBox>, usize) {
    let mut matched = 0usize;
    let mut ious = Vec::with_capacity(previous.len());
    let blended = current
        .iter()
        .map(|cur| {
            DefaultIou::iou_row_into(cur, previous, &mut ious);
            let mut best: Option<(usize, f32)> = None;
            for (idx, &iou) in ious.iter().enumerate() {
                if best.map_or(true, |(_, best_iou)| iou > best_iou) {
                    best = Some((idx, iou));
                }
            }
            match best {
                Some((idx, iou)) if iou > iou_threshold => {
                    matched += 1;
                    let prev = &previous[idx];
                    cur.with_corners(
                        lerp(cur.x1, prev.x1, temporal_weight),
                        lerp(cur.y1, prev.y1, temporal_weight),
                        lerp(cur.x2, prev.x2, temporal_weight),
                        lerp(cur.y2, prev.y2, temporal_weight),
                    )
                }
                _ => cur.clone(),
            }
        })
        .collect();
    (blended, matched)
}

/// Temporal non-maximum suppression over two frames.
///
/// Blends `current` against `previous` with [`blend_with_previous`] and runs
/// [`standard_nms`] on the result with the same `iou_threshold`.
pub fn temporal_nms(
    current: &[BBox],
    previous: &[BBox],
    iou_threshold: f32,
    temporal_weight: f32,
) -> DetNmsResult<Vec<BBox>> {
    if !is_unit_interval(iou_threshold) {
        return Err(DetNmsError::InvalidThreshold {
            name: "iou_threshold",
            value: iou_threshold,
        });
    }
    validate_weight(temporal_weight)?;
    let (blended, _) = blend_with_previous(current, previous, iou_threshold, temporal_weight);
    Ok(standard_nms(&blended, iou_threshold))
}
