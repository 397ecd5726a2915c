//! detnms is a post-processing library for object detectors.
//!
//! It provides exact axis-aligned box geometry and a family of non-maximum
//! suppression strategies (standard, soft, weighted, density-adaptive and
//! temporal) that turn an overlap-heavy set of raw detections into a
//! deduplicated, confidence-ranked, bounded result. Optional features add
//! rayon-parallel class groups, SIMD IoU rows and image-header frame sizes.

mod candidate;
pub mod geometry;
#[cfg(feature = "image-io")]
pub mod io;
pub mod kernel;
pub mod lowlevel;
pub mod suppress;
mod trace;
pub mod util;

pub use candidate::filter::{filter_by_area, filter_by_class, filter_by_confidence, group_by_class};
pub use candidate::order::{sort_by_area, sort_by_confidence};
pub use geometry::ops::{center_distance, intersection_area, iou, is_overlapping, merge, union_area};
pub use geometry::transform::{absolute_to_relative, relative_to_absolute, rescale, transform_affine};
pub use geometry::{BBox, FrameSize};
pub use kernel::iou_row;
pub use suppress::{
    suppress, suppress_temporal, Strategy, Suppression, SuppressionConfig, SuppressionStats,
    Suppressor,
};
pub use util::{DetNmsError, DetNmsResult};
