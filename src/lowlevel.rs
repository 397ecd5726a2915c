//! Low-level building blocks for custom post-processing pipelines.
//!
//! These expose the individual strategies, IoU kernels and candidate utilities
//! without the filter/group/truncate pipeline. Most users should prefer
//! [`crate::suppress::suppress`] or [`crate::Suppressor`].

pub use crate::candidate::filter::{
    filter_by_area, filter_by_class, filter_by_confidence, group_by_class,
};
pub use crate::candidate::order::{sort_by_area, sort_by_confidence};
pub use crate::kernel::scalar::IouScalar;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::IouSimd;
pub use crate::kernel::{iou_row, IouKernel};
pub use crate::suppress::{
    adaptive_nms, blend_with_previous, class_agnostic_nms, class_specific_nms, per_class_nms,
    soft_nms, standard_nms, temporal_nms, weighted_nms,
};
