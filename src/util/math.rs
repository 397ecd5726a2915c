//! Numeric helpers shared by the suppression strategies.

/// Gaussian soft suppression decay factor `exp(-iou^2 / sigma)`.
#[inline]
pub(crate) fn gaussian_decay(iou: f32, sigma: f32) -> f32 {
    (-(iou * iou) / sigma).exp()
}

/// Linear blend `weight * a + (1 - weight) * b`.
#[inline]
pub(crate) fn lerp(a: f32, b: f32, weight: f32) -> f32 {
    weight * a + (1.0 - weight) * b
}

/// Returns true when `value` is finite and lies in `[0, 1]`.
#[inline]
pub(crate) fn is_unit_interval(value: f32) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
