//! Instrumentation hooks for the suppression pipeline.
//!
//! `pipeline::run` opens one `suppress` span per call and records
//! `temporal_blend`, `group_done` and `suppression_done` events with box
//! counts. With the `tracing` feature these become info-level `tracing` spans
//! and events; without it spans are `NoopSpan` and events only evaluate their
//! count expressions.

/// Opens the span that covers one suppression call.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Records a pipeline milestone with `key = count` fields.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Span guard used when suppression runs uninstrumented.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Keeps `trace_span!(..).entered()` valid at the suppression call site.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
