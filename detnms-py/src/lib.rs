//! Python bindings for the detnms suppression library.
//!
//! Exposes boxes, the suppression configuration and a stateful `Suppressor`
//! engine to Python via PyO3, plus a numpy entry point for raw detector output.

use std::collections::BTreeMap;

use numpy::{PyReadonlyArray1, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use detnms::{
    BBox as RustBBox, DetNmsError, Strategy as RustStrategy, SuppressionConfig as RustConfig,
    Suppressor as RustSuppressor,
};

/// Convert a DetNmsError to a Python exception.
fn to_py_err(err: DetNmsError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_strategy(name: &str) -> PyResult<RustStrategy> {
    match name.to_lowercase().as_str() {
        "standard" => Ok(RustStrategy::Standard),
        "soft" => Ok(RustStrategy::Soft),
        "weighted" => Ok(RustStrategy::Weighted),
        "adaptive" => Ok(RustStrategy::Adaptive),
        _ => Err(PyValueError::new_err(
            "nms_type must be 'standard', 'soft', 'weighted' or 'adaptive'",
        )),
    }
}

/// Detection box in corner form.
#[pyclass]
#[derive(Clone)]
pub struct BBox {
    inner: RustBBox,
}

#[pymethods]
impl BBox {
    /// Create a box from its corners.
    ///
    /// Args:
    ///     x1, y1, x2, y2: Corner coordinates
    ///     confidence: Detector score (default: 0.0)
    ///     class_id: Object category (default: 0)
    ///     label: Optional display label
    #[new]
    #[pyo3(signature = (x1, y1, x2, y2, confidence = 0.0, class_id = 0, label = None))]
    fn new(
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        confidence: f32,
        class_id: i32,
        label: Option<String>,
    ) -> Self {
        let mut inner = RustBBox::new(x1, y1, x2, y2, confidence, class_id);
        inner.label = label;
        Self { inner }
    }

    #[getter]
    fn x1(&self) -> f32 {
        self.inner.x1
    }

    #[getter]
    fn y1(&self) -> f32 {
        self.inner.y1
    }

    #[getter]
    fn x2(&self) -> f32 {
        self.inner.x2
    }

    #[getter]
    fn y2(&self) -> f32 {
        self.inner.y2
    }

    #[getter]
    fn confidence(&self) -> f32 {
        self.inner.confidence
    }

    #[getter]
    fn class_id(&self) -> i32 {
        self.inner.class_id
    }

    #[getter]
    fn label(&self) -> Option<String> {
        self.inner.label.clone()
    }

    fn width(&self) -> f32 {
        self.inner.width()
    }

    fn height(&self) -> f32 {
        self.inner.height()
    }

    fn area(&self) -> f32 {
        self.inner.area()
    }

    fn center(&self) -> (f32, f32) {
        self.inner.center()
    }

    fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }

    /// Intersection over union with another box.
    fn iou(&self, other: PyRef<'_, BBox>) -> f32 {
        self.inner.iou(&other.inner)
    }

    fn scale(&self, scale_x: f32, scale_y: f32) -> Self {
        Self {
            inner: self.inner.scale(scale_x, scale_y),
        }
    }

    fn translate(&self, offset_x: f32, offset_y: f32) -> Self {
        Self {
            inner: self.inner.translate(offset_x, offset_y),
        }
    }

    fn clip(&self, img_width: f32, img_height: f32) -> Self {
        Self {
            inner: self.inner.clip(img_width, img_height),
        }
    }

    fn to_relative(&self, img_width: f32, img_height: f32) -> Self {
        Self {
            inner: self.inner.to_relative(img_width, img_height),
        }
    }

    fn to_absolute(&self, img_width: f32, img_height: f32) -> Self {
        Self {
            inner: self.inner.to_absolute(img_width, img_height),
        }
    }

    fn __repr__(&self) -> String {
        let b = &self.inner;
        format!(
            "BBox(x1={:.2}, y1={:.2}, x2={:.2}, y2={:.2}, confidence={:.4}, class_id={})",
            b.x1, b.y1, b.x2, b.y2, b.confidence, b.class_id
        )
    }
}

/// Configuration for suppression.
#[pyclass]
#[derive(Clone)]
pub struct NmsConfig {
    inner: RustConfig,
}

#[pymethods]
impl NmsConfig {
    /// Create a new NmsConfig.
    ///
    /// Args:
    ///     iou_threshold: Overlap threshold (default: 0.45)
    ///     confidence_threshold: Minimum score (default: 0.5)
    ///     nms_type: "standard", "soft", "weighted" or "adaptive" (default: "standard")
    ///     class_agnostic: Ignore class ids (default: False)
    ///     soft_nms_sigma: Gaussian sigma for soft suppression (default: 0.5)
    ///     max_detections: Output cap, 0 for unbounded (default: 300)
    ///     adaptive_threshold: Base threshold for adaptive suppression (default: 0.5)
    ///     class_thresholds: Optional dict of class id to IoU threshold
    ///     parallel: Suppress class groups in parallel (default: False)
    #[new]
    #[pyo3(signature = (
        iou_threshold = 0.45,
        confidence_threshold = 0.5,
        nms_type = "standard",
        class_agnostic = false,
        soft_nms_sigma = 0.5,
        max_detections = 300,
        adaptive_threshold = 0.5,
        class_thresholds = None,
        parallel = false
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        iou_threshold: f32,
        confidence_threshold: f32,
        nms_type: &str,
        class_agnostic: bool,
        soft_nms_sigma: f32,
        max_detections: usize,
        adaptive_threshold: f32,
        class_thresholds: Option<BTreeMap<i32, f32>>,
        parallel: bool,
    ) -> PyResult<Self> {
        let inner = RustConfig {
            iou_threshold,
            confidence_threshold,
            strategy: parse_strategy(nms_type)?,
            class_agnostic,
            soft_sigma: soft_nms_sigma,
            max_detections,
            adaptive_base_threshold: adaptive_threshold,
            per_class_thresholds: class_thresholds.unwrap_or_default(),
            parallel,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Validate the configuration.
    fn validate(&self) -> PyResult<()> {
        self.inner.validate().map_err(to_py_err)
    }

    #[getter]
    fn nms_type(&self) -> &'static str {
        self.inner.strategy.name()
    }

    #[getter]
    fn iou_threshold(&self) -> f32 {
        self.inner.iou_threshold
    }

    #[getter]
    fn confidence_threshold(&self) -> f32 {
        self.inner.confidence_threshold
    }

    #[getter]
    fn max_detections(&self) -> usize {
        self.inner.max_detections
    }

    fn __repr__(&self) -> String {
        format!(
            "NmsConfig(nms_type='{}', iou_threshold={}, confidence_threshold={}, class_agnostic={}, max_detections={})",
            self.inner.strategy.name(),
            self.inner.iou_threshold,
            self.inner.confidence_threshold,
            self.inner.class_agnostic,
            self.inner.max_detections
        )
    }
}

/// Statistics of the last (or accumulated) suppression call.
#[pyclass]
pub struct NmsStats {
    #[pyo3(get)]
    input_boxes: usize,
    #[pyo3(get)]
    output_boxes: usize,
    #[pyo3(get)]
    suppressed_boxes: usize,
    #[pyo3(get)]
    processing_time_ms: f64,
    boxes_per_class: BTreeMap<i32, usize>,
}

#[pymethods]
impl NmsStats {
    /// Output count per class id.
    #[getter]
    fn boxes_per_class(&self) -> BTreeMap<i32, usize> {
        self.boxes_per_class.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "NmsStats(input_boxes={}, output_boxes={}, suppressed_boxes={}, processing_time_ms={:.3})",
            self.input_boxes, self.output_boxes, self.suppressed_boxes, self.processing_time_ms
        )
    }
}

/// Stateful suppression engine; keep one per video stream or worker.
#[pyclass]
pub struct Suppressor {
    inner: RustSuppressor,
}

#[pymethods]
impl Suppressor {
    /// Create an engine.
    ///
    /// Args:
    ///     config: NmsConfig (default: NmsConfig())
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<NmsConfig>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        let inner = RustSuppressor::new(cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Replace the configuration; the old one stays active on error.
    fn set_config(&mut self, config: NmsConfig) -> PyResult<()> {
        self.inner.set_config(config.inner).map_err(to_py_err)
    }

    /// Return a copy of the active configuration.
    fn config(&self) -> NmsConfig {
        NmsConfig {
            inner: self.inner.config().clone(),
        }
    }

    /// Suppress one frame of boxes.
    ///
    /// Returns:
    ///     List of kept BBox objects, sorted by confidence (best first)
    fn apply_nms(&mut self, boxes: Vec<BBox>) -> Vec<BBox> {
        let input: Vec<RustBBox> = boxes.into_iter().map(|b| b.inner).collect();
        self.inner
            .suppress(&input)
            .into_iter()
            .map(|inner| BBox { inner })
            .collect()
    }

    /// Suppress the current frame after blending it with the previous one.
    ///
    /// Args:
    ///     current_boxes: Boxes of the current frame
    ///     previous_boxes: Kept boxes of the previous frame
    ///     temporal_weight: Weight of the current frame (default: 0.7)
    #[pyo3(signature = (current_boxes, previous_boxes, temporal_weight = 0.7))]
    fn apply_temporal_nms(
        &mut self,
        current_boxes: Vec<BBox>,
        previous_boxes: Vec<BBox>,
        temporal_weight: f32,
    ) -> PyResult<Vec<BBox>> {
        let current: Vec<RustBBox> = current_boxes.into_iter().map(|b| b.inner).collect();
        let previous: Vec<RustBBox> = previous_boxes.into_iter().map(|b| b.inner).collect();
        let kept = self
            .inner
            .suppress_temporal(&current, &previous, temporal_weight)
            .map_err(to_py_err)?;
        Ok(kept.into_iter().map(|inner| BBox { inner }).collect())
    }

    /// Statistics of the last call.
    fn stats(&self) -> NmsStats {
        let stats = self.inner.stats();
        NmsStats {
            input_boxes: stats.input_boxes,
            output_boxes: stats.output_boxes,
            suppressed_boxes: stats.suppressed_boxes,
            processing_time_ms: stats.processing_time_ms(),
            boxes_per_class: stats.boxes_per_class.clone(),
        }
    }

    /// Clear the statistics.
    fn reset_stats(&mut self) {
        self.inner.reset_stats();
    }

    fn __repr__(&self) -> String {
        format!(
            "Suppressor(nms_type='{}')",
            self.inner.config().strategy.name()
        )
    }
}

/// Intersection over union of two boxes.
#[pyfunction]
fn iou(a: PyRef<'_, BBox>, b: PyRef<'_, BBox>) -> f32 {
    detnms::iou(&a.inner, &b.inner)
}

/// Smallest box enclosing both inputs.
#[pyfunction]
fn merge(a: PyRef<'_, BBox>, b: PyRef<'_, BBox>) -> BBox {
    BBox {
        inner: detnms::merge(&a.inner, &b.inner),
    }
}

/// Suppress raw detector output given as numpy arrays.
///
/// Args:
///     boxes: float32 array of shape (N, 4) with x1, y1, x2, y2 rows
///     scores: float32 array of shape (N,)
///     class_ids: int32 array of shape (N,)
///     config: NmsConfig (default: NmsConfig())
///
/// Returns:
///     List of kept BBox objects, sorted by confidence (best first)
#[pyfunction]
#[pyo3(signature = (boxes, scores, class_ids, config = None))]
fn suppress_arrays(
    boxes: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    class_ids: PyReadonlyArray1<'_, i32>,
    config: Option<NmsConfig>,
) -> PyResult<Vec<BBox>> {
    let shape = boxes.shape();
    if shape[1] != 4 {
        return Err(PyValueError::new_err("boxes must have shape (N, 4)"));
    }
    let count = shape[0];
    if scores.shape()[0] != count || class_ids.shape()[0] != count {
        return Err(PyValueError::new_err(
            "scores and class_ids must have one entry per box",
        ));
    }

    let coords = boxes.as_slice()?;
    let scores = scores.as_slice()?;
    let class_ids = class_ids.as_slice()?;
    let input: Vec<RustBBox> = coords
        .chunks_exact(4)
        .zip(scores.iter().zip(class_ids))
        .map(|(c, (&score, &class_id))| RustBBox::new(c[0], c[1], c[2], c[3], score, class_id))
        .collect();

    let cfg = config.map(|c| c.inner).unwrap_or_default();
    let out = detnms::suppress(&input, &cfg).map_err(to_py_err)?;
    Ok(out.boxes.into_iter().map(|inner| BBox { inner }).collect())
}

/// Python module for detnms detection suppression.
#[pymodule]
fn _detnms(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<BBox>()?;
    m.add_class::<NmsConfig>()?;
    m.add_class::<NmsStats>()?;
    m.add_class::<Suppressor>()?;
    m.add_function(wrap_pyfunction!(iou, m)?)?;
    m.add_function(wrap_pyfunction!(merge, m)?)?;
    m.add_function(wrap_pyfunction!(suppress_arrays, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
