//! Scenario tests driven by `tests/fixtures/scenarios.json`.
//!
//! Each scenario lists raw detections, a partial configuration and the exact
//! boxes the pipeline is expected to return.

use detnms::{suppress, BBox, Strategy, SuppressionConfig};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const COORD_TOLERANCE: f32 = 1e-4;
const SCORE_TOLERANCE: f32 = 1e-5;

#[derive(Debug, Deserialize)]
struct Fixture {
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    config: ConfigJson,
    boxes: Vec<BoxJson>,
    expected: Vec<BoxJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StrategyJson {
    Standard,
    Soft,
    Weighted,
    Adaptive,
}

impl From<StrategyJson> for Strategy {
    fn from(value: StrategyJson) -> Self {
        match value {
            StrategyJson::Standard => Strategy::Standard,
            StrategyJson::Soft => Strategy::Soft,
            StrategyJson::Weighted => Strategy::Weighted,
            StrategyJson::Adaptive => Strategy::Adaptive,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConfigJson {
    strategy: StrategyJson,
    iou_threshold: f32,
    confidence_threshold: f32,
    class_agnostic: bool,
    soft_sigma: f32,
    max_detections: usize,
}

impl Default for ConfigJson {
    fn default() -> Self {
        let cfg = SuppressionConfig::default();
        Self {
            strategy: StrategyJson::Standard,
            iou_threshold: cfg.iou_threshold,
            confidence_threshold: cfg.confidence_threshold,
            class_agnostic: cfg.class_agnostic,
            soft_sigma: cfg.soft_sigma,
            max_detections: cfg.max_detections,
        }
    }
}

impl From<ConfigJson> for SuppressionConfig {
    fn from(value: ConfigJson) -> Self {
        SuppressionConfig {
            strategy: value.strategy.into(),
            iou_threshold: value.iou_threshold,
            confidence_threshold: value.confidence_threshold,
            class_agnostic: value.class_agnostic,
            soft_sigma: value.soft_sigma,
            max_detections: value.max_detections,
            ..SuppressionConfig::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct BoxJson {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    confidence: f32,
    class_id: i32,
}

impl From<&BoxJson> for BBox {
    fn from(value: &BoxJson) -> Self {
        BBox::new(
            value.x1,
            value.y1,
            value.x2,
            value.y2,
            value.confidence,
            value.class_id,
        )
    }
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scenarios.json")
}

fn run_scenario(scenario: Scenario) -> Result<(), String> {
    let boxes: Vec<BBox> = scenario.boxes.iter().map(BBox::from).collect();
    let cfg: SuppressionConfig = scenario.config.into();
    let out = suppress(&boxes, &cfg).map_err(|err| err.to_string())?;

    if out.boxes.len() != scenario.expected.len() {
        return Err(format!(
            "expected {} boxes, got {}: {:?}",
            scenario.expected.len(),
            out.boxes.len(),
            out.boxes
        ));
    }
    for (idx, (got, want)) in out.boxes.iter().zip(&scenario.expected).enumerate() {
        let coords_ok = [
            (got.x1, want.x1),
            (got.y1, want.y1),
            (got.x2, want.x2),
            (got.y2, want.y2),
        ]
        .iter()
        .all(|(g, w)| (g - w).abs() <= COORD_TOLERANCE);
        if !coords_ok
            || got.class_id != want.class_id
            || (got.confidence - want.confidence).abs() > SCORE_TOLERANCE
        {
            return Err(format!("box {idx}: got {got:?}, want {want:?}"));
        }
    }
    Ok(())
}

#[test]
fn test_fixture_scenarios() {
    let text = fs::read_to_string(fixture_path()).expect("read scenarios.json");
    let fixture: Fixture = serde_json::from_str(&text).expect("parse scenarios.json");
    assert!(!fixture.scenarios.is_empty());

    let mut failures = Vec::new();
    for scenario in fixture.scenarios {
        let name = scenario.name.clone();
        if let Err(reason) = run_scenario(scenario) {
            failures.push(format!("{name}: {reason}"));
        }
    }
    assert!(failures.is_empty(), "failed scenarios:\n{}", failures.join("\n"));
}
