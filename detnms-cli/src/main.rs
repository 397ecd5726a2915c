use clap::Parser;
use detnms::io::frame_size;
use detnms::{BBox, FrameSize, Strategy, SuppressionConfig, SuppressionStats, Suppressor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Detection suppression CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StrategyConfig {
    Standard,
    Soft,
    Weighted,
    Adaptive,
}

impl From<StrategyConfig> for Strategy {
    fn from(value: StrategyConfig) -> Self {
        match value {
            StrategyConfig::Standard => Strategy::Standard,
            StrategyConfig::Soft => Strategy::Soft,
            StrategyConfig::Weighted => Strategy::Weighted,
            StrategyConfig::Adaptive => Strategy::Adaptive,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SuppressionConfigJson {
    strategy: StrategyConfig,
    iou_threshold: f32,
    confidence_threshold: f32,
    class_agnostic: bool,
    soft_sigma: f32,
    max_detections: usize,
    adaptive_base_threshold: f32,
    per_class_thresholds: BTreeMap<i32, f32>,
    parallel: bool,
}

impl Default for SuppressionConfigJson {
    fn default() -> Self {
        let cfg = SuppressionConfig::default();
        Self {
            strategy: StrategyConfig::Standard,
            iou_threshold: cfg.iou_threshold,
            confidence_threshold: cfg.confidence_threshold,
            class_agnostic: cfg.class_agnostic,
            soft_sigma: cfg.soft_sigma,
            max_detections: cfg.max_detections,
            adaptive_base_threshold: cfg.adaptive_base_threshold,
            per_class_thresholds: cfg.per_class_thresholds,
            parallel: cfg.parallel,
        }
    }
}

impl From<SuppressionConfigJson> for SuppressionConfig {
    fn from(value: SuppressionConfigJson) -> Self {
        Self {
            iou_threshold: value.iou_threshold,
            confidence_threshold: value.confidence_threshold,
            strategy: value.strategy.into(),
            class_agnostic: value.class_agnostic,
            soft_sigma: value.soft_sigma,
            max_detections: value.max_detections,
            adaptive_base_threshold: value.adaptive_base_threshold,
            per_class_thresholds: value.per_class_thresholds,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FrameJson {
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    detections_path: String,
    previous_path: Option<String>,
    temporal_weight: f32,
    output_path: Option<String>,
    relative: bool,
    frame: Option<FrameJson>,
    image_path: Option<String>,
    suppression: SuppressionConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detections_path: String::new(),
            previous_path: None,
            temporal_weight: 0.7,
            output_path: None,
            relative: false,
            frame: None,
            image_path: None,
            suppression: SuppressionConfigJson::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct BoxRecord {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    confidence: f32,
    class_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl From<BoxRecord> for BBox {
    fn from(value: BoxRecord) -> Self {
        BBox {
            x1: value.x1,
            y1: value.y1,
            x2: value.x2,
            y2: value.y2,
            confidence: value.confidence,
            class_id: value.class_id,
            label: value.label,
        }
    }
}

impl From<BBox> for BoxRecord {
    fn from(value: BBox) -> Self {
        Self {
            x1: value.x1,
            y1: value.y1,
            x2: value.x2,
            y2: value.y2,
            confidence: value.confidence,
            class_id: value.class_id,
            label: value.label,
        }
    }
}

#[derive(Debug, Serialize)]
struct StatsRecord {
    input_boxes: usize,
    output_boxes: usize,
    suppressed_boxes: usize,
    boxes_per_class: BTreeMap<i32, usize>,
    processing_time_ms: f64,
}

impl From<&SuppressionStats> for StatsRecord {
    fn from(value: &SuppressionStats) -> Self {
        Self {
            input_boxes: value.input_boxes,
            output_boxes: value.output_boxes,
            suppressed_boxes: value.suppressed_boxes,
            boxes_per_class: value.boxes_per_class.clone(),
            processing_time_ms: value.processing_time_ms(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    boxes: Vec<BoxRecord>,
    stats: StatsRecord,
}

fn load_boxes(path: &str) -> Result<Vec<BBox>, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let records: Vec<BoxRecord> = serde_json::from_str(&text)?;
    Ok(records.into_iter().map(BBox::from).collect())
}

fn resolve_frame(config: &Config) -> Result<Option<FrameSize>, Box<dyn std::error::Error>> {
    if let Some(frame) = &config.frame {
        return Ok(Some(FrameSize::new(frame.width, frame.height)?));
    }
    match &config.image_path {
        Some(path) => Ok(Some(frame_size(path)?)),
        None => Ok(None),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("detnms=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.detections_path.is_empty() {
        return Err("detections_path must be set in the config".into());
    }

    let frame = resolve_frame(&config)?;
    if config.relative && frame.is_none() {
        return Err("relative detections need either frame or image_path".into());
    }
    let to_pixels = |boxes: Vec<BBox>| -> Vec<BBox> {
        match (config.relative, frame) {
            (true, Some(frame)) => boxes
                .iter()
                .map(|b| b.to_absolute(frame.width(), frame.height()))
                .collect(),
            _ => boxes,
        }
    };

    let current = to_pixels(load_boxes(&config.detections_path)?);
    let previous = match &config.previous_path {
        Some(path) => Some(to_pixels(load_boxes(path)?)),
        None => None,
    };

    let mut engine = Suppressor::new(config.suppression.into())?;
    let kept = match previous {
        Some(previous) => engine.suppress_temporal(&current, &previous, config.temporal_weight)?,
        None => engine.suppress(&current),
    };
    tracing::info!(
        kept = kept.len(),
        suppressed = engine.stats().suppressed_boxes,
        "suppression finished"
    );

    let output = Output {
        boxes: kept.into_iter().map(BoxRecord::from).collect(),
        stats: StatsRecord::from(engine.stats()),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
