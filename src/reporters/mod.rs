//! Output reporters for detection results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::features::FeatureVector;
use crate::models::{DetectionReport, ScanReport};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a single-snippet detection report
pub fn render_detection(report: &DetectionReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_detection(report),
        OutputFormat::Json => json::render(report),
    }
}

/// Render a directory scan report
pub fn render_scan(report: &ScanReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_scan(report),
        OutputFormat::Json => json::render(report),
    }
}

/// Render a bare feature vector
pub fn render_features(features: &FeatureVector, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_features(features),
        OutputFormat::Json => json::render(features),
    }
}
