//! Detect and features commands - analyze a single file or stdin

use super::{is_stdin, read_input};
use anyhow::Result;
use codeorigin::config::DetectorConfig;
use codeorigin::features::extract_features_for;
use codeorigin::models::Language;
use codeorigin::pipeline::Detector;
use codeorigin::reporters::{self, OutputFormat};
use std::path::Path;
use tracing::info;

/// Language when neither a flag, an extension nor config names one
const STDIN_LANGUAGE: Language = Language::Python;

/// Resolve the language: flag, then file extension, then config default.
fn resolve_language(config: &DetectorConfig, input: &Path, language: Option<&str>) -> Language {
    if let Some(tag) = language {
        return Language::from_tag(tag);
    }
    if !is_stdin(input) {
        let from_path = Language::from_path(input);
        if from_path != Language::Unknown {
            return from_path;
        }
    }
    match &config.default_language {
        Some(tag) => Language::from_tag(tag),
        None if is_stdin(input) => STDIN_LANGUAGE,
        None => Language::Unknown,
    }
}

/// Run the detect command
pub fn run(
    config: &DetectorConfig,
    input: &Path,
    language: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let code = read_input(input)?;
    let language = resolve_language(config, input, language);

    let detector = Detector::from_config(config);
    info!("Scoring with the {} scorer", detector.scorer_name());
    let report = detector.analyze(&code, language.as_str())?;

    print!("{}", reporters::render_detection(&report, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

/// Run the features command
pub fn features(
    config: &DetectorConfig,
    input: &Path,
    language: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let code = read_input(input)?;
    let language = resolve_language(config, input, language);
    let features = extract_features_for(&code, language);

    print!("{}", reporters::render_features(&features, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
