//! Text (terminal) reporter with colors and formatting

use crate::features::FeatureVector;
use crate::models::{ConfidenceLevel, DetectionReport, FileVerdict, Label, ScanReport};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Label colors
fn label_color(label: Label) -> &'static str {
    match label {
        Label::Ai => "\x1b[91m",      // Light red
        Label::Human => "\x1b[32m",   // Green
        Label::Unknown => "\x1b[33m", // Yellow
    }
}

fn level_tag(level: ConfidenceLevel) -> &'static str {
    match level {
        ConfidenceLevel::VeryHigh => "[VH]",
        ConfidenceLevel::High => "[H]",
        ConfidenceLevel::Medium => "[M]",
        ConfidenceLevel::Low => "[L]",
    }
}

/// Horizontal bar of `width` cells filled in proportion to `fraction`.
fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Render a detection as formatted terminal output
pub fn render_detection(report: &DetectionReport) -> Result<String> {
    let mut out = String::new();
    let color = label_color(report.prediction);

    out.push_str(&format!("\n{BOLD}Code Origin{RESET}\n"));
    out.push_str(&format!("{DIM}──────────────────────────────────────{RESET}\n"));
    out.push_str(&format!(
        "Prediction: {color}{BOLD}{}{RESET}  Confidence: {BOLD}{:.1}%{RESET} ({})  Language: {}\n\n",
        report.prediction,
        report.confidence * 100.0,
        report.detection_level,
        report.language
    ));

    out.push_str(&format!("{BOLD}PROBABILITIES{RESET}\n"));
    out.push_str(&format!(
        "  AI     {} {:.1}%\n",
        bar(report.ai_probability, 20),
        report.ai_probability * 100.0
    ));
    out.push_str(&format!(
        "  Human  {} {:.1}%\n\n",
        bar(report.human_probability, 20),
        report.human_probability * 100.0
    ));

    let a = &report.analysis;
    out.push_str(&format!("{BOLD}ANALYSIS{RESET}\n"));
    out.push_str(&format!(
        "  Lines: {:.0}  Comment ratio: {:.1}%  Avg line length: {:.1}  Complexity: {:.0}\n\n",
        a.lines_of_code,
        a.comment_ratio * 100.0,
        a.avg_line_length,
        a.complexity_score
    ));

    if !report.reasons.is_empty() {
        out.push_str(&format!("{BOLD}REASONS{RESET}\n"));
        for reason in &report.reasons {
            out.push_str(&format!("  • {}\n", reason));
        }
    }

    Ok(out)
}

/// Render a scan as a summary plus a per-file table
pub fn render_scan(report: &ScanReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Code Origin Scan{RESET}  {DIM}{}{RESET}\n", report.root.display()));
    out.push_str(&format!("{DIM}──────────────────────────────────────{RESET}\n"));
    out.push_str(&format!(
        "Files: {}  AI: {}{}{RESET} ({:.1}%)  Human: {}{}{RESET} ({:.1}%)  Uncertain: {}\n",
        report.total_files,
        label_color(Label::Ai),
        report.ai_generated_files,
        report.ai_percentage,
        label_color(Label::Human),
        report.human_written_files,
        report.human_percentage,
        report.uncertain_files
    ));
    let languages: Vec<&str> = report.languages_detected.iter().map(|l| l.as_str()).collect();
    out.push_str(&format!(
        "Average confidence: {:.1}%  Languages: {}  Time: {}ms\n\n",
        report.average_confidence * 100.0,
        if languages.is_empty() {
            "-".to_string()
        } else {
            languages.join(", ")
        },
        report.elapsed_ms
    ));

    if !report.files.is_empty() {
        out.push_str(&format!(
            "{DIM}  LABEL    CONF    LVL   FILE{RESET}\n"
        ));
        out.push_str(&format!(
            "{DIM}  ─────────────────────────────────────────────────────{RESET}\n"
        ));
        for file in &report.files {
            out.push_str(&format_file_row(file));
        }
        out.push('\n');
    }

    if !report.skipped.is_empty() {
        out.push_str(&format!("{BOLD}SKIPPED{RESET} ({})\n", report.skipped.len()));
        for skip in &report.skipped {
            out.push_str(&format!("  {DIM}{}: {}{RESET}\n", skip.path.display(), skip.reason));
        }
    }

    Ok(out)
}

fn format_file_row(file: &FileVerdict) -> String {
    let color = label_color(file.prediction);
    format!(
        "  {color}{:<7}{RESET}  {:>5.1}%  {:<4}  {}\n",
        file.prediction.to_string(),
        file.confidence * 100.0,
        level_tag(file.detection_level),
        file.path.display()
    )
}

/// Render features as an aligned name/value listing
pub fn render_features(features: &FeatureVector) -> Result<String> {
    let width = features
        .iter()
        .map(|(feature, _)| feature.name().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (feature, value) in features.iter() {
        out.push_str(&format!("{:<width$}  {}\n", feature.name(), format_value(value)));
    }
    Ok(out)
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.4}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;
    use crate::reporters::tests::{test_detection, test_scan};

    #[test]
    fn test_detection_text_contains_sections() {
        let report = test_detection();
        let out = render_detection(&report).expect("render text");
        assert!(out.contains("Code Origin"));
        assert!(out.contains("PROBABILITIES"));
        assert!(out.contains("REASONS"));
        assert!(out.contains(&report.reasons[0]));
    }

    #[test]
    fn test_scan_text_lists_files_and_skips() {
        let out = render_scan(&test_scan()).expect("render text");
        assert!(out.contains("src/a.py"));
        assert!(out.contains("SKIPPED (1)"));
        assert!(out.contains("No code provided"));
        let a = out.find("src/a.py").expect("a listed");
        let b = out.find("src/b.py").expect("b listed");
        assert!(a < b);
    }

    #[test]
    fn test_features_text_one_line_per_feature() {
        let out = render_features(&FeatureVector::zeroed()).expect("render text");
        assert_eq!(out.lines().count(), FEATURE_COUNT);
        assert!(out.starts_with("lines_of_code"));
    }

    #[test]
    fn test_bar_bounds() {
        assert_eq!(bar(0.0, 4), "░░░░");
        assert_eq!(bar(1.0, 4), "████");
        assert_eq!(bar(7.0, 4), "████");
        assert_eq!(bar(0.5, 4), "██░░");
    }
}
