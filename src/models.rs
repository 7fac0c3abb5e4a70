//! Core data models for codeorigin
//!
//! These models are shared by the feature extractors, the scorers, and the
//! reporters: languages, labels, decisions, and the single-file and
//! directory-scan reports.

use crate::features::{Feature, FeatureVector};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Languages with a dedicated analysis profile.
///
/// Anything else is `Unknown`, which still gets a full feature vector from
/// the permissive comment rules and the generic structural fallback.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    C,
    Cpp,
    CSharp,
    Go,
    Rust,
    #[default]
    Unknown,
}

/// How comments are recognized for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `#` line comments and triple-quoted blocks
    Hash,
    /// `//` line comments and `/* */` blocks
    Slash,
    /// Union of both, for unrecognized languages
    Permissive,
}

/// Which structural analyzer variant handles a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureProfile {
    /// Full syntax tree (tree-sitter)
    Parsed,
    /// Regex pattern counts
    Pattern,
    /// Keyword and delimiter counts only
    Generic,
}

impl Language {
    /// Every language with a dedicated profile.
    pub const SUPPORTED: [Language; 9] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Go,
        Language::Rust,
    ];

    /// Resolve a caller-supplied tag. Case-insensitive; never fails.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "python" | "py" | "python3" => Language::Python,
            "javascript" | "js" | "jsx" | "node" | "mjs" => Language::JavaScript,
            "typescript" | "ts" | "tsx" => Language::TypeScript,
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" | "c++" | "cxx" | "cc" => Language::Cpp,
            "csharp" | "c#" | "cs" => Language::CSharp,
            "go" | "golang" => Language::Go,
            "rust" | "rs" => Language::Rust,
            _ => Language::Unknown,
        }
    }

    /// Resolve a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "py" | "pyi" => Language::Python,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "cs" => Language::CSharp,
            "go" => Language::Go,
            "rs" => Language::Rust,
            _ => Language::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Unknown => "unknown",
        }
    }

    pub fn comment_style(&self) -> CommentStyle {
        match self {
            Language::Python => CommentStyle::Hash,
            Language::Unknown => CommentStyle::Permissive,
            _ => CommentStyle::Slash,
        }
    }

    pub fn structure_profile(&self) -> StructureProfile {
        match self {
            Language::Python => StructureProfile::Parsed,
            Language::JavaScript | Language::TypeScript => StructureProfile::Pattern,
            _ => StructureProfile::Generic,
        }
    }

    pub fn is_supported(&self) -> bool {
        *self != Language::Unknown
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Binary class a scorer assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authorship {
    Human,
    #[serde(rename = "AI")]
    Ai,
}

/// Final label of a decision. `Unknown` only appears when scoring failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "AI")]
    Ai,
    Human,
    Unknown,
}

impl From<Authorship> for Label {
    fn from(a: Authorship) -> Self {
        match a {
            Authorship::Ai => Label::Ai,
            Authorship::Human => Label::Human,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Ai => write!(f, "AI"),
            Label::Human => write!(f, "Human"),
            Label::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Per-class probabilities, human first to match scorer output order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub human: f64,
    pub ai: f64,
}

impl ClassProbabilities {
    /// Build from the AI probability; the human side is its complement.
    pub fn from_ai(ai: f64) -> Self {
        Self { human: 1.0 - ai, ai }
    }

    pub fn uniform() -> Self {
        Self { human: 0.5, ai: 0.5 }
    }

    pub fn of(&self, class: Authorship) -> f64 {
        match class {
            Authorship::Ai => self.ai,
            Authorship::Human => self.human,
        }
    }

    /// Finite, each within [0, 1], summing to 1.
    pub fn is_well_formed(&self) -> bool {
        let in_unit = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        in_unit(self.human) && in_unit(self.ai) && ((self.human + self.ai) - 1.0).abs() < 1e-6
    }
}

/// Coarse confidence bands, shared by the explainer and the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.9 {
            ConfidenceLevel::VeryHigh
        } else if confidence > 0.75 {
            ConfidenceLevel::High
        } else if confidence > 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "low"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::High => write!(f, "high"),
            ConfidenceLevel::VeryHigh => write!(f, "very_high"),
        }
    }
}

/// Labeled, explained outcome of scoring one feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub label: Label,
    /// Probability of the predicted class
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
    pub reasons: Vec<String>,
}

impl Decision {
    /// The degraded decision returned when scoring could not complete.
    pub fn fallback(error: impl std::fmt::Display) -> Self {
        Self {
            label: Label::Unknown,
            confidence: 0.5,
            probabilities: ClassProbabilities::uniform(),
            reasons: vec![format!(
                "Using fallback prediction due to error: {}",
                error
            )],
        }
    }

    pub fn is_ai(&self) -> bool {
        self.label == Label::Ai
    }

    pub fn level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }
}

/// The handful of features surfaced next to a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub lines_of_code: f64,
    pub comment_ratio: f64,
    pub avg_line_length: f64,
    pub complexity_score: f64,
}

impl AnalysisSummary {
    pub fn from_features(features: &FeatureVector) -> Self {
        Self {
            lines_of_code: features.get(Feature::LinesOfCode),
            comment_ratio: features.get(Feature::CommentRatio),
            avg_line_length: features.get(Feature::AvgLineLength),
            complexity_score: features.get(Feature::ComplexityScore),
        }
    }
}

/// Full result of analyzing one snippet.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub prediction: Label,
    pub confidence: f64,
    pub is_ai_generated: bool,
    pub ai_probability: f64,
    pub human_probability: f64,
    pub detection_level: ConfidenceLevel,
    pub language: Language,
    pub features: FeatureVector,
    pub analysis: AnalysisSummary,
    pub reasons: Vec<String>,
}

impl DetectionReport {
    pub fn new(language: Language, features: FeatureVector, decision: Decision) -> Self {
        Self {
            prediction: decision.label,
            confidence: decision.confidence,
            is_ai_generated: decision.is_ai(),
            ai_probability: decision.probabilities.ai,
            human_probability: decision.probabilities.human,
            detection_level: decision.level(),
            language,
            analysis: AnalysisSummary::from_features(&features),
            features,
            reasons: decision.reasons,
        }
    }
}

/// Per-file line of a scan.
#[derive(Debug, Clone, Serialize)]
pub struct FileVerdict {
    pub path: PathBuf,
    pub language: Language,
    pub prediction: Label,
    pub confidence: f64,
    pub ai_probability: f64,
    pub detection_level: ConfidenceLevel,
    pub reasons: Vec<String>,
}

impl FileVerdict {
    pub fn from_report(path: PathBuf, report: DetectionReport) -> Self {
        Self {
            path,
            language: report.language,
            prediction: report.prediction,
            confidence: report.confidence,
            ai_probability: report.ai_probability,
            detection_level: report.detection_level,
            reasons: report.reasons,
        }
    }

    /// Failed scoring or a low-confidence call.
    pub fn is_uncertain(&self) -> bool {
        self.prediction == Label::Unknown || self.detection_level == ConfidenceLevel::Low
    }
}

/// A file the scan looked at but did not score.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Aggregate result of scanning a directory tree.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub total_files: usize,
    pub ai_generated_files: usize,
    pub human_written_files: usize,
    pub uncertain_files: usize,
    pub ai_percentage: f64,
    pub human_percentage: f64,
    pub average_confidence: f64,
    pub languages_detected: Vec<Language>,
    pub files: Vec<FileVerdict>,
    pub skipped: Vec<SkippedFile>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl ScanReport {
    /// Tally per-file verdicts into a report. Files are sorted by path.
    pub fn summarize(
        root: PathBuf,
        mut files: Vec<FileVerdict>,
        mut skipped: Vec<SkippedFile>,
        started_at: DateTime<Utc>,
    ) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        skipped.sort_by(|a, b| a.path.cmp(&b.path));

        let total_files = files.len();
        let uncertain_files = files.iter().filter(|f| f.is_uncertain()).count();
        let ai_generated_files = files
            .iter()
            .filter(|f| !f.is_uncertain() && f.prediction == Label::Ai)
            .count();
        let human_written_files = files
            .iter()
            .filter(|f| !f.is_uncertain() && f.prediction == Label::Human)
            .count();

        let percent = |n: usize| {
            if total_files == 0 {
                0.0
            } else {
                n as f64 / total_files as f64 * 100.0
            }
        };
        let average_confidence = if total_files == 0 {
            0.0
        } else {
            files.iter().map(|f| f.confidence).sum::<f64>() / total_files as f64
        };

        let mut languages_detected: Vec<Language> = files.iter().map(|f| f.language).collect();
        languages_detected.sort();
        languages_detected.dedup();

        let finished_at = Utc::now();
        let elapsed_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;

        Self {
            root,
            total_files,
            ai_generated_files,
            human_written_files,
            uncertain_files,
            ai_percentage: percent(ai_generated_files),
            human_percentage: percent(human_written_files),
            average_confidence,
            languages_detected,
            files,
            skipped,
            started_at,
            finished_at,
            elapsed_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_tag_is_case_insensitive() {
        assert_eq!(Language::from_tag("Python"), Language::Python);
        assert_eq!(Language::from_tag("JS"), Language::JavaScript);
        assert_eq!(Language::from_tag(" c++ "), Language::Cpp);
        assert_eq!(Language::from_tag("cobol"), Language::Unknown);
        assert_eq!(Language::from_tag(""), Language::Unknown);
    }

    #[test]
    fn test_language_profiles() {
        assert_eq!(Language::Python.comment_style(), CommentStyle::Hash);
        assert_eq!(Language::Go.comment_style(), CommentStyle::Slash);
        assert_eq!(Language::Unknown.comment_style(), CommentStyle::Permissive);
        assert_eq!(Language::Python.structure_profile(), StructureProfile::Parsed);
        assert_eq!(Language::TypeScript.structure_profile(), StructureProfile::Pattern);
        assert_eq!(Language::Java.structure_profile(), StructureProfile::Generic);
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(Language::from_path(Path::new("src/app.tsx")), Language::TypeScript);
        assert_eq!(Language::from_path(Path::new("main.RS")), Language::Rust);
        assert_eq!(Language::from_path(Path::new("Makefile")), Language::Unknown);
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::from_confidence(0.95), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_confidence(0.9), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(0.7), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_confidence(0.6), ConfidenceLevel::Low);
    }

    #[test]
    fn test_fallback_decision() {
        let decision = Decision::fallback("boom");
        assert_eq!(decision.label, Label::Unknown);
        assert_eq!(decision.confidence, 0.5);
        assert_eq!(decision.probabilities, ClassProbabilities::uniform());
        assert_eq!(
            decision.reasons,
            vec!["Using fallback prediction due to error: boom".to_string()]
        );
    }

    #[test]
    fn test_probabilities_well_formed() {
        assert!(ClassProbabilities::from_ai(0.3).is_well_formed());
        assert!(!ClassProbabilities { human: 0.7, ai: 0.7 }.is_well_formed());
        assert!(!ClassProbabilities { human: f64::NAN, ai: 0.5 }.is_well_formed());
        assert!(!ClassProbabilities { human: 1.5, ai: -0.5 }.is_well_formed());
    }

    #[test]
    fn test_label_serializes_like_display() {
        let json = serde_json::to_string(&Label::Ai).expect("serialize label");
        assert_eq!(json, "\"AI\"");
        assert_eq!(Label::Human.to_string(), "Human");
    }

    fn verdict(path: &str, prediction: Label, confidence: f64, language: Language) -> FileVerdict {
        FileVerdict {
            path: PathBuf::from(path),
            language,
            prediction,
            confidence,
            ai_probability: if prediction == Label::Ai { confidence } else { 1.0 - confidence },
            detection_level: ConfidenceLevel::from_confidence(confidence),
            reasons: Vec::new(),
        }
    }

    #[test]
    fn test_scan_report_tallies() {
        let files = vec![
            verdict("b.py", Label::Ai, 0.8, Language::Python),
            verdict("a.js", Label::Human, 0.7, Language::JavaScript),
            verdict("c.py", Label::Unknown, 0.5, Language::Python),
            verdict("d.py", Label::Ai, 0.55, Language::Python),
        ];
        let report = ScanReport::summarize(PathBuf::from("."), files, Vec::new(), Utc::now());

        assert_eq!(report.total_files, 4);
        assert_eq!(report.ai_generated_files, 1);
        assert_eq!(report.human_written_files, 1);
        assert_eq!(report.uncertain_files, 2);
        assert!((report.ai_percentage - 25.0).abs() < 1e-9);
        assert!((report.average_confidence - 0.6375).abs() < 1e-9);
        assert_eq!(
            report.languages_detected,
            vec![Language::Python, Language::JavaScript]
        );
        assert_eq!(report.files[0].path, PathBuf::from("a.js"));
    }

    #[test]
    fn test_empty_scan_report() {
        let report = ScanReport::summarize(PathBuf::from("."), Vec::new(), Vec::new(), Utc::now());
        assert_eq!(report.total_files, 0);
        assert_eq!(report.ai_percentage, 0.0);
        assert_eq!(report.average_confidence, 0.0);
    }
}
