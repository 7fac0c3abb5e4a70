//! Detection pipeline
//!
//! [`Detector`] owns one scorer for its lifetime and runs the full path for a
//! submission: validation, feature extraction, scoring, explanation.
//! Directory scans fan out across files with rayon.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use chrono::Utc;
use ignore::WalkBuilder;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classifier::{load_scorer, predict, Scorer};
use crate::config::DetectorConfig;
use crate::features::extract_features_for;
use crate::models::{DetectionReport, FileVerdict, Language, ScanReport, SkippedFile};

/// Accepted submission size, in characters after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionLimits {
    pub min_code_length: usize,
    pub max_code_length: usize,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            min_code_length: 10,
            max_code_length: 50_000,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("No code provided")]
    Empty,

    #[error("Code too short for analysis ({len} characters, minimum {min})")]
    TooShort { len: usize, min: usize },

    #[error("Code too long for analysis ({len} characters, maximum {max})")]
    TooLong { len: usize, max: usize },
}

/// Trim `code` and check it against `limits`. Returns the trimmed code.
pub fn validate_submission<'a>(
    code: &'a str,
    limits: &SubmissionLimits,
) -> Result<&'a str, SubmissionError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(SubmissionError::Empty);
    }
    let len = code.chars().count();
    if len < limits.min_code_length {
        return Err(SubmissionError::TooShort {
            len,
            min: limits.min_code_length,
        });
    }
    if len > limits.max_code_length {
        return Err(SubmissionError::TooLong {
            len,
            max: limits.max_code_length,
        });
    }
    Ok(code)
}

/// Called after each scanned file with (path, done, total).
pub type ProgressCallback = Box<dyn Fn(&Path, usize, usize) + Send + Sync>;

pub struct Detector {
    scorer: Box<dyn Scorer>,
    limits: SubmissionLimits,
    /// Used when a file's language is neither given nor inferable
    default_language: Language,
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Detector {
    pub fn new(scorer: Box<dyn Scorer>, limits: SubmissionLimits) -> Self {
        Self {
            scorer,
            limits,
            default_language: Language::Unknown,
            workers: default_workers(),
            progress_callback: None,
        }
    }

    /// Build a detector from resolved settings, loading the model once.
    pub fn from_config(config: &DetectorConfig) -> Self {
        let scorer = load_scorer(config.model_path.as_deref(), config.heuristic.clone());
        let mut detector = Self::new(scorer, config.limits);
        if let Some(tag) = &config.default_language {
            detector.default_language = Language::from_tag(tag);
        }
        detector
    }

    /// Set the number of scan workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub fn limits(&self) -> &SubmissionLimits {
        &self.limits
    }

    /// Analyze one submission tagged with a language name.
    pub fn analyze(&self, code: &str, language: &str) -> Result<DetectionReport, SubmissionError> {
        self.analyze_as(code, Language::from_tag(language))
    }

    fn analyze_as(&self, code: &str, language: Language) -> Result<DetectionReport, SubmissionError> {
        let code = validate_submission(code, &self.limits)?;
        let features = extract_features_for(code, language);
        let decision = predict(self.scorer.as_ref(), &features);
        debug!(
            "Analyzed {} chars of {} as {} ({:.2})",
            code.len(),
            language,
            decision.label,
            decision.confidence
        );
        Ok(DetectionReport::new(language, features, decision))
    }

    /// Language for `path`: explicit override, then extension, then the
    /// configured default.
    pub fn language_for(&self, path: &Path, language_override: Option<&str>) -> Language {
        if let Some(tag) = language_override {
            return Language::from_tag(tag);
        }
        match Language::from_path(path) {
            Language::Unknown => self.default_language,
            language => language,
        }
    }

    /// Read and analyze one file.
    pub fn analyze_file(
        &self,
        path: &Path,
        language_override: Option<&str>,
    ) -> Result<DetectionReport> {
        let code = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let language = self.language_for(path, language_override);
        self.analyze_as(&code, language)
            .with_context(|| format!("Cannot analyze {}", path.display()))
    }

    /// Analyze every supported source file under `root`.
    ///
    /// Files that cannot be read or fail validation are listed as skipped.
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        if !root.exists() {
            anyhow::bail!("Path does not exist: {}", root.display());
        }
        let started_at = Utc::now();
        let files = collect_source_files(root);
        info!("Scanning {} source files under {}", files.len(), root.display());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;

        let completed = AtomicUsize::new(0);
        let total = files.len();
        let outcomes: Vec<Result<FileVerdict, SkippedFile>> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let outcome = self.scan_file(root, path);
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(ref callback) = self.progress_callback {
                        callback(path, done, total);
                    }
                    outcome
                })
                .collect()
        });

        let mut verdicts = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(verdict) => verdicts.push(verdict),
                Err(skip) => skipped.push(skip),
            }
        }

        Ok(ScanReport::summarize(
            root.to_path_buf(),
            verdicts,
            skipped,
            started_at,
        ))
    }

    fn scan_file(&self, root: &Path, path: &Path) -> Result<FileVerdict, SkippedFile> {
        let display_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        let skip = |reason: String| {
            debug!("Skipping {}: {}", display_path.display(), reason);
            SkippedFile {
                path: display_path.clone(),
                reason,
            }
        };

        let code = std::fs::read_to_string(path).map_err(|e| skip(e.to_string()))?;
        let language = self.language_for(path, None);
        let report = self
            .analyze_as(&code, language)
            .map_err(|e| skip(e.to_string()))?;
        Ok(FileVerdict::from_report(display_path.clone(), report))
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(64)
}

/// Walk `root` honoring .gitignore, keeping files of a supported language.
///
/// A file `root` yields itself when supported.
pub fn collect_source_files(root: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Walk error: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && Language::from_path(path).is_supported() {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::HeuristicScorer;
    use crate::models::Label;

    fn detector() -> Detector {
        Detector::new(Box::new(HeuristicScorer::default()), SubmissionLimits::default())
    }

    #[test]
    fn test_validate_trims() {
        let limits = SubmissionLimits::default();
        assert_eq!(
            validate_submission("  \n x = compute(1)\n\n", &limits),
            Ok("x = compute(1)")
        );
    }

    #[test]
    fn test_validate_errors() {
        let limits = SubmissionLimits {
            min_code_length: 10,
            max_code_length: 20,
        };
        assert_eq!(validate_submission(" \n\t", &limits), Err(SubmissionError::Empty));
        assert_eq!(
            validate_submission("x = 1", &limits),
            Err(SubmissionError::TooShort { len: 5, min: 10 })
        );
        assert!(matches!(
            validate_submission(&"y".repeat(21), &limits),
            Err(SubmissionError::TooLong { len: 21, max: 20 })
        ));
        assert!(validate_submission(&"y".repeat(20), &limits).is_ok());
    }

    #[test]
    fn test_analyze_reports_language_and_summary() {
        let report = detector()
            .analyze("def f():\n    return 1\n", "Python")
            .expect("valid submission");
        assert_eq!(report.language, Language::Python);
        assert_eq!(report.analysis.lines_of_code, 2.0);
        assert_ne!(report.prediction, Label::Unknown);
        assert!((report.ai_probability + report.human_probability - 1.0).abs() < 1e-9);
        assert!(!report.reasons.is_empty());
    }

    #[test]
    fn test_analyze_rejects_short_code() {
        assert_eq!(
            detector().analyze("x=1", "python").map(|_| ()),
            Err(SubmissionError::TooShort { len: 3, min: 10 })
        );
    }

    #[test]
    fn test_language_resolution() {
        let mut d = detector();
        assert_eq!(d.language_for(Path::new("a.py"), None), Language::Python);
        assert_eq!(d.language_for(Path::new("a.py"), Some("go")), Language::Go);
        assert_eq!(d.language_for(Path::new("a.txt"), None), Language::Unknown);
        d.default_language = Language::Java;
        assert_eq!(d.language_for(Path::new("a.txt"), None), Language::Java);
    }

    #[test]
    fn test_scan_collects_and_skips() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("main.py"),
            "def main():\n    print('hello world')\n",
        )
        .expect("write");
        std::fs::write(dir.path().join("tiny.js"), "x=1").expect("write");
        std::fs::write(dir.path().join("notes.txt"), "not source code at all").expect("write");

        let report = detector().with_workers(2).scan(dir.path()).expect("scan");
        assert_eq!(report.total_files, 1);
        assert_eq!(report.files[0].path, PathBuf::from("main.py"));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, PathBuf::from("tiny.js"));
        assert_eq!(report.languages_detected, vec![Language::Python]);
    }

    #[test]
    fn test_scan_missing_root() {
        assert!(detector().scan(Path::new("/nonexistent/codeorigin")).is_err());
    }

    #[test]
    fn test_progress_callback_counts_files() {
        use std::sync::Arc;

        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["a.py", "b.py", "c.go"] {
            std::fs::write(dir.path().join(name), "value = compute(first, second)\n")
                .expect("write");
        }
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let d = detector().with_progress(Box::new(move |_, _, total| {
            assert_eq!(total, 3);
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let report = d.scan(dir.path()).expect("scan");
        assert_eq!(report.total_files, 3);
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }
}
