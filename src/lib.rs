//! codeorigin - AI-vs-human source code classification
//!
//! Extracts a fixed, named feature vector from a code snippet (lexical,
//! comment, structural, naming, style and vocabulary signals) and scores it
//! with either a trained gradient-boosted model or a deterministic heuristic.
//!
//! ```no_run
//! use codeorigin::{extract_features, predict, HeuristicScorer};
//!
//! let features = extract_features("def f():\n    return 1\n", "python");
//! let decision = predict(&HeuristicScorer::default(), &features);
//! println!("{} ({:.0}%)", decision.label, decision.confidence * 100.0);
//! ```

pub mod classifier;
pub mod config;
pub mod features;
pub mod models;
pub mod pipeline;
pub mod reporters;

pub use classifier::{
    explain, load_scorer, predict, GbdtScorer, HeuristicPolicy, HeuristicScorer, Scorer,
    ScorerError, ScorerInput, SCORER_FEATURES, SCORER_SCHEMA_VERSION,
};
pub use config::DetectorConfig;
pub use features::{
    extract_features, extract_features_for, Feature, FeatureVector, FEATURE_SCHEMA_VERSION,
};
pub use models::{
    ClassProbabilities, ConfidenceLevel, Decision, DetectionReport, Label, Language, ScanReport,
};
pub use pipeline::{validate_submission, Detector, SubmissionError, SubmissionLimits};
