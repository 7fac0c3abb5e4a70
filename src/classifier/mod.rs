//! Scoring and explanation
//!
//! A [`Scorer`] turns fixed-order [`ScorerInput`] rows into class labels and
//! probabilities. Two implementations ship:
//!
//! - [`HeuristicScorer`] - deterministic weighted rules, always available
//! - [`GbdtScorer`] - a trained gradient-boosted model loaded from disk
//!
//! [`predict`] wraps any scorer into a labeled, explained [`Decision`] and
//! never fails: scorer errors and panics degrade to an `Unknown` decision.

pub mod explain;
pub mod gbdt_model;
pub mod heuristic;
pub mod schema;

pub use explain::explain;
pub use gbdt_model::GbdtScorer;
pub use heuristic::{HeuristicPolicy, HeuristicScorer, Indicator};
pub use schema::{ScorerInput, SCORER_FEATURES, SCORER_INPUT_LEN, SCORER_SCHEMA_VERSION};

use crate::features::FeatureVector;
use crate::models::{Authorship, ClassProbabilities, Decision, Label};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("failed to load model from {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("model error: {0}")]
    Model(String),

    #[error("scorer returned {got} results for a batch of {expected}")]
    BatchMismatch { expected: usize, got: usize },

    #[error("scorer returned malformed probabilities (human {human}, ai {ai})")]
    MalformedProbabilities { human: f64, ai: f64 },

    #[error("scorer panicked: {0}")]
    Panicked(String),
}

pub type ScorerResult<T> = Result<T, ScorerError>;

/// A binary AI-vs-human classifier over scorer inputs.
///
/// Both methods return one entry per input row, in order.
pub trait Scorer: Send + Sync {
    /// Short identifier for logs and reports.
    fn name(&self) -> &str;

    fn predict(&self, batch: &[ScorerInput]) -> ScorerResult<Vec<Authorship>>;

    fn predict_proba(&self, batch: &[ScorerInput]) -> ScorerResult<Vec<ClassProbabilities>>;
}

/// Score one feature vector and explain the result.
///
/// Never panics and never returns an error; failures produce
/// [`Decision::fallback`].
pub fn predict(scorer: &dyn Scorer, features: &FeatureVector) -> Decision {
    match score_one(scorer, features) {
        Ok((class, probabilities)) => {
            let label = Label::from(class);
            let confidence = probabilities.of(class);
            debug!(
                "Scorer {} labeled sample {} ({:.3})",
                scorer.name(),
                label,
                confidence
            );
            Decision {
                label,
                confidence,
                probabilities,
                reasons: explain(features, label, confidence),
            }
        }
        Err(e) => {
            error!("Scorer {} failed: {}", scorer.name(), e);
            Decision::fallback(e)
        }
    }
}

fn score_one(
    scorer: &dyn Scorer,
    features: &FeatureVector,
) -> ScorerResult<(Authorship, ClassProbabilities)> {
    let batch = [ScorerInput::from_features(features)];

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let labels = scorer.predict(&batch)?;
        let probabilities = scorer.predict_proba(&batch)?;
        Ok::<_, ScorerError>((labels, probabilities))
    }));

    let (labels, probabilities) = match outcome {
        Ok(result) => result?,
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            return Err(ScorerError::Panicked(panic_msg));
        }
    };

    let (&class, &probs) = match (labels.as_slice(), probabilities.as_slice()) {
        ([class], [probs]) => (class, probs),
        _ => {
            return Err(ScorerError::BatchMismatch {
                expected: 1,
                got: labels.len().max(probabilities.len()),
            })
        }
    };

    if !probs.is_well_formed() {
        return Err(ScorerError::MalformedProbabilities {
            human: probs.human,
            ai: probs.ai,
        });
    }
    Ok((class, probs))
}

/// Load the trained model at `model_path`, or fall back to the heuristic.
///
/// Called once by the owner of a detector; the result is shared read-only.
pub fn load_scorer(model_path: Option<&Path>, policy: HeuristicPolicy) -> Box<dyn Scorer> {
    if let Some(path) = model_path {
        if path.exists() {
            match GbdtScorer::load(path) {
                Ok(model) => {
                    debug!("Loaded trained model from {}", path.display());
                    return Box::new(model);
                }
                Err(e) => warn!("{}; using heuristic scorer", e),
            }
        } else {
            warn!(
                "Model file {} not found; using heuristic scorer",
                path.display()
            );
        }
    }
    Box::new(HeuristicScorer::new(policy))
}
