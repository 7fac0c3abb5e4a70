//! Trained-model adapter over the `gbdt` crate
//!
//! Loads a gradient-boosted model from the gbdt-rs JSON format or an XGBoost
//! JSON dump and exposes it as a [`Scorer`]. The model output is read as the
//! probability that a sample is AI-generated.
//!
//! Note: the gbdt crate works in `f32` (`ValueType`) while scorer inputs are
//! `f64`. Conversion happens at this boundary.

use std::io::{BufReader, Cursor};
use std::path::Path;

use gbdt::decision_tree::Data;
use gbdt::gradient_boost::GBDT;

use super::schema::ScorerInput;
use super::{Scorer, ScorerError, ScorerResult};
use crate::models::{Authorship, ClassProbabilities};

const XGBOOST_OBJECTIVE: &str = "binary:logistic";

pub struct GbdtScorer {
    model: GBDT,
}

impl GbdtScorer {
    /// Load a model from disk.
    ///
    /// Tries the gbdt-rs native format first, then an XGBoost JSON dump.
    pub fn load(path: &Path) -> ScorerResult<Self> {
        let load_error = |message: String| ScorerError::Load {
            path: path.to_path_buf(),
            message,
        };
        let path_str = path
            .to_str()
            .ok_or_else(|| load_error("invalid UTF-8 in model path".to_string()))?;

        match GBDT::load_model(path_str) {
            Ok(model) => Ok(Self { model }),
            Err(native_err) => GBDT::from_xgboost_dump(path_str, XGBOOST_OBJECTIVE)
                .map(|model| Self { model })
                .map_err(|xgb_err| {
                    load_error(format!(
                        "not a gbdt model ({native_err}) nor an XGBoost dump ({xgb_err})"
                    ))
                }),
        }
    }

    /// Load a model from a JSON string (gbdt-rs native format).
    pub fn from_json(json: &str) -> ScorerResult<Self> {
        let model: GBDT = serde_json::from_str(json)
            .map_err(|e| ScorerError::Model(format!("failed to parse GBDT JSON: {e}")))?;
        Ok(Self { model })
    }

    /// Load a model from an XGBoost JSON dump string.
    pub fn from_xgboost_json(json: &str) -> ScorerResult<Self> {
        let reader = BufReader::new(Cursor::new(json));
        let model = GBDT::from_xgboost_reader(reader, XGBOOST_OBJECTIVE)
            .map_err(|e| ScorerError::Model(format!("failed to parse XGBoost JSON: {e}")))?;
        Ok(Self { model })
    }

    /// Wrap an already-trained `GBDT` instance.
    pub fn from_trained(model: GBDT) -> Self {
        Self { model }
    }

    /// Raw AI probabilities, one per row.
    fn ai_probabilities(&self, batch: &[ScorerInput]) -> ScorerResult<Vec<f64>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        let data: Vec<Data> = batch
            .iter()
            .map(|input| Data::new_test_data(input.to_f32(), None))
            .collect();

        let preds = self.model.predict(&data);
        if preds.len() != batch.len() {
            return Err(ScorerError::BatchMismatch {
                expected: batch.len(),
                got: preds.len(),
            });
        }
        Ok(preds.into_iter().map(|p| p as f64).collect())
    }
}

impl Scorer for GbdtScorer {
    fn name(&self) -> &str {
        "gbdt"
    }

    fn predict(&self, batch: &[ScorerInput]) -> ScorerResult<Vec<Authorship>> {
        Ok(self
            .ai_probabilities(batch)?
            .into_iter()
            .map(|p| {
                if p >= 0.5 {
                    Authorship::Ai
                } else {
                    Authorship::Human
                }
            })
            .collect())
    }

    fn predict_proba(&self, batch: &[ScorerInput]) -> ScorerResult<Vec<ClassProbabilities>> {
        Ok(self
            .ai_probabilities(batch)?
            .into_iter()
            .map(ClassProbabilities::from_ai)
            .collect())
    }
}
