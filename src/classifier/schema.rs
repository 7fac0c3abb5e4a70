//! Scorer input schema
//!
//! Scorers see a fixed 16-slot projection of the feature vector. Trained
//! models depend on the exact slot order, so any change here must bump
//! [`SCORER_SCHEMA_VERSION`].

use crate::features::{finite_or_zero, Feature, FeatureVector};

pub const SCORER_SCHEMA_VERSION: u32 = 1;

pub const SCORER_INPUT_LEN: usize = 16;

/// Slot order of [`ScorerInput`].
pub const SCORER_FEATURES: [Feature; SCORER_INPUT_LEN] = [
    Feature::LinesOfCode,
    Feature::AvgLineLength,
    Feature::CommentRatio,
    Feature::FunctionCount,
    Feature::ComplexityScore,
    Feature::IndentationConsistency,
    Feature::AiVariableNames,
    Feature::AiFunctionNames,
    Feature::GenericNameRatio,
    Feature::PerfectFormattingScore,
    Feature::AiCommentPatterns,
    Feature::BlankLineRatio,
    Feature::AvgCommentLength,
    Feature::CamelCaseCount,
    Feature::SnakeCaseCount,
    Feature::LongCommentCount,
];

/// Fixed-order numeric input for a [`super::Scorer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorerInput {
    values: [f64; SCORER_INPUT_LEN],
}

impl ScorerInput {
    /// Project a feature vector onto the scorer slots.
    pub fn from_features(features: &FeatureVector) -> Self {
        let mut values = [0.0; SCORER_INPUT_LEN];
        for (value, feature) in values.iter_mut().zip(SCORER_FEATURES) {
            *value = finite_or_zero(features.get(feature));
        }
        Self { values }
    }

    /// Build from raw slot values; non-finite values become 0.0.
    pub fn from_values(values: [f64; SCORER_INPUT_LEN]) -> Self {
        Self {
            values: values.map(finite_or_zero),
        }
    }

    /// Value of `feature`, or 0.0 when it is not a scorer slot.
    pub fn get(&self, feature: Feature) -> f64 {
        SCORER_FEATURES
            .iter()
            .position(|&f| f == feature)
            .map(|i| self.values[i])
            .unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Narrowed copy for models that work in `f32`.
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}
