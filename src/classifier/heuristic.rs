//! Rule-weighted fallback scorer
//!
//! Starts from a neutral 0.5 and moves toward AI or human by a weighted
//! average of bounded indicator strengths. Each indicator maps a feature to
//! a strength in [-1, 1]: -1 at or below its human threshold, +1 at or above
//! its AI threshold, linear in between.
//!
//! Weights and thresholds are uncalibrated defaults; deployments tune them
//! through the `[heuristic]` config table.

use super::schema::ScorerInput;
use super::{Scorer, ScorerResult};
use crate::features::Feature;
use crate::models::{Authorship, ClassProbabilities};
use serde::{Deserialize, Serialize};

/// One thresholded signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub weight: f64,
    pub human_threshold: f64,
    pub ai_threshold: f64,
}

impl Indicator {
    pub const fn new(weight: f64, human_threshold: f64, ai_threshold: f64) -> Self {
        Self {
            weight,
            human_threshold,
            ai_threshold,
        }
    }

    /// Strength in [-1, 1]. A non-increasing threshold pair contributes 0.
    pub fn strength(&self, value: f64) -> f64 {
        let span = self.ai_threshold - self.human_threshold;
        if span.is_nan() || span <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        (2.0 * (value - self.human_threshold) / span - 1.0).clamp(-1.0, 1.0)
    }
}

/// Band signal on complexity per line: inside the band reads as AI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityBand {
    pub weight: f64,
    pub low: f64,
    pub high: f64,
}

impl ComplexityBand {
    pub fn strength(&self, complexity: f64, lines: f64) -> f64 {
        if complexity <= 0.0 || lines <= 0.0 {
            return 0.0;
        }
        let per_line = complexity / lines;
        if (self.low..=self.high).contains(&per_line) {
            1.0
        } else {
            -1.0
        }
    }
}

/// Full weight and threshold table of the heuristic scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicPolicy {
    pub perfect_formatting: Indicator,
    pub ai_variable_names: Indicator,
    pub ai_function_names: Indicator,
    pub generic_names: Indicator,
    pub ai_comment_phrases: Indicator,
    pub long_comments: Indicator,
    pub indentation: Indicator,
    pub comment_ratio: Indicator,
    pub complexity_per_line: ComplexityBand,
    /// Lowest AI probability the scorer reports
    pub probability_floor: f64,
    /// Highest AI probability the scorer reports
    pub probability_ceiling: f64,
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self {
            perfect_formatting: Indicator::new(0.25, 0.5, 0.8),
            ai_variable_names: Indicator::new(0.15, 1.0, 3.0),
            ai_function_names: Indicator::new(0.10, 0.0, 2.0),
            generic_names: Indicator::new(0.10, 0.2, 0.3),
            ai_comment_phrases: Indicator::new(0.15, 0.0, 1.0),
            long_comments: Indicator::new(0.05, 0.0, 1.0),
            indentation: Indicator::new(0.10, 0.8, 0.95),
            comment_ratio: Indicator::new(0.05, 0.2, 0.3),
            complexity_per_line: ComplexityBand {
                weight: 0.05,
                low: 0.2,
                high: 0.4,
            },
            probability_floor: 0.15,
            probability_ceiling: 0.85,
        }
    }
}

impl HeuristicPolicy {
    fn indicators(&self) -> [(Feature, &Indicator); 8] {
        [
            (Feature::PerfectFormattingScore, &self.perfect_formatting),
            (Feature::AiVariableNames, &self.ai_variable_names),
            (Feature::AiFunctionNames, &self.ai_function_names),
            (Feature::GenericNameRatio, &self.generic_names),
            (Feature::AiCommentPatterns, &self.ai_comment_phrases),
            (Feature::LongCommentCount, &self.long_comments),
            (Feature::IndentationConsistency, &self.indentation),
            (Feature::CommentRatio, &self.comment_ratio),
        ]
    }

    /// Floor and ceiling, repaired if misconfigured.
    fn bounds(&self) -> (f64, f64) {
        let floor = if self.probability_floor.is_finite() {
            self.probability_floor.clamp(0.0, 0.5)
        } else {
            0.0
        };
        let ceiling = if self.probability_ceiling.is_finite() {
            self.probability_ceiling.clamp(0.5, 1.0)
        } else {
            1.0
        };
        (floor, ceiling)
    }
}

pub struct HeuristicScorer {
    policy: HeuristicPolicy,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(HeuristicPolicy::default())
    }
}

impl HeuristicScorer {
    pub fn new(policy: HeuristicPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &HeuristicPolicy {
        &self.policy
    }

    /// AI probability for one input row.
    pub fn score(&self, input: &ScorerInput) -> f64 {
        let lines = input.get(Feature::LinesOfCode);
        let (floor, ceiling) = self.policy.bounds();

        // nothing to judge
        if lines <= 0.0 {
            return 0.5_f64.clamp(floor, ceiling);
        }

        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for (feature, indicator) in self.policy.indicators() {
            let weight = indicator.weight.max(0.0);
            weighted += weight * indicator.strength(input.get(feature));
            total_weight += weight;
        }

        let band = &self.policy.complexity_per_line;
        let band_weight = band.weight.max(0.0);
        weighted += band_weight * band.strength(input.get(Feature::ComplexityScore), lines);
        total_weight += band_weight;

        let raw = if total_weight > 0.0 && total_weight.is_finite() {
            0.5 + 0.5 * weighted / total_weight
        } else {
            0.5
        };
        raw.clamp(floor, ceiling)
    }
}

impl Scorer for HeuristicScorer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn predict(&self, batch: &[ScorerInput]) -> ScorerResult<Vec<Authorship>> {
        Ok(batch
            .iter()
            .map(|input| {
                if self.score(input) > 0.5 {
                    Authorship::Ai
                } else {
                    Authorship::Human
                }
            })
            .collect())
    }

    fn predict_proba(&self, batch: &[ScorerInput]) -> ScorerResult<Vec<ClassProbabilities>> {
        Ok(batch
            .iter()
            .map(|input| ClassProbabilities::from_ai(self.score(input)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::schema::SCORER_INPUT_LEN;
    use crate::features::extract_features;

    fn input_for(code: &str, language: &str) -> ScorerInput {
        ScorerInput::from_features(&extract_features(code, language))
    }

    #[test]
    fn test_indicator_strength() {
        let indicator = Indicator::new(1.0, 0.5, 0.8);
        assert_eq!(indicator.strength(0.2), -1.0);
        assert_eq!(indicator.strength(0.5), -1.0);
        assert!(indicator.strength(0.65).abs() < 1e-12);
        assert_eq!(indicator.strength(0.8), 1.0);
        assert_eq!(indicator.strength(5.0), 1.0);
        assert_eq!(Indicator::new(1.0, 0.8, 0.5).strength(0.9), 0.0);
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let scorer = HeuristicScorer::default();
        assert_eq!(scorer.score(&input_for("", "python")), 0.5);
        let labels = scorer.predict(&[input_for("", "python")]).expect("heuristic never fails");
        assert_eq!(labels, vec![Authorship::Human]);
    }

    #[test]
    fn test_probability_bounds() {
        let scorer = HeuristicScorer::default();
        let mut extreme = [1e9; SCORER_INPUT_LEN];
        let high = scorer.score(&ScorerInput::from_values(extreme));
        extreme = [-1e9; SCORER_INPUT_LEN];
        extreme[0] = 10.0;
        let low = scorer.score(&ScorerInput::from_values(extreme));
        assert!((0.15..=0.85).contains(&high));
        assert!((0.15..=0.85).contains(&low));
        assert!(high > low);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let scorer = HeuristicScorer::default();
        let batch = [
            input_for("def f():\n    return 1\n", "python"),
            input_for("const x = 1;", "js"),
        ];
        for probs in scorer.predict_proba(&batch).expect("heuristic never fails") {
            assert!((probs.human + probs.ai - 1.0).abs() <= f64::EPSILON);
        }
    }

    #[test]
    fn test_terse_code_leans_human() {
        let scorer = HeuristicScorer::default();
        let p = scorer.score(&input_for("def f():\n    return 1\n", "python"));
        assert!(p < 0.5, "expected human lean, got {p}");
    }

    #[test]
    fn test_assistant_style_code_leans_ai() {
        let code = "# Here's a function that processes the data\n\
# Note that this will handle the result\n\
def process_data(data):\n    result = []\n    for item in data:\n        result.append(item)\n    return result";
        let scorer = HeuristicScorer::default();
        let p = scorer.score(&input_for(code, "python"));
        assert!(p > 0.5, "expected AI lean, got {p}");
    }

    #[test]
    fn test_deterministic() {
        let scorer = HeuristicScorer::default();
        let input = input_for("x = compute(a, b)\n", "python");
        assert_eq!(scorer.score(&input), scorer.score(&input));
    }

    #[test]
    fn test_policy_from_toml() {
        let policy: HeuristicPolicy = toml::from_str(
            r#"
probability_floor = 0.1
[perfect_formatting]
weight = 0.5
human_threshold = 0.4
ai_threshold = 0.9
"#,
        )
        .expect("valid policy");
        assert_eq!(policy.probability_floor, 0.1);
        assert_eq!(policy.perfect_formatting, Indicator::new(0.5, 0.4, 0.9));
        assert_eq!(policy.indentation, HeuristicPolicy::default().indentation);
    }

    #[test]
    fn test_misconfigured_bounds_are_repaired() {
        let policy = HeuristicPolicy {
            probability_floor: 0.9,
            probability_ceiling: f64::NAN,
            ..Default::default()
        };
        let scorer = HeuristicScorer::new(policy);
        let p = scorer.score(&input_for("def f():\n    return 1\n", "python"));
        assert!((0.0..=1.0).contains(&p));
    }
}
