//! Natural-language justification of a decision
//!
//! The first reason always describes the confidence band. Rule reasons
//! follow in a fixed order, from the rule set matching the label.

use crate::features::{Feature, FeatureVector};
use crate::models::{ConfidenceLevel, Label};

/// A rule fires when `applies` holds and renders its reason with `message`.
struct Rule {
    applies: fn(&FeatureVector) -> bool,
    message: fn(&FeatureVector) -> String,
}

const AI_RULES: &[Rule] = &[
    Rule {
        applies: |f| f.get(Feature::PerfectFormattingScore) > 0.8,
        message: |_| "Consistently perfect formatting suggests AI generation".into(),
    },
    Rule {
        applies: |f| f.get(Feature::AiVariableNames) > 2.0,
        message: |f| {
            format!(
                "High use of AI-typical variable names (found {})",
                count(f.get(Feature::AiVariableNames))
            )
        },
    },
    Rule {
        applies: |f| f.get(Feature::GenericNameRatio) > 0.3,
        message: |f| {
            format!(
                "High ratio of generic variable names ({})",
                percent(f.get(Feature::GenericNameRatio))
            )
        },
    },
    Rule {
        applies: |f| f.get(Feature::AiCommentPatterns) > 0.0,
        message: |f| {
            format!(
                "Contains AI-typical comment patterns ({} found)",
                count(f.get(Feature::AiCommentPatterns))
            )
        },
    },
    Rule {
        applies: |f| f.get(Feature::LongCommentCount) > 0.0,
        message: |_| "Contains overly detailed explanatory comments".into(),
    },
    Rule {
        applies: |f| f.get(Feature::IndentationConsistency) > 0.95,
        message: |_| "Extremely consistent indentation typical of AI".into(),
    },
    Rule {
        applies: |f| f.get(Feature::ComplexityScore) > 5.0 && f.get(Feature::FunctionCount) > 2.0,
        message: |_| "Well-structured code with moderate complexity typical of AI".into(),
    },
    Rule {
        applies: |f| f.get(Feature::CommentRatio) > 0.3,
        message: |f| {
            format!(
                "High comment-to-code ratio ({}) suggests AI",
                percent(f.get(Feature::CommentRatio))
            )
        },
    },
];

const HUMAN_RULES: &[Rule] = &[
    Rule {
        applies: |f| f.get(Feature::PerfectFormattingScore) < 0.5,
        message: |_| "Inconsistent formatting suggests human authorship".into(),
    },
    Rule {
        applies: |f| f.get(Feature::AiVariableNames) <= 1.0 && f.get(Feature::AiCommentPatterns) == 0.0,
        message: |_| "Lacks typical AI code generation patterns".into(),
    },
    Rule {
        applies: |f| f.get(Feature::IndentationConsistency) < 0.8,
        message: |_| "Inconsistent indentation patterns suggest human writing".into(),
    },
    Rule {
        applies: |f| f.get(Feature::GenericNameRatio) < 0.2,
        message: |_| "Diverse, specific variable naming typical of humans".into(),
    },
    Rule {
        applies: |f| f.get(Feature::CommentRatio) < 0.2 && f.get(Feature::LongCommentCount) == 0.0,
        message: |_| "Natural commenting style suggests human authorship".into(),
    },
    Rule {
        applies: |f| {
            let complexity = f.get(Feature::ComplexityScore);
            let lines = f.get(Feature::LinesOfCode);
            complexity > 0.0 && lines > 20.0 && complexity / lines < 0.3
        },
        message: |_| "Code complexity patterns suggest human writing style".into(),
    },
    Rule {
        applies: |f| f.get(Feature::CamelCaseCount) > 0.0 && f.get(Feature::SnakeCaseCount) > 0.0,
        message: |_| "Mixed naming conventions suggest human inconsistency".into(),
    },
];

/// `0.853` -> `85.3%`
fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Whole counts print without a fractional part.
fn count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn confidence_reason(label: Label, confidence: f64) -> String {
    let band = match ConfidenceLevel::from_confidence(confidence) {
        ConfidenceLevel::VeryHigh => "Very high",
        ConfidenceLevel::High => "High",
        ConfidenceLevel::Medium => "Moderate",
        ConfidenceLevel::Low => {
            return format!("Low confidence ({}) - results uncertain", percent(confidence))
        }
    };
    format!(
        "{} confidence ({}) in {} authorship",
        band,
        percent(confidence),
        label.to_string().to_lowercase()
    )
}

/// Ordered reasons for `label` at `confidence`.
///
/// `Unknown` gets only the confidence sentence.
pub fn explain(features: &FeatureVector, label: Label, confidence: f64) -> Vec<String> {
    let mut reasons = vec![confidence_reason(label, confidence)];
    let rules: &[Rule] = match label {
        Label::Ai => AI_RULES,
        Label::Human => HUMAN_RULES,
        Label::Unknown => &[],
    };
    reasons.extend(
        rules
            .iter()
            .filter(|rule| (rule.applies)(features))
            .map(|rule| (rule.message)(features)),
    );
    reasons
}
