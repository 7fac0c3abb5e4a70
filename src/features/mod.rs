//! Feature extraction
//!
//! Turns raw source text into a fixed-schema [`FeatureVector`]. Each
//! analyzer owns a disjoint slice of the schema:
//!
//! - [`lexical`] - line and character statistics
//! - [`comments`] - comment extraction, ratios, AI-typical phrasing
//! - [`structure`] - functions, classes, control flow, complexity
//! - [`naming`] - identifier length and genericity
//! - [`style`] - indentation, spacing, naming conventions, formatting
//! - [`patterns`] - AI-typical vocabulary over the whole text
//!
//! Extraction never fails: analyzers that cannot run contribute zeros.

pub mod comments;
pub mod lexical;
pub mod naming;
pub mod patterns;
pub mod structure;
pub mod style;

use crate::models::Language;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Bumped whenever a key is added, removed, or reordered.
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

/// Number of keys in the feature schema.
pub const FEATURE_COUNT: usize = 50;

/// Every key of the feature schema, in schema order.
///
/// The discriminant of each variant is its slot in [`FeatureVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    // lexical
    LinesOfCode,
    NonEmptyLines,
    BlankLines,
    BlankLineRatio,
    AvgLineLength,
    MaxLineLength,
    TotalCharacters,
    AvgCharsPerLine,
    // comments
    CommentCount,
    CommentLines,
    CommentRatio,
    AvgCommentLength,
    AiCommentPatterns,
    // structure
    FunctionCount,
    ClassCount,
    ImportCount,
    LoopCount,
    IfCount,
    TryCount,
    ComplexityScore,
    ArrowFunctionCount,
    ConstCount,
    LetCount,
    VarCount,
    ForCount,
    WhileCount,
    ElseCount,
    SwitchCount,
    CaseCount,
    BreakCount,
    ContinueCount,
    ReturnCount,
    BraceCount,
    ParenCount,
    BracketCount,
    // naming
    AvgNameLength,
    GenericNameRatio,
    DescriptiveNameRatio,
    // style
    IndentationConsistency,
    AvgIndentation,
    MaxIndentation,
    SpacesAfterComma,
    SpacesAroundOperators,
    CamelCaseCount,
    SnakeCaseCount,
    UpperCaseCount,
    PerfectFormattingScore,
    // patterns
    AiVariableNames,
    AiFunctionNames,
    LongCommentCount,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::LinesOfCode,
        Feature::NonEmptyLines,
        Feature::BlankLines,
        Feature::BlankLineRatio,
        Feature::AvgLineLength,
        Feature::MaxLineLength,
        Feature::TotalCharacters,
        Feature::AvgCharsPerLine,
        Feature::CommentCount,
        Feature::CommentLines,
        Feature::CommentRatio,
        Feature::AvgCommentLength,
        Feature::AiCommentPatterns,
        Feature::FunctionCount,
        Feature::ClassCount,
        Feature::ImportCount,
        Feature::LoopCount,
        Feature::IfCount,
        Feature::TryCount,
        Feature::ComplexityScore,
        Feature::ArrowFunctionCount,
        Feature::ConstCount,
        Feature::LetCount,
        Feature::VarCount,
        Feature::ForCount,
        Feature::WhileCount,
        Feature::ElseCount,
        Feature::SwitchCount,
        Feature::CaseCount,
        Feature::BreakCount,
        Feature::ContinueCount,
        Feature::ReturnCount,
        Feature::BraceCount,
        Feature::ParenCount,
        Feature::BracketCount,
        Feature::AvgNameLength,
        Feature::GenericNameRatio,
        Feature::DescriptiveNameRatio,
        Feature::IndentationConsistency,
        Feature::AvgIndentation,
        Feature::MaxIndentation,
        Feature::SpacesAfterComma,
        Feature::SpacesAroundOperators,
        Feature::CamelCaseCount,
        Feature::SnakeCaseCount,
        Feature::UpperCaseCount,
        Feature::PerfectFormattingScore,
        Feature::AiVariableNames,
        Feature::AiFunctionNames,
        Feature::LongCommentCount,
    ];

    /// Schema key as it appears in serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::LinesOfCode => "lines_of_code",
            Feature::NonEmptyLines => "non_empty_lines",
            Feature::BlankLines => "blank_lines",
            Feature::BlankLineRatio => "blank_line_ratio",
            Feature::AvgLineLength => "avg_line_length",
            Feature::MaxLineLength => "max_line_length",
            Feature::TotalCharacters => "total_characters",
            Feature::AvgCharsPerLine => "avg_chars_per_line",
            Feature::CommentCount => "comment_count",
            Feature::CommentLines => "comment_lines",
            Feature::CommentRatio => "comment_ratio",
            Feature::AvgCommentLength => "avg_comment_length",
            Feature::AiCommentPatterns => "ai_comment_patterns",
            Feature::FunctionCount => "function_count",
            Feature::ClassCount => "class_count",
            Feature::ImportCount => "import_count",
            Feature::LoopCount => "loop_count",
            Feature::IfCount => "if_count",
            Feature::TryCount => "try_count",
            Feature::ComplexityScore => "complexity_score",
            Feature::ArrowFunctionCount => "arrow_function_count",
            Feature::ConstCount => "const_count",
            Feature::LetCount => "let_count",
            Feature::VarCount => "var_count",
            Feature::ForCount => "for_count",
            Feature::WhileCount => "while_count",
            Feature::ElseCount => "else_count",
            Feature::SwitchCount => "switch_count",
            Feature::CaseCount => "case_count",
            Feature::BreakCount => "break_count",
            Feature::ContinueCount => "continue_count",
            Feature::ReturnCount => "return_count",
            Feature::BraceCount => "brace_count",
            Feature::ParenCount => "paren_count",
            Feature::BracketCount => "bracket_count",
            Feature::AvgNameLength => "avg_name_length",
            Feature::GenericNameRatio => "generic_name_ratio",
            Feature::DescriptiveNameRatio => "descriptive_name_ratio",
            Feature::IndentationConsistency => "indentation_consistency",
            Feature::AvgIndentation => "avg_indentation",
            Feature::MaxIndentation => "max_indentation",
            Feature::SpacesAfterComma => "spaces_after_comma",
            Feature::SpacesAroundOperators => "spaces_around_operators",
            Feature::CamelCaseCount => "camelCase_count",
            Feature::SnakeCaseCount => "snake_case_count",
            Feature::UpperCaseCount => "UPPER_CASE_count",
            Feature::PerfectFormattingScore => "perfect_formatting_score",
            Feature::AiVariableNames => "ai_variable_names",
            Feature::AiFunctionNames => "ai_function_names",
            Feature::LongCommentCount => "long_comment_count",
        }
    }

    /// Look a key up by its schema name.
    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.name() == name)
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Analyzer output: `(key, value)` pairs destined for the assembler.
pub type FeatureEntries = Vec<(Feature, f64)>;

/// Complete, immutable feature vector for one code sample.
///
/// Every schema key is present and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// All-zero vector.
    pub fn zeroed() -> Self {
        Self {
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Merge analyzer outputs into one vector.
    ///
    /// The first writer of a key wins; later writes are dropped. Keys no
    /// analyzer produced stay 0.0, and non-finite values are stored as 0.0.
    pub fn assemble<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = FeatureEntries>,
    {
        let mut slots: [Option<f64>; FEATURE_COUNT] = [None; FEATURE_COUNT];
        for part in parts {
            for (feature, value) in part {
                let slot = &mut slots[feature.slot()];
                if slot.is_some() {
                    debug!("Ignoring duplicate write to feature {}", feature);
                    continue;
                }
                *slot = Some(finite_or_zero(value));
            }
        }

        let mut values = [0.0; FEATURE_COUNT];
        for (value, slot) in values.iter_mut().zip(slots) {
            *value = slot.unwrap_or(0.0);
        }
        Self { values }
    }

    /// Rebuild a vector from an external name -> value map.
    ///
    /// Missing keys, non-numeric values, and non-finite numbers become 0.0.
    /// Keys outside the schema are ignored.
    pub fn from_value_map(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut vector = Self::zeroed();
        for feature in Feature::ALL {
            let value = map
                .get(feature.name())
                .and_then(|v| match v {
                    serde_json::Value::Number(n) => n.as_f64(),
                    serde_json::Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                    serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                })
                .unwrap_or(0.0);
            vector.values[feature.slot()] = finite_or_zero(value);
        }
        vector
    }

    #[inline]
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.slot()]
    }

    /// Lookup by schema name; `None` for keys outside the schema.
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        Feature::from_name(name).map(|f| self.get(f))
    }

    /// `(key, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.name(), &value)?;
        }
        map.end()
    }
}

#[inline]
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// `numerator / max(denominator, 1)`
#[inline]
pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator.max(1) as f64
}

/// Extract the full feature vector for `text` written in `language`.
///
/// `language` is a free-form tag (`"python"`, `"js"`, ...); unrecognized tags
/// select the generic profile. Pure and deterministic.
pub fn extract_features(text: &str, language: &str) -> FeatureVector {
    extract_features_for(text, Language::from_tag(language))
}

/// [`extract_features`] with an already-resolved language.
pub fn extract_features_for(text: &str, language: Language) -> FeatureVector {
    let lexical = lexical::analyze(text);
    let comments = comments::analyze(text, language, lexical.lines_of_code);
    let structure = structure::analyze(text, language);
    let naming = naming::analyze(&structure.names);
    let style = style::analyze(text);
    let patterns = patterns::analyze(text);

    debug!(
        "Extracted features for {} ({} lines, {} functions)",
        language, lexical.lines_of_code, structure.counts.functions
    );

    FeatureVector::assemble([
        lexical.entries(),
        comments.entries(),
        structure.entries(),
        naming.entries(),
        style.entries(),
        patterns.entries(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_matches_discriminants() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.slot(), i, "{} is out of order", feature);
        }
    }

    #[test]
    fn test_schema_names_are_unique() {
        let mut names: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_from_name_round_trips() {
        assert_eq!(Feature::from_name("camelCase_count"), Some(Feature::CamelCaseCount));
        assert_eq!(Feature::from_name("not_a_feature"), None);
    }

    #[test]
    fn test_assemble_first_writer_wins() {
        let vector = FeatureVector::assemble([
            vec![(Feature::LinesOfCode, 3.0)],
            vec![(Feature::LinesOfCode, 99.0), (Feature::FunctionCount, 1.0)],
        ]);
        assert_eq!(vector.get(Feature::LinesOfCode), 3.0);
        assert_eq!(vector.get(Feature::FunctionCount), 1.0);
        assert_eq!(vector.get(Feature::ClassCount), 0.0);
    }

    #[test]
    fn test_assemble_replaces_non_finite() {
        let vector = FeatureVector::assemble([vec![
            (Feature::CommentRatio, f64::NAN),
            (Feature::AvgLineLength, f64::INFINITY),
        ]]);
        assert_eq!(vector.get(Feature::CommentRatio), 0.0);
        assert_eq!(vector.get(Feature::AvgLineLength), 0.0);
    }

    #[test]
    fn test_from_value_map_coerces() {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(
            r#"{"lines_of_code": 12, "comment_ratio": "0.25", "function_count": null,
                "class_count": [1], "extra_key": 5}"#,
        )
        .expect("valid json");
        let vector = FeatureVector::from_value_map(&map);
        assert_eq!(vector.get(Feature::LinesOfCode), 12.0);
        assert_eq!(vector.get(Feature::CommentRatio), 0.25);
        assert_eq!(vector.get(Feature::FunctionCount), 0.0);
        assert_eq!(vector.get(Feature::ClassCount), 0.0);
        assert_eq!(vector.get_by_name("extra_key"), None);
    }

    #[test]
    fn test_serializes_in_schema_order() {
        let json = serde_json::to_string(&FeatureVector::zeroed()).expect("serialize");
        let first = json.find("\"lines_of_code\"").expect("first key");
        let last = json.find("\"long_comment_count\"").expect("last key");
        assert!(first < last);
        let parsed: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&json).expect("parse back");
        assert_eq!(parsed.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_extract_features_python_function() {
        let features = extract_features("def f():\n    return 1\n", "python");
        assert_eq!(features.get(Feature::FunctionCount), 1.0);
        assert_eq!(features.get(Feature::LinesOfCode), 3.0);
        assert_eq!(features.get(Feature::ComplexityScore), 1.0);
    }

    #[test]
    fn test_extract_features_empty_is_all_zero() {
        let features = extract_features("", "python");
        for (feature, value) in features.iter() {
            assert_eq!(value, 0.0, "{} should be zero", feature);
        }
    }
}
