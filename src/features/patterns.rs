//! AI-typical vocabulary and long explanatory comments over the raw text

use super::{Feature, FeatureEntries};
use regex::Regex;
use std::sync::OnceLock;

/// Variable names assistants reach for by default
const AI_VARIABLE_WORDS: &[&str] = &[
    "result", "output", "data", "value", "item", "element", "temp", "tmp", "response",
    "request", "params", "config", "settings", "options",
];

/// Verbs assistants like in function names
const AI_FUNCTION_WORDS: &[&str] = &[
    "process",
    "handle",
    "execute",
    "run",
    "perform",
    "calculate",
    "generate",
    "create",
    "build",
    "construct",
    "initialize",
];

static AI_VARIABLE: OnceLock<Regex> = OnceLock::new();
static AI_FUNCTION: OnceLock<Regex> = OnceLock::new();
static LONG_COMMENT: OnceLock<Regex> = OnceLock::new();

fn word_set(words: &[&str]) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).expect("valid regex")
}

fn ai_variable_re() -> &'static Regex {
    AI_VARIABLE.get_or_init(|| word_set(AI_VARIABLE_WORDS))
}

fn ai_function_re() -> &'static Regex {
    AI_FUNCTION.get_or_init(|| word_set(AI_FUNCTION_WORDS))
}

fn long_comment_re() -> &'static Regex {
    LONG_COMMENT.get_or_init(|| {
        Regex::new(r"#[^\n]{50,}|//[^\n]{50,}|/\*[\s\S]{100,}\*/").expect("valid regex")
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternMetrics {
    pub ai_variable_names: usize,
    pub ai_function_names: usize,
    pub long_comment_count: usize,
}

impl PatternMetrics {
    pub fn entries(&self) -> FeatureEntries {
        vec![
            (Feature::AiVariableNames, self.ai_variable_names as f64),
            (Feature::AiFunctionNames, self.ai_function_names as f64),
            (Feature::LongCommentCount, self.long_comment_count as f64),
        ]
    }
}

pub fn analyze(text: &str) -> PatternMetrics {
    PatternMetrics {
        ai_variable_names: ai_variable_re().find_iter(text).count(),
        ai_function_names: ai_function_re().find_iter(text).count(),
        long_comment_count: long_comment_re().find_iter(text).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_case_insensitive() {
        let metrics = analyze("Result = fetch(data)\nmetadata = results\nTMP = 1\n");
        // Result, data, TMP; not metadata or results
        assert_eq!(metrics.ai_variable_names, 3);
    }

    #[test]
    fn test_function_words() {
        let metrics = analyze("def process(x):\n    handle(x)\n    process_all(x)\n");
        assert_eq!(metrics.ai_function_names, 2);
    }

    #[test]
    fn test_long_comments() {
        let long = format!("# {}\n// {}\n# short\n", "a".repeat(60), "b".repeat(60));
        assert_eq!(analyze(&long).long_comment_count, 2);
        let block = format!("/* {} */", "c".repeat(100));
        assert_eq!(analyze(&block).long_comment_count, 1);
    }

    #[test]
    fn test_empty() {
        assert_eq!(analyze(""), PatternMetrics::default());
    }
}
