//! Comment extraction and AI-typical comment phrasing
//!
//! Comments are recognized per [`CommentStyle`]. Unterminated block comments
//! do not match and are simply not counted.

use super::{ratio, Feature, FeatureEntries};
use crate::models::{CommentStyle, Language};
use regex::Regex;
use std::sync::OnceLock;

/// Phrases assistants tend to put in explanatory comments.
const AI_COMMENT_PHRASES: &[&str] = &[
    "here's",
    "here is",
    "this code",
    "this function",
    "this will",
    "note that",
    "make sure",
    "don't forget",
    "remember to",
    "you can",
    "you should",
    "you might",
    "if you want",
    "alternatively",
    "optionally",
    "example usage",
];

static HASH_LINE: OnceLock<Regex> = OnceLock::new();
static HASH_BLOCK: OnceLock<Regex> = OnceLock::new();
static SLASH_LINE: OnceLock<Regex> = OnceLock::new();
static SLASH_BLOCK: OnceLock<Regex> = OnceLock::new();
static ANY_LINE: OnceLock<Regex> = OnceLock::new();
static ANY_BLOCK: OnceLock<Regex> = OnceLock::new();

fn hash_line() -> &'static Regex {
    HASH_LINE.get_or_init(|| Regex::new(r"#.*").expect("valid regex"))
}

fn hash_block() -> &'static Regex {
    HASH_BLOCK.get_or_init(|| {
        Regex::new(r#""""[\s\S]*?"""|'''[\s\S]*?'''"#).expect("valid regex")
    })
}

fn slash_line() -> &'static Regex {
    SLASH_LINE.get_or_init(|| Regex::new(r"//.*").expect("valid regex"))
}

fn slash_block() -> &'static Regex {
    SLASH_BLOCK.get_or_init(|| Regex::new(r"/\*[\s\S]*?\*/").expect("valid regex"))
}

fn any_line() -> &'static Regex {
    ANY_LINE.get_or_init(|| Regex::new(r"#.*|//.*").expect("valid regex"))
}

fn any_block() -> &'static Regex {
    ANY_BLOCK.get_or_init(|| {
        Regex::new(r#"/\*[\s\S]*?\*/|"""[\s\S]*?"""|'''[\s\S]*?'''"#).expect("valid regex")
    })
}

fn patterns_for(style: CommentStyle) -> (&'static Regex, &'static Regex) {
    match style {
        CommentStyle::Hash => (hash_line(), hash_block()),
        CommentStyle::Slash => (slash_line(), slash_block()),
        CommentStyle::Permissive => (any_line(), any_block()),
    }
}

/// Comments found in a sample, split by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedComments<'a> {
    pub single_line: Vec<&'a str>,
    pub blocks: Vec<&'a str>,
}

impl<'a> ExtractedComments<'a> {
    pub fn len(&self) -> usize {
        self.single_line.len() + self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical lines covered: one per line comment, newlines + 1 per block.
    pub fn line_count(&self) -> usize {
        let block_lines: usize = self
            .blocks
            .iter()
            .map(|b| b.matches('\n').count() + 1)
            .sum();
        block_lines + self.single_line.len()
    }

    pub fn all(&self) -> impl Iterator<Item = &&'a str> {
        self.single_line.iter().chain(self.blocks.iter())
    }
}

pub fn extract(text: &str, style: CommentStyle) -> ExtractedComments<'_> {
    let (line_re, block_re) = patterns_for(style);
    ExtractedComments {
        single_line: line_re.find_iter(text).map(|m| m.as_str()).collect(),
        blocks: block_re.find_iter(text).map(|m| m.as_str()).collect(),
    }
}

/// Number of distinct AI-typical phrases present in the comment text.
pub fn count_ai_phrases(comments: &ExtractedComments<'_>) -> usize {
    let joined = comments
        .all()
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    AI_COMMENT_PHRASES
        .iter()
        .filter(|phrase| joined.contains(*phrase))
        .count()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentMetrics {
    pub comment_count: usize,
    pub comment_lines: usize,
    pub comment_ratio: f64,
    pub avg_comment_length: f64,
    pub ai_comment_patterns: usize,
}

impl CommentMetrics {
    pub fn entries(&self) -> FeatureEntries {
        vec![
            (Feature::CommentCount, self.comment_count as f64),
            (Feature::CommentLines, self.comment_lines as f64),
            (Feature::CommentRatio, self.comment_ratio),
            (Feature::AvgCommentLength, self.avg_comment_length),
            (Feature::AiCommentPatterns, self.ai_comment_patterns as f64),
        ]
    }
}

/// `total_lines` is the lexical line count of the same text.
pub fn analyze(text: &str, language: Language, total_lines: usize) -> CommentMetrics {
    let comments = extract(text, language.comment_style());
    if comments.is_empty() {
        return CommentMetrics::default();
    }

    let comment_lines = comments.line_count();
    let total_length: usize = comments.all().map(|c| c.chars().count()).sum();

    CommentMetrics {
        comment_count: comments.len(),
        comment_lines,
        comment_ratio: ratio(comment_lines, total_lines),
        avg_comment_length: ratio(total_length, comments.len()),
        ai_comment_patterns: count_ai_phrases(&comments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_comments() {
        let code = "# first\nx = 1  # second\n\"\"\"doc\nstring\"\"\"\n";
        let comments = extract(code, CommentStyle::Hash);
        assert_eq!(comments.single_line, vec!["# first", "# second"]);
        assert_eq!(comments.blocks.len(), 1);
        assert_eq!(comments.line_count(), 4);
    }

    #[test]
    fn test_slash_comments() {
        let code = "// one\nlet x = 1; /* a\nb\nc */\n# not a comment";
        let comments = extract(code, CommentStyle::Slash);
        assert_eq!(comments.single_line, vec!["// one"]);
        assert_eq!(comments.blocks, vec!["/* a\nb\nc */"]);
        assert_eq!(comments.line_count(), 4);
    }

    #[test]
    fn test_permissive_takes_both_styles() {
        let code = "# hash\n// slash\n/* block */";
        let comments = extract(code, CommentStyle::Permissive);
        assert_eq!(comments.len(), 3);
    }

    #[test]
    fn test_unterminated_block_is_ignored() {
        let comments = extract("/* never closed\nint x;", CommentStyle::Slash);
        assert!(comments.blocks.is_empty());
    }

    #[test]
    fn test_ai_phrases_counted_once_each() {
        let code = "# This code performs the work\n# Here's how it works\n# this code again\n";
        let metrics = analyze(code, Language::Python, 4);
        assert_eq!(metrics.ai_comment_patterns, 2);
        assert_eq!(metrics.comment_count, 3);
        assert_eq!(metrics.comment_ratio, 0.75);
    }

    #[test]
    fn test_no_comments() {
        let metrics = analyze("x = 1\n", Language::Python, 2);
        assert_eq!(metrics, CommentMetrics::default());
    }

    #[test]
    fn test_average_length() {
        let metrics = analyze("// ab\n// abcd", Language::JavaScript, 2);
        assert_eq!(metrics.avg_comment_length, 6.0);
    }
}
