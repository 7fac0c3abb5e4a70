//! Formatting style: indentation, spacing, naming conventions

use super::lexical::split_lines;
use super::{Feature, FeatureEntries};
use regex::Regex;
use std::sync::OnceLock;

/// Lines longer than this count against formatting perfection.
const LONG_LINE: usize = 100;
/// Maximum share of long lines that still passes the line-length check.
const LONG_LINE_TOLERANCE: f64 = 0.1;

struct StylePatterns {
    comma_spaced: Regex,
    comma_tight: Regex,
    operator_spaced: Regex,
    /// Wider operator set used by the formatting-perfection check
    comparison_spaced: Regex,
    comparison_tight: Regex,
    camel_case: Regex,
    snake_case: Regex,
    upper_case: Regex,
}

static PATTERNS: OnceLock<StylePatterns> = OnceLock::new();

fn patterns() -> &'static StylePatterns {
    PATTERNS.get_or_init(|| {
        let re = |p: &str| Regex::new(p).expect("valid regex");
        StylePatterns {
            comma_spaced: re(r",\s"),
            comma_tight: re(r",[^\s]"),
            operator_spaced: re(r"\s[+\-*/=]\s"),
            comparison_spaced: re(r"\s[+\-*/=<>!]=?\s"),
            comparison_tight: re(r"[^\s][+\-*/=<>!]=?[^\s]"),
            camel_case: re(r"\b[a-z]+[A-Z][a-zA-Z]*\b"),
            snake_case: re(r"\b[a-z]+_[a-z_]+\b"),
            upper_case: re(r"\b[A-Z][A-Z_]+\b"),
        }
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMetrics {
    pub indentation_consistency: f64,
    pub avg_indentation: f64,
    pub max_indentation: usize,
    pub spaces_after_comma: usize,
    pub spaces_around_operators: usize,
    pub camel_case_count: usize,
    pub snake_case_count: usize,
    pub upper_case_count: usize,
    pub perfect_formatting_score: f64,
}

impl StyleMetrics {
    pub fn entries(&self) -> FeatureEntries {
        vec![
            (Feature::IndentationConsistency, self.indentation_consistency),
            (Feature::AvgIndentation, self.avg_indentation),
            (Feature::MaxIndentation, self.max_indentation as f64),
            (Feature::SpacesAfterComma, self.spaces_after_comma as f64),
            (Feature::SpacesAroundOperators, self.spaces_around_operators as f64),
            (Feature::CamelCaseCount, self.camel_case_count as f64),
            (Feature::SnakeCaseCount, self.snake_case_count as f64),
            (Feature::UpperCaseCount, self.upper_case_count as f64),
            (Feature::PerfectFormattingScore, self.perfect_formatting_score),
        ]
    }
}

/// Leading-whitespace width of every non-blank line.
fn indentation_widths(text: &str) -> Vec<usize> {
    split_lines(text)
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .collect()
}

/// `1 / (1 + population standard deviation)` of the widths.
///
/// 1.0 for perfectly uniform indentation, 0.0 when there is nothing to
/// measure.
pub fn indentation_consistency(widths: &[usize]) -> f64 {
    if widths.is_empty() {
        return 0.0;
    }
    let n = widths.len() as f64;
    let mean = widths.iter().sum::<usize>() as f64 / n;
    let variance = widths
        .iter()
        .map(|&w| {
            let d = w as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    1.0 / (1.0 + variance.sqrt())
}

/// Fraction of the applicable formatting checks that pass.
///
/// - padded operators outnumber tight ones
/// - `, ` outnumbers `,x`
/// - under 10% of non-blank lines exceed 100 chars
///
/// A check only applies when it has something to measure.
pub fn formatting_perfection(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let p = patterns();
    let mut checks = 0u32;
    let mut passed = 0u32;

    let spaced = p.comparison_spaced.find_iter(text).count();
    let tight = p.comparison_tight.find_iter(text).count();
    if spaced + tight > 0 {
        checks += 1;
        if spaced > tight {
            passed += 1;
        }
    }

    let spaced = p.comma_spaced.find_iter(text).count();
    let tight = p.comma_tight.find_iter(text).count();
    if spaced + tight > 0 {
        checks += 1;
        if spaced > tight {
            passed += 1;
        }
    }

    let lines: Vec<&str> = split_lines(text)
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .collect();
    if !lines.is_empty() {
        checks += 1;
        let long = lines
            .iter()
            .filter(|l| l.chars().count() > LONG_LINE)
            .count();
        if (long as f64 / lines.len() as f64) < LONG_LINE_TOLERANCE {
            passed += 1;
        }
    }

    if checks == 0 {
        0.0
    } else {
        passed as f64 / checks as f64
    }
}

pub fn analyze(text: &str) -> StyleMetrics {
    let p = patterns();
    let widths = indentation_widths(text);
    let avg_indentation = if widths.is_empty() {
        0.0
    } else {
        widths.iter().sum::<usize>() as f64 / widths.len() as f64
    };

    StyleMetrics {
        indentation_consistency: indentation_consistency(&widths),
        avg_indentation,
        max_indentation: widths.iter().copied().max().unwrap_or(0),
        spaces_after_comma: p.comma_spaced.find_iter(text).count(),
        spaces_around_operators: p.operator_spaced.find_iter(text).count(),
        camel_case_count: p.camel_case.find_iter(text).count(),
        snake_case_count: p.snake_case.find_iter(text).count(),
        upper_case_count: p.upper_case.find_iter(text).count(),
        perfect_formatting_score: formatting_perfection(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistency_single_line_is_perfect() {
        assert_eq!(indentation_consistency(&[4]), 1.0);
        assert_eq!(indentation_consistency(&[4, 4, 4]), 1.0);
    }

    #[test]
    fn test_consistency_drops_with_variance() {
        let tight = indentation_consistency(&[0, 4, 4, 0]);
        let loose = indentation_consistency(&[0, 12, 2, 7]);
        assert!(tight > loose);
        // population sd of [0, 4] is 2
        assert!((indentation_consistency(&[0, 4]) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_consistency_empty() {
        assert_eq!(indentation_consistency(&[]), 0.0);
    }

    #[test]
    fn test_naming_convention_counts() {
        let metrics = analyze("userName = load_user(MAX_SIZE)\nother_value = getValue()\n");
        assert_eq!(metrics.camel_case_count, 2);
        assert_eq!(metrics.snake_case_count, 2);
        assert_eq!(metrics.upper_case_count, 1);
    }

    #[test]
    fn test_spacing_counts() {
        let metrics = analyze("x = a + b, c\n");
        assert_eq!(metrics.spaces_after_comma, 1);
        assert_eq!(metrics.spaces_around_operators, 2);
    }

    #[test]
    fn test_formatting_perfection() {
        assert_eq!(formatting_perfection(""), 0.0);
        assert_eq!(formatting_perfection("   \n"), 0.0);
        // operators padded, commas padded, short lines
        assert_eq!(formatting_perfection("x = f(a, b)\ny = x + 1\n"), 1.0);
        // tight operators and commas fail, line length passes
        let score = formatting_perfection("x=f(a,b)\ny=x+1\n");
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_long_lines_fail_length_check() {
        let long = "x".repeat(120);
        assert_eq!(formatting_perfection(&long), 0.0);
    }

    #[test]
    fn test_empty_text_is_zero() {
        assert_eq!(analyze(""), StyleMetrics::default());
    }
}
