//! Line and character statistics

use super::{ratio, Feature, FeatureEntries};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalMetrics {
    pub lines_of_code: usize,
    pub non_empty_lines: usize,
    pub blank_lines: usize,
    pub blank_line_ratio: f64,
    pub avg_line_length: f64,
    pub max_line_length: usize,
    pub total_characters: usize,
    pub avg_chars_per_line: f64,
}

impl LexicalMetrics {
    pub fn entries(&self) -> FeatureEntries {
        vec![
            (Feature::LinesOfCode, self.lines_of_code as f64),
            (Feature::NonEmptyLines, self.non_empty_lines as f64),
            (Feature::BlankLines, self.blank_lines as f64),
            (Feature::BlankLineRatio, self.blank_line_ratio),
            (Feature::AvgLineLength, self.avg_line_length),
            (Feature::MaxLineLength, self.max_line_length as f64),
            (Feature::TotalCharacters, self.total_characters as f64),
            (Feature::AvgCharsPerLine, self.avg_chars_per_line),
        ]
    }
}

/// Lines of `text`: the `'\n'`-separated segments, none for empty input.
///
/// A trailing newline yields a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

pub fn analyze(text: &str) -> LexicalMetrics {
    let lines = split_lines(text);
    if lines.is_empty() {
        return LexicalMetrics::default();
    }

    let lengths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
    let lines_of_code = lines.len();
    let non_empty_lines = lines.iter().filter(|l| !l.trim().is_empty()).count();
    let blank_lines = lines_of_code - non_empty_lines;
    let total_characters = text.chars().count();

    LexicalMetrics {
        lines_of_code,
        non_empty_lines,
        blank_lines,
        blank_line_ratio: ratio(blank_lines, lines_of_code),
        avg_line_length: ratio(lengths.iter().sum(), lines_of_code),
        max_line_length: lengths.iter().copied().max().unwrap_or(0),
        total_characters,
        avg_chars_per_line: ratio(total_characters, lines_of_code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(analyze(""), LexicalMetrics::default());
    }

    #[test]
    fn test_trailing_newline_counts_as_line() {
        let metrics = analyze("def f():\n    return 1\n");
        assert_eq!(metrics.lines_of_code, 3);
        assert_eq!(metrics.non_empty_lines, 2);
        assert_eq!(metrics.blank_lines, 1);
        assert!((metrics.blank_line_ratio - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(metrics.max_line_length, 12);
    }

    #[test]
    fn test_line_lengths_count_chars_not_bytes() {
        let metrics = analyze("héllo\nab");
        assert_eq!(metrics.max_line_length, 5);
        assert_eq!(metrics.total_characters, 8);
        assert!((metrics.avg_line_length - 3.5).abs() < 1e-12);
        assert!((metrics.avg_chars_per_line - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_whitespace_only_lines_are_blank() {
        let metrics = analyze("x = 1\n   \n\t\ny = 2");
        assert_eq!(metrics.lines_of_code, 4);
        assert_eq!(metrics.blank_lines, 2);
        assert_eq!(metrics.blank_line_ratio, 0.5);
    }
}
