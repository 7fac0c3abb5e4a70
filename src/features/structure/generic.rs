//! Language-agnostic fallback: control keywords and delimiter totals

use super::{StructuralCounts, StructureReport};
use regex::Regex;
use std::sync::OnceLock;

static CONTROL_KEYWORD: OnceLock<Regex> = OnceLock::new();

fn control_keyword_re() -> &'static Regex {
    CONTROL_KEYWORD.get_or_init(|| {
        Regex::new(r"(?i)\b(if|else|for|while|switch|case|break|continue|return)\b")
            .expect("valid regex")
    })
}

/// Tally `{}` `()` `[]`, opening and closing alike.
pub(super) fn count_delimiters(text: &str, counts: &mut StructuralCounts) {
    for c in text.chars() {
        match c {
            '{' | '}' => counts.braces += 1,
            '(' | ')' => counts.parens += 1,
            '[' | ']' => counts.brackets += 1,
            _ => {}
        }
    }
}

/// Case-insensitive whole-word control keywords.
///
/// With `include_heads` false, `if`/`for`/`while` are left to the caller.
pub(super) fn count_keywords(text: &str, counts: &mut StructuralCounts, include_heads: bool) {
    for caps in control_keyword_re().captures_iter(text) {
        let keyword = caps[1].to_ascii_lowercase();
        match keyword.as_str() {
            "if" if include_heads => counts.ifs += 1,
            "for" if include_heads => counts.fors += 1,
            "while" if include_heads => counts.whiles += 1,
            "else" => counts.elses += 1,
            "switch" => counts.switches += 1,
            "case" => counts.cases += 1,
            "break" => counts.breaks += 1,
            "continue" => counts.continues += 1,
            "return" => counts.returns += 1,
            _ => {}
        }
    }
}

pub fn analyze(text: &str) -> StructureReport {
    let mut counts = StructuralCounts::default();
    count_keywords(text, &mut counts, true);
    count_delimiters(text, &mut counts);
    StructureReport {
        counts,
        names: Default::default(),
    }
}
