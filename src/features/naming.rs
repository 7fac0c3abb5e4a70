//! Identifier naming statistics

use super::structure::IdentifierPool;
use super::{ratio, Feature, FeatureEntries};

/// Placeholder names that carry no domain meaning.
const GENERIC_NAMES: &[&str] = &["data", "result", "value", "item", "temp", "var", "obj"];

/// Names longer than this are considered descriptive.
const DESCRIPTIVE_MIN_LEN: usize = 15;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamingMetrics {
    pub avg_name_length: f64,
    pub generic_name_ratio: f64,
    pub descriptive_name_ratio: f64,
}

impl NamingMetrics {
    pub fn entries(&self) -> FeatureEntries {
        vec![
            (Feature::AvgNameLength, self.avg_name_length),
            (Feature::GenericNameRatio, self.generic_name_ratio),
            (Feature::DescriptiveNameRatio, self.descriptive_name_ratio),
        ]
    }
}

pub fn is_generic(name: &str) -> bool {
    let lower = name.to_lowercase();
    GENERIC_NAMES.contains(&lower.as_str())
}

pub fn analyze(names: &IdentifierPool) -> NamingMetrics {
    if names.is_empty() {
        return NamingMetrics::default();
    }

    let total = names.len();
    let lengths: usize = names.iter().map(|n| n.chars().count()).sum();
    let generic = names.iter().filter(|n| is_generic(n)).count();
    let descriptive = names
        .iter()
        .filter(|n| n.chars().count() > DESCRIPTIVE_MIN_LEN)
        .count();

    NamingMetrics {
        avg_name_length: ratio(lengths, total),
        generic_name_ratio: ratio(generic, total),
        descriptive_name_ratio: ratio(descriptive, total),
    }
}
