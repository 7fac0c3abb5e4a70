//! JSON reporter
//!
//! Outputs reports as pretty-printed JSON for piping to jq or other tools.

use anyhow::Result;
use serde::Serialize;

/// Render any report as JSON
pub fn render<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureVector, FEATURE_COUNT};
    use crate::reporters::tests::{test_detection, test_scan};

    #[test]
    fn test_detection_json_shape() {
        let json_str = render(&test_detection()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["language"], "python");
        assert!(parsed["prediction"] == "AI" || parsed["prediction"] == "Human");
        assert_eq!(
            parsed["features"].as_object().expect("features object").len(),
            FEATURE_COUNT
        );
        assert!(parsed["analysis"]["lines_of_code"].is_number());
        assert!(!parsed["reasons"].as_array().expect("reasons array").is_empty());
    }

    #[test]
    fn test_scan_json_sorted_files() {
        let json_str = render(&test_scan()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["total_files"], 2);
        assert_eq!(parsed["files"][0]["path"], "src/a.py");
        assert_eq!(parsed["skipped"][0]["reason"], "No code provided");
    }

    #[test]
    fn test_features_json_keys_in_schema_order() {
        let json_str = render(&FeatureVector::zeroed()).expect("render JSON");
        let first_key = json_str
            .lines()
            .nth(1)
            .and_then(|line| line.trim().split(':').next())
            .expect("first key");
        assert_eq!(first_key, "\"lines_of_code\"");
    }
}
