//! User-level config file location and bootstrap

use anyhow::Result;
use std::path::PathBuf;

const EXAMPLE_CONFIG: &str = r#"# codeorigin user configuration

[model]
# Trained gbdt-rs JSON model or XGBoost JSON dump.
# Without one, the built-in heuristic scorer is used.
# path = "/path/to/model.json"

[limits]
# Submissions shorter than this (after trimming) are rejected
# min_code_length = 10
# Submissions longer than this are rejected
# max_code_length = 50000

# Language assumed when it cannot be inferred from a file extension
# default_language = "python"

# Heuristic scorer tuning. Each indicator moves the score toward AI as the
# feature rises from human_threshold to ai_threshold.
# [heuristic]
# probability_floor = 0.15
# probability_ceiling = 0.85
#
# [heuristic.perfect_formatting]
# weight = 0.25
# human_threshold = 0.5
# ai_threshold = 0.8
"#;

/// `~/.config/codeorigin/config.toml`, when a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("codeorigin").join("config.toml"))
}

/// Create the user config directory and an example config.
///
/// An existing config is left untouched. Returns the config path.
pub fn init_user_config() -> Result<PathBuf> {
    let config_path =
        user_config_path().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !config_path.exists() {
        std::fs::write(&config_path, EXAMPLE_CONFIG)?;
    }

    Ok(config_path)
}
