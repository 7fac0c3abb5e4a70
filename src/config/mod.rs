//! Configuration for codeorigin
//!
//! Settings are layered, later sources winning:
//! 1. Built-in defaults
//! 2. User config (`~/.config/codeorigin/config.toml`)
//! 3. Project config (`./codeorigin.toml`) or an explicit `--config` file
//! 4. Environment variables (`CODEORIGIN_MODEL`, `CODEORIGIN_MAX_CODE_LENGTH`)

mod user_config;

pub use user_config::{init_user_config, user_config_path};

use crate::classifier::HeuristicPolicy;
use crate::pipeline::SubmissionLimits;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "codeorigin.toml";

pub const ENV_MODEL: &str = "CODEORIGIN_MODEL";
pub const ENV_MAX_CODE_LENGTH: &str = "CODEORIGIN_MAX_CODE_LENGTH";

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectorConfig {
    /// Trained model to load; the heuristic scorer is used when absent
    pub model_path: Option<PathBuf>,
    pub limits: SubmissionLimits,
    /// Language tag for input whose language cannot be inferred
    pub default_language: Option<String>,
    pub heuristic: HeuristicPolicy,
}

/// One config file as written on disk. Every field is optional so files can
/// be layered.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub limits: LimitsSection,
    #[serde(default)]
    pub default_language: Option<String>,
    /// Replaces the whole policy; omitted keys inside take their defaults
    #[serde(default)]
    pub heuristic: Option<HeuristicPolicy>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ModelSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LimitsSection {
    pub min_code_length: Option<usize>,
    pub max_code_length: Option<usize>,
}

impl ConfigFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl DetectorConfig {
    /// Load from all sources.
    ///
    /// An explicit `config_path` must exist and parse. The user and project
    /// files are optional; a broken one is logged and skipped.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = DetectorConfig::default();

        if let Some(user_path) = user_config_path().filter(|p| p.exists()) {
            match ConfigFile::from_path(&user_path) {
                Ok(file) => {
                    debug!("Loaded user config from {}", user_path.display());
                    config.merge(file);
                }
                Err(e) => warn!("{:#}", e),
            }
        }

        match config_path {
            Some(path) => {
                config.merge(ConfigFile::from_path(path)?);
                debug!("Loaded config from {}", path.display());
            }
            None => {
                let project_path = Path::new(PROJECT_CONFIG_FILE);
                if project_path.exists() {
                    match ConfigFile::from_path(project_path) {
                        Ok(file) => {
                            debug!("Loaded project config from {}", project_path.display());
                            config.merge(file);
                        }
                        Err(e) => warn!("{:#}", e),
                    }
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay a config file (the file takes priority).
    pub fn merge(&mut self, other: ConfigFile) {
        if other.model.path.is_some() {
            self.model_path = other.model.path;
        }
        if let Some(min) = other.limits.min_code_length {
            self.limits.min_code_length = min;
        }
        if let Some(max) = other.limits.max_code_length {
            self.limits.max_code_length = max;
        }
        if other.default_language.is_some() {
            self.default_language = other.default_language;
        }
        if let Some(policy) = other.heuristic {
            self.heuristic = policy;
        }
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            self.model_path = Some(PathBuf::from(model));
        }
        if let Some(raw) = lookup(ENV_MAX_CODE_LENGTH) {
            match raw.trim().parse::<usize>() {
                Ok(max) => self.limits.max_code_length = max,
                Err(_) => warn!("Ignoring {}={:?}: not a number", ENV_MAX_CODE_LENGTH, raw),
            }
        }
    }
}
