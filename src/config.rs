use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level kvote configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KvoteConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// CSV input settings.
    #[serde(default)]
    pub io: IoToml,

    /// Classifier settings.
    #[serde(default)]
    pub classifier: ClassifierToml,

    /// Self-test settings.
    #[serde(default)]
    pub self_test: SelfTestToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub has_headers: bool,
    #[serde(default)]
    pub label_column: usize,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            has_headers: false,
            label_column: 0,
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierToml {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_metric")]
    pub metric: String,
}

impl Default for ClassifierToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            metric: default_metric(),
        }
    }
}

fn default_k() -> usize {
    kvote_knn::DEFAULT_K
}
fn default_metric() -> String {
    "euclidean".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelfTestToml {
    #[serde(default = "default_trials")]
    pub trials: usize,
}

impl Default for SelfTestToml {
    fn default() -> Self {
        Self {
            trials: default_trials(),
        }
    }
}

fn default_trials() -> usize {
    1
}

/// Loads the TOML file at `path`, or the built-in defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<KvoteConfig> {
    let Some(path) = path else {
        return Ok(KvoteConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
}
