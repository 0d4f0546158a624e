//! Batch configuration module.
//!
//! Handles loading, validating, and merging `crop.toml`. Stock defaults
//! describe the five service images and the stock crop; a user file overrides
//! any part of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [crop]                    # Fractions of the image width/height
//! left = 0.25
//! top = 0.15
//! right = 0.75
//! bottom = 0.85
//!
//! [[jobs]]                  # Replaces the whole default list
//! input = "public/images/services/sports_raw.png"
//! output = "public/images/services/sports.png"
//! crop = { left = 0.1, top = 0.1, right = 0.9, bottom = 0.9 }  # optional
//! ```
//!
//! ## Merging
//!
//! Tables merge key by key, so `[crop]` may set a single edge. Arrays replace
//! wholesale: a user `[[jobs]]` list is the complete list. A per-job `crop`
//! must give all four edges.
//!
//! Unknown keys are rejected to catch typos early. Job paths are relative to
//! the root directory passed on the command line.

use crate::batch::CropJob;
use crate::imaging::Proportions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Name of the config file looked up in the root directory.
pub const CONFIG_FILENAME: &str = "crop.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// One (input, output) pair from the job list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobEntry {
    pub input: String,
    pub output: String,
    /// Overrides the batch-wide `[crop]` for this job only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Proportions>,
}

impl JobEntry {
    fn new(input: &str, output: &str) -> Self {
        Self {
            input: input.to_string(),
            output: output.to_string(),
            crop: None,
        }
    }
}

/// Batch configuration loaded from `crop.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Crop applied to every job without its own `crop`.
    pub crop: Proportions,
    /// Jobs in execution order.
    pub jobs: Vec<JobEntry>,
}

impl Default for CropConfig {
    fn default() -> Self {
        let service = |name: &str| {
            JobEntry::new(
                &format!("public/images/services/{name}_raw.png"),
                &format!("public/images/services/{name}.png"),
            )
        };
        Self {
            crop: Proportions::default(),
            jobs: ["trigger-point", "deep-tissue", "sports", "benefits_es", "benefits_en"]
                .into_iter()
                .map(service)
                .collect(),
        }
    }
}

impl CropConfig {
    /// Validate proportions and job entries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.crop
            .validate()
            .map_err(|e| ConfigError::Validation(format!("crop: {e}")))?;
        if self.jobs.is_empty() {
            return Err(ConfigError::Validation("jobs must not be empty".into()));
        }
        for (i, job) in self.jobs.iter().enumerate() {
            if job.input.is_empty() || job.output.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "jobs[{i}]: input and output must be set"
                )));
            }
            if job.input == job.output {
                return Err(ConfigError::Validation(format!(
                    "jobs[{i}]: output must differ from input ({})",
                    job.input
                )));
            }
            if let Some(crop) = &job.crop {
                crop.validate()
                    .map_err(|e| ConfigError::Validation(format!("jobs[{i}].crop: {e}")))?;
            }
        }
        Ok(())
    }

    /// Build the job list with paths resolved against `root`.
    pub fn jobs(&self, root: &Path) -> Vec<CropJob> {
        self.jobs
            .iter()
            .map(|entry| CropJob {
                input_path: root.join(&entry.input),
                output_path: root.join(&entry.output),
                proportions: entry.crop.unwrap_or(self.crop),
            })
            .collect()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CropConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (including arrays) replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<CropConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CropConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the batch config.
///
/// An explicit `config_path` must exist. Without one, `crop.toml` in `root`
/// is used when present and the stock defaults otherwise.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<CropConfig, ConfigError> {
    let overlay = match config_path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            Some(load_raw_config(path)?)
        }
        None => {
            let path = root.join(CONFIG_FILENAME);
            if path.exists() {
                debug!(path = %path.display(), "loading config");
                Some(load_raw_config(&path)?)
            } else {
                debug!(root = %root.display(), "no config file, using stock defaults");
                None
            }
        }
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `crop.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# cropbatch configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Crop rectangle, as fractions of each image's width and height.
# Must satisfy 0 <= left < right <= 1 and 0 <= top < bottom <= 1.
# These are starting values, not measured from any particular layout.
# ---------------------------------------------------------------------------
[crop]
left = 0.25
top = 0.15
right = 0.75
bottom = 0.85

# ---------------------------------------------------------------------------
# Jobs, run in order. Paths are relative to --root.
# A [[jobs]] list in your file replaces this list entirely.
# Add `crop = { left = ..., top = ..., right = ..., bottom = ... }` to a job
# to override the crop for that image only.
# ---------------------------------------------------------------------------
[[jobs]]
input = "public/images/services/trigger-point_raw.png"
output = "public/images/services/trigger-point.png"

[[jobs]]
input = "public/images/services/deep-tissue_raw.png"
output = "public/images/services/deep-tissue.png"

[[jobs]]
input = "public/images/services/sports_raw.png"
output = "public/images/services/sports.png"

[[jobs]]
input = "public/images/services/benefits_es_raw.png"
output = "public/images/services/benefits_es.png"

[[jobs]]
input = "public/images/services/benefits_en_raw.png"
output = "public/images/services/benefits_en.png"
"##
}
