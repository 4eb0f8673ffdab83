use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use snag_core::SnagError;

use crate::config_merge::merge_toml_values;
use crate::paths::{PROJECT_DIR_NAME, global_config_path, project_config_path};

/// Effective snag configuration after layering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnagConfig {
    pub capture: CaptureConfig,
    pub status: StatusConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Master switch for the transcript hook.
    pub enabled: bool,
    /// Aggregated transcript text shorter than this is treated as no signal.
    pub min_text_chars: usize,
    /// Characters kept before the matched indicator.
    pub snippet_before: usize,
    /// Characters kept from the indicator start onwards.
    pub snippet_after: usize,
    /// Files under this directory are third-party and never reported as `context.file`.
    pub vendored_dir: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_text_chars: 50,
            snippet_before: 100,
            snippet_after: 500,
            vendored_dir: "node_modules".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub top_kinds: usize,
    pub top_pairs: usize,
    pub top_signatures: usize,
    /// A reminder is shown once pending reflections exceed this count.
    pub pending_reminder_threshold: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            top_kinds: 5,
            top_pairs: 3,
            top_signatures: 3,
            pending_reminder_threshold: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log directory, relative to the project root unless absolute.
    pub dir: PathBuf,
    pub file_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(PROJECT_DIR_NAME).join("memory"),
            file_name: "reflections.jsonl".to_string(),
        }
    }
}

impl LogConfig {
    /// Resolve the reflection log path for a project root.
    pub fn log_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.dir).join(&self.file_name)
    }
}

impl SnagConfig {
    /// Load config with 3-tier priority:
    /// 1. project config (`{project_root}/.snag/config.toml`) (highest)
    /// 2. global config (`$SNAG_CONFIG` or `~/.config/snag/config.toml`)
    /// 3. built-in defaults (lowest)
    ///
    /// Never fails: unreadable or invalid layers are logged and skipped.
    pub fn load(project_root: &Path) -> Self {
        let global_path = global_config_path();
        let project_path = project_config_path(project_root);
        Self::load_with_paths(global_path.as_deref(), &project_path)
    }

    /// Load config from explicit paths. Testable without global filesystem state.
    pub fn load_with_paths(global_path: Option<&Path>, project_path: &Path) -> Self {
        let mut merged = toml::Value::Table(Default::default());
        for path in global_path.into_iter().chain(std::iter::once(project_path)) {
            match read_layer(path) {
                Ok(Some(layer)) => merged = merge_toml_values(merged, layer),
                Ok(None) => {}
                Err(err) => tracing::warn!("Ignoring config layer: {err}"),
            }
        }

        // Roundtrip through string for reliable deserialization
        let parsed = toml::to_string(&merged)
            .context("Failed to serialize merged config")
            .and_then(|merged_str| {
                toml::from_str::<SnagConfig>(&merged_str)
                    .context("Failed to deserialize merged config")
            });
        match parsed {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Merged config is invalid, using defaults");
                Self::default()
            }
        }
    }

    /// Render the effective config as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Read one config layer; `Ok(None)` when the file does not exist.
fn read_layer(path: &Path) -> Result<Option<toml::Value>, SnagError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|err| SnagError::InvalidConfig {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    let invalid = |reason: String| SnagError::InvalidConfig {
        path: path.to_path_buf(),
        reason,
    };

    // A layer whose sections have the wrong shape must not poison the others.
    toml::from_str::<SnagConfig>(&content).map_err(|err| invalid(err.to_string()))?;
    let value =
        toml::from_str::<toml::Value>(&content).map_err(|err| invalid(err.to_string()))?;

    Ok(Some(value))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
