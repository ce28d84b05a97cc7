//! User configuration.
//!
//! Loaded from a JSON file; every field has a default so a partial file (or
//! no file at all) is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::preview::DEFAULT_THEME;

pub const APP_DIR_NAME: &str = "snipgrid";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Catalog location: a file path or an http(s) URL
    pub catalog: String,

    /// Quiet period after the last keystroke before the search runs
    pub search_debounce_ms: u64,

    /// How long a copy button shows "Copied!"
    pub copy_feedback_ms: u64,

    /// How long a toast stays fully visible
    pub toast_duration_ms: u64,

    /// Length of a toast's leaving phase before it is removed
    pub toast_exit_ms: u64,

    pub preview: PreviewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: "snippets.json".to_string(),
            search_debounce_ms: 300,
            copy_feedback_ms: 2000,
            toast_duration_ms: 3000,
            toast_exit_ms: 400,
            preview: PreviewConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PreviewConfig {
    /// Render the markdown preview at all
    pub markdown: bool,
    /// Typeset `$…$` and `$$…$$`
    pub math: bool,
    /// Syntax-highlight fenced code blocks
    pub highlight: bool,
    /// syntect theme used for the highlight stylesheet
    pub highlight_theme: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            markdown: true,
            math: true,
            highlight: true,
            highlight_theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Config {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }

    /// Load a config file. Missing fields take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/snipgrid/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `explicit` if given, else from the default location if that
    /// file exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::info!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.catalog, "snippets.json");
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.copy_feedback(), Duration::from_millis(2000));
        assert_eq!(config.toast_duration(), Duration::from_millis(3000));
        assert!(config.preview.markdown);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"search_debounce_ms": 50, "preview": {"math": false}}"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.search_debounce_ms, 50);
        assert_eq!(config.copy_feedback_ms, 2000);
        assert!(!config.preview.math);
        assert!(config.preview.highlight);
    }

    #[test]
    fn test_explicit_path_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{").unwrap();
        assert!(matches!(
            Config::load(Some(&bad)),
            Err(ConfigError::Parse { .. })
        ));
    }
}
