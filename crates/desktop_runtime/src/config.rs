//! Static window catalog and window-manager configuration.
//!
//! The built-in catalog is authored in `windows.toml`, validated by `build.rs`, and embedded as
//! JSON. Hosts can substitute their own catalog through [`WindowManagerConfig::from_json_str`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::LayoutMetrics;

include!(concat!(env!("OUT_DIR"), "/window_catalog_generated.rs"));

pub const FINDER: &str = "finder";
pub const BROWSER: &str = "browser";
pub const RESUME: &str = "resume";
pub const TERMINAL: &str = "terminal";
pub const TEXT: &str = "text";
pub const IMAGE: &str = "image";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Static per-window configuration consumed once at store construction.
pub struct WindowConfig {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub default_top: Option<f64>,
    #[serde(default)]
    pub default_left: Option<f64>,
    #[serde(default)]
    pub cascading: bool,
    #[serde(default)]
    pub prevent_transform_reset: bool,
}

impl WindowConfig {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            width,
            height,
            default_top: None,
            default_left: None,
            cascading: false,
            prevent_transform_reset: false,
        }
    }

    pub fn cascading(mut self) -> Self {
        self.cascading = true;
        self
    }

    pub fn with_default_position(mut self, top: f64, left: f64) -> Self {
        self.default_top = Some(top);
        self.default_left = Some(left);
        self
    }

    pub fn preventing_transform_reset(mut self) -> Self {
        self.prevent_transform_reset = true;
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("window catalog is not valid JSON: {0}")]
    Parse(String),
    #[error("window `{0}` is configured more than once")]
    DuplicateWindow(String),
    #[error("window `{0}` must have a positive finite width and height")]
    InvalidSize(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowManagerConfig {
    pub windows: Vec<WindowConfig>,
    #[serde(default)]
    pub metrics: LayoutMetrics,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            windows: builtin_windows(),
            metrics: LayoutMetrics::default(),
        }
    }
}

impl WindowManagerConfig {
    pub fn new(windows: Vec<WindowConfig>) -> Self {
        Self {
            windows,
            metrics: LayoutMetrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Parses a catalog of the form `{ "windows": [...], "metrics": {...} }`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON, duplicate window ids, or invalid sizes.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the first duplicate id or invalid size found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for window in &self.windows {
            if !seen.insert(window.id.as_str()) {
                return Err(ConfigError::DuplicateWindow(window.id.clone()));
            }
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(window.width) || !valid(window.height) {
                return Err(ConfigError::InvalidSize(window.id.clone()));
            }
        }
        Ok(())
    }
}

/// Built-in window catalog embedded at build time.
pub fn builtin_windows() -> Vec<WindowConfig> {
    match serde_json::from_str(WINDOW_CATALOG_JSON) {
        Ok(windows) => windows,
        Err(err) => {
            leptos::logging::warn!("embedded window catalog failed to parse: {err}");
            Vec::new()
        }
    }
}
