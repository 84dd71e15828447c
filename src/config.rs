//! Configuration file support
//!
//! Loads configuration from TOML file at ~/.config/overlay-select/config.toml
//! Falls back to defaults if the file doesn't exist or can't be parsed.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants;
use crate::error::ConfigError;
use crate::paths::config_file_path;

/// Dropdown configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownConfig {
    /// Placement geometry
    pub metrics: MetricsConfig,

    /// Update loop timing
    pub timing: TimingConfig,

    /// Label rendering
    pub text: TextConfig,
}

/// Geometry used by placement, in host units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Height of the arrow between anchor and list
    pub arrow_height: i32,

    /// Width of the arrow between anchor and list
    pub arrow_width: i32,

    /// Height of the list border
    pub border_height: i32,

    /// Space kept free between list and viewport edge
    pub window_margin: i32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            arrow_height: constants::ARROW_HEIGHT,
            arrow_width: constants::ARROW_WIDTH,
            border_height: constants::BORDER_HEIGHT,
            window_margin: constants::WINDOW_MARGIN,
        }
    }
}

impl MetricsConfig {
    /// Cell-sized metrics for terminal hosts
    pub fn terminal() -> Self {
        Self {
            arrow_height: 1,
            arrow_width: 1,
            border_height: 0,
            window_margin: 1,
        }
    }
}

/// Update loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between repositioning frames (microseconds)
    pub frame_interval_us: u64,

    /// Inactivity window that stops the loop (milliseconds)
    pub settle_window_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_interval_us: constants::FRAME_INTERVAL_US,
            settle_window_ms: constants::SETTLE_WINDOW_MS,
        }
    }
}

impl TimingConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(self.frame_interval_us.max(1))
    }

    pub fn settle_window(&self) -> Duration {
        Duration::from_millis(self.settle_window_ms)
    }
}

/// Label rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Suffix for labels that overflow their row
    pub ellipsis: String,

    /// Treat the filter as literal text in the dropdown-level text pass.
    /// Off by default: the pass compiles the filter as a pattern, while
    /// rows always escape it.
    pub escape_dropdown_filter: bool,

    /// Message shown when there are no items
    pub empty_message: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            ellipsis: constants::ELLIPSIS.to_string(),
            escape_dropdown_filter: false,
            empty_message: constants::EMPTY_MESSAGE.to_string(),
        }
    }
}

impl DropdownConfig {
    /// Defaults with cell-sized metrics
    pub fn terminal() -> Self {
        Self {
            metrics: MetricsConfig::terminal(),
            ..Default::default()
        }
    }

    /// Load configuration from the default file, or return `fallback` if
    /// the file is missing or invalid
    pub fn load_or(fallback: Self) -> Self {
        let path = config_file_path();

        if !path.exists() {
            return fallback;
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                fallback
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_err)
    }

    /// Generate example configuration content for a terminal host
    pub fn example_toml() -> String {
        toml::to_string_pretty(&Self::terminal()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DropdownConfig::default();
        assert_eq!(config.metrics.arrow_height, 12);
        assert_eq!(config.metrics.border_height, 1);
        assert_eq!(config.metrics.window_margin, 20);
        assert_eq!(config.timing.settle_window_ms, 250);
        assert_eq!(config.timing.frame_interval_us, 16_667);
        assert!(!config.text.escape_dropdown_filter);
    }

    #[test]
    fn test_partial_config_parsing() {
        let toml_str = r#"
[metrics]
window_margin = 2

[text]
escape_dropdown_filter = true
"#;
        let config: DropdownConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.metrics.window_margin, 2);
        assert!(config.text.escape_dropdown_filter);
        // Other values should be defaults
        assert_eq!(config.metrics.arrow_height, 12);
        assert_eq!(config.timing.settle_window_ms, 250);
        assert_eq!(config.text.ellipsis, "…");
    }

    #[test]
    fn test_example_toml_is_valid() {
        let example = DropdownConfig::example_toml();
        assert!(!example.is_empty());
        let parsed: DropdownConfig = toml::from_str(&example).unwrap();
        assert_eq!(parsed, DropdownConfig::terminal());
        assert!(example.contains("[metrics]"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("overlay-select-test-{}", std::process::id()));
        let path = dir.join("config.toml");

        let config = DropdownConfig::terminal();
        config.save_to(&path).unwrap();

        let loaded = DropdownConfig::load_from(&path).unwrap();
        assert_eq!(loaded.metrics, MetricsConfig::terminal());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let path = std::env::temp_dir().join("overlay-select-does-not-exist.toml");
        assert!(matches!(
            DropdownConfig::load_from(&path),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_zero_frame_interval_is_clamped() {
        let timing = TimingConfig {
            frame_interval_us: 0,
            settle_window_ms: 250,
        };
        assert_eq!(timing.frame_interval(), Duration::from_micros(1));
    }
}
