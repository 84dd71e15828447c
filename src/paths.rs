//! Path resolution for overlay-select
//!
//! Centralized directory path resolution with consistent fallback strategies.

use std::path::PathBuf;

// =============================================================================
// Path Constants (relative to home directory)
// =============================================================================

/// Data directory relative to home
const DATA_SUBDIR: &str = ".local/share/overlay-select";

/// Configuration directory relative to home
const CONFIG_SUBDIR: &str = ".config/overlay-select";

/// Configuration filename
const CONFIG_FILE: &str = "config.toml";

/// Log filename prefix (the daily appender adds the date)
pub const LOG_FILE: &str = "overlay-select.log";

// =============================================================================
// Fallback Paths
// =============================================================================

/// Fallback data directory when home is unavailable
const FALLBACK_DATA_DIR: &str = "/tmp/overlay-select";

/// Fallback configuration file when home is unavailable
const FALLBACK_CONFIG_FILE: &str = "/tmp/overlay-select.toml";

// =============================================================================
// Path Resolution Functions
// =============================================================================

/// Get the data directory path (logs live here)
/// Falls back to /tmp/overlay-select if home directory is unavailable
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DATA_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

/// Get the configuration file path
pub fn config_file_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(CONFIG_SUBDIR).join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CONFIG_FILE))
}
