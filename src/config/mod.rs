// SPDX-License-Identifier: MPL-2.0
//! Loading and saving user preferences in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[coalescer]` - Kill switch, debounce and retention windows, queue size
//! - `[display]` - Default position and per-level durations
//! - `[categories]` - Suppressed success categories, always-show categories
//! - `[diagnostics]` - Activity buffer size
//!
//! Every value is optional; missing or out-of-range values fall back to or
//! are clamped into the bounds in [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use scholar_toast::config;
//! use scholar_toast::notifications::CoalescerSettings;
//!
//! let (mut config, _warning) = config::load();
//! config.coalescer.debounce_ms = Some(1_500);
//! config::save(&config).expect("Failed to save config");
//!
//! let settings = CoalescerSettings::from(&config);
//! assert_eq!(settings.debounce.as_millis(), 1_500);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::coalescing::{
    BufferCapacity, DebounceWindow, QueueCapacity, RetentionWindow, ToastDuration,
};
use crate::error::{Error, Result};
use crate::notifications::{CoalescerSettings, LevelDurations, Position, SuppressionPolicy};
use crate::notifications::{DEFAULT_ALWAYS_SHOW, DEFAULT_SUPPRESSED_SUCCESS};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_FILE: &str = "settings.toml";

/// Warning key returned by [`load`] when the file exists but cannot be read.
pub const LOAD_ERROR_WARNING: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// Coalescing behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoalescerConfig {
    /// Initial state of the kill switch.
    #[serde(default = "default_enabled", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default = "default_debounce_ms", skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,

    #[serde(default = "default_retention_ms", skip_serializing_if = "Option::is_none")]
    pub retention_ms: Option<u64>,

    #[serde(default = "default_max_pending", skip_serializing_if = "Option::is_none")]
    pub max_pending: Option<usize>,
}

impl Default for CoalescerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            debounce_ms: default_debounce_ms(),
            retention_ms: default_retention_ms(),
            max_pending: default_max_pending(),
        }
    }
}

/// Toast presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    #[serde(default = "default_toast_ms", skip_serializing_if = "Option::is_none")]
    pub success_ms: Option<u64>,

    #[serde(default = "default_toast_ms", skip_serializing_if = "Option::is_none")]
    pub info_ms: Option<u64>,

    #[serde(default = "default_toast_ms", skip_serializing_if = "Option::is_none")]
    pub warning_ms: Option<u64>,

    #[serde(default = "default_error_toast_ms", skip_serializing_if = "Option::is_none")]
    pub error_ms: Option<u64>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            position: Some(Position::default()),
            success_ms: default_toast_ms(),
            info_ms: default_toast_ms(),
            warning_ms: default_toast_ms(),
            error_ms: default_error_toast_ms(),
        }
    }
}

/// Category lists, matched case-insensitively after trimming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoriesConfig {
    /// Success notifications in these categories are dropped.
    #[serde(default = "default_suppressed_success")]
    pub suppressed_success: Vec<String>,

    /// Notifications in these categories ignore the kill switch.
    #[serde(default = "default_always_show")]
    pub always_show: Vec<String>,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            suppressed_success: default_suppressed_success(),
            always_show: default_always_show(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_buffer_capacity", skip_serializing_if = "Option::is_none")]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

/// Root of `settings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub coalescer: CoalescerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub categories: CategoriesConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Diagnostics ring size, clamped.
    #[must_use]
    pub fn buffer_capacity(&self) -> BufferCapacity {
        BufferCapacity::new(
            self.diagnostics
                .buffer_capacity
                .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        )
    }
}

// =============================================================================
// Serde default helpers
// =============================================================================

#[allow(clippy::unnecessary_wraps)]
fn default_enabled() -> Option<bool> {
    Some(true)
}

#[allow(clippy::unnecessary_wraps)]
fn default_debounce_ms() -> Option<u64> {
    Some(DEFAULT_DEBOUNCE_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_retention_ms() -> Option<u64> {
    Some(DEFAULT_RETENTION_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_max_pending() -> Option<usize> {
    Some(DEFAULT_MAX_PENDING)
}

#[allow(clippy::unnecessary_wraps)]
fn default_toast_ms() -> Option<u64> {
    Some(DEFAULT_TOAST_DURATION_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_error_toast_ms() -> Option<u64> {
    Some(DEFAULT_ERROR_TOAST_DURATION_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_buffer_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
}

fn default_suppressed_success() -> Vec<String> {
    DEFAULT_SUPPRESSED_SUCCESS.iter().map(|s| (*s).to_string()).collect()
}

fn default_always_show() -> Vec<String> {
    DEFAULT_ALWAYS_SHOW.iter().map(|s| (*s).to_string()).collect()
}

// =============================================================================
// Conversion to runtime settings
// =============================================================================

impl From<&Config> for CoalescerSettings {
    fn from(config: &Config) -> Self {
        let c = &config.coalescer;
        let d = &config.display;
        let duration = |ms: Option<u64>, fallback: u64| ToastDuration::from_millis(ms.unwrap_or(fallback));

        Self {
            enabled: c.enabled.unwrap_or(true),
            debounce: DebounceWindow::from_millis(c.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)),
            retention: RetentionWindow::from_millis(c.retention_ms.unwrap_or(DEFAULT_RETENTION_MS)),
            capacity: QueueCapacity::new(c.max_pending.unwrap_or(DEFAULT_MAX_PENDING)),
            default_position: d.position.unwrap_or_default(),
            durations: LevelDurations {
                success: duration(d.success_ms, DEFAULT_TOAST_DURATION_MS),
                info: duration(d.info_ms, DEFAULT_TOAST_DURATION_MS),
                warning: duration(d.warning_ms, DEFAULT_TOAST_DURATION_MS),
                error: duration(d.error_ms, DEFAULT_ERROR_TOAST_DURATION_MS),
            },
            policy: SuppressionPolicy::new(
                &config.categories.suppressed_success,
                &config.categories.always_show,
            ),
        }
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns `(config, warning)`. A missing file yields defaults silently; an
/// unreadable one yields defaults and [`LOAD_ERROR_WARNING`].
#[must_use]
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

#[must_use]
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded settings");
                    return (config, None);
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "settings unreadable, using defaults");
                    return (Config::default(), Some(LOAD_ERROR_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`Config`].
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
