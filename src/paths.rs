// SPDX-License-Identifier: MPL-2.0
//! Application directory resolution.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` (CLI, tests)
//! 2. **Environment variable** - `SCHOLAR_TOAST_CONFIG_DIR`
//! 3. **Platform default** - via `dirs`, with the app name appended

use std::path::PathBuf;

const APP_NAME: &str = "ScholarToast";

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "SCHOLAR_TOAST_CONFIG_DIR";

/// Returns the config directory, e.g. `~/.config/ScholarToast/` on Linux.
///
/// `None` only if the platform has no config directory.
#[must_use]
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

#[must_use]
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
