// SPDX-License-Identifier: MPL-2.0
//! Writing reports to disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Default report file name: `scholar_toast_diagnostics_YYYYMMDD_HHMMSS.json`.
#[must_use]
pub fn generate_default_filename() -> String {
    let now = Local::now();
    format!("scholar_toast_diagnostics_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Where a report requested at `target` lands: directories get a
/// [`generate_default_filename`] entry, anything else is used as given.
#[must_use]
pub fn resolve_report_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(generate_default_filename())
    } else {
        target.to_path_buf()
    }
}

/// Writes `content` through a `.json.tmp` sibling and renames it into place.
///
/// # Errors
///
/// Returns an error if writing or renaming fails.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}
