// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the request side (`Level`, `Priority`, `NotifyOptions`)
//! and the resolved `Toast` that is handed to a display sink.

use crate::domain::coalescing::{duration_bounds, ToastDuration};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Unique identifier for a dispatched toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Informational message.
    Info,
    /// Something the user should look at, nothing failed.
    Warning,
    /// An operation failed.
    Error,
}

impl Level {
    /// Returns the lowercase name used in fingerprints and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    /// Returns the built-in display duration for this level.
    ///
    /// Errors stay on screen longer than everything else.
    #[must_use]
    pub fn default_duration(self) -> ToastDuration {
        match self {
            Level::Error => ToastDuration::from_millis(duration_bounds::DEFAULT_ERROR_MS),
            Level::Success | Level::Info | Level::Warning => ToastDuration::default(),
        }
    }

    /// Priority applied when the caller does not pick one.
    #[must_use]
    pub fn default_priority(self) -> Priority {
        match self {
            Level::Error => Priority::High,
            Level::Success | Level::Info | Level::Warning => Priority::Medium,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Importance of a notification. `High` bypasses the kill switch and
/// low-value category filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Screen anchor for a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Per-call display overrides. Unset fields are filled from configuration
/// when the toast is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    pub position: Option<Position>,
    pub duration: Option<ToastDuration>,
}

/// Options accepted by every notification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyOptions {
    /// Free-form label grouping related notifications (e.g. "grades").
    pub category: Option<String>,
    /// Explicit priority; `None` means the level default.
    pub priority: Option<Priority>,
    /// When true, a recently shown identical notification blocks this one.
    pub suppress_duplicates: bool,
    pub display: DisplayOptions,
}

impl Default for NotifyOptions {
    fn default() -> Self {
        Self {
            category: None,
            priority: None,
            suppress_duplicates: true,
            display: DisplayOptions::default(),
        }
    }
}

impl NotifyOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the level's default priority spelled out.
    #[must_use]
    pub fn for_level(level: Level) -> Self {
        Self::new().priority(level.default_priority())
    }

    /// Sets the category label.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets an explicit priority.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Lets identical notifications through even inside the retention window.
    #[must_use]
    pub fn allow_duplicates(mut self) -> Self {
        self.suppress_duplicates = false;
        self
    }

    /// Pins the toast to a screen position.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.display.position = Some(position);
        self
    }

    /// Overrides the display duration.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.display.duration = Some(ToastDuration::from_millis(ms));
        self
    }

    /// Returns the priority in effect for a notification of `level`.
    #[must_use]
    pub fn effective_priority(&self, level: Level) -> Priority {
        self.priority.unwrap_or_else(|| level.default_priority())
    }

    /// Returns the category label, if one was given and is not blank.
    #[must_use]
    pub fn category_label(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Fully resolved display parameters passed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDisplay {
    pub position: Position,
    pub duration: ToastDuration,
}

/// A notification that survived coalescing and is ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    id: ToastId,
    level: Level,
    message: String,
    display: ResolvedDisplay,
}

impl Toast {
    /// Creates a toast with a fresh id.
    pub fn new(level: Level, message: impl Into<String>, display: ResolvedDisplay) -> Self {
        Self {
            id: ToastId::new(),
            level,
            message: message.into(),
            display,
        }
    }

    /// Returns the toast's unique ID.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Returns the severity level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the text shown to the user, including any repeat counter.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the resolved position and duration.
    #[must_use]
    pub fn display(&self) -> ResolvedDisplay {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> ResolvedDisplay {
        ResolvedDisplay {
            position: Position::TopRight,
            duration: ToastDuration::default(),
        }
    }

    #[test]
    fn toast_ids_are_unique() {
        let t1 = Toast::new(Level::Success, "saved", display());
        let t2 = Toast::new(Level::Success, "saved", display());
        assert_ne!(t1.id(), t2.id());
    }

    #[test]
    fn error_level_lasts_longer_than_the_rest() {
        let error = Level::Error.default_duration();
        for level in [Level::Success, Level::Info, Level::Warning] {
            assert!(error > level.default_duration());
        }
    }

    #[test]
    fn errors_default_to_high_priority() {
        let options = NotifyOptions::default();
        assert_eq!(options.effective_priority(Level::Error), Priority::High);
        assert_eq!(options.effective_priority(Level::Success), Priority::Medium);
    }

    #[test]
    fn explicit_priority_overrides_level_default() {
        let options = NotifyOptions::new().priority(Priority::Low);
        assert_eq!(options.effective_priority(Level::Error), Priority::Low);
    }

    #[test]
    fn for_level_pins_the_default_priority() {
        assert_eq!(NotifyOptions::for_level(Level::Error).priority, Some(Priority::High));
        assert_eq!(NotifyOptions::for_level(Level::Info).priority, Some(Priority::Medium));
    }

    #[test]
    fn options_suppress_duplicates_by_default() {
        assert!(NotifyOptions::default().suppress_duplicates);
        assert!(!NotifyOptions::new().allow_duplicates().suppress_duplicates);
    }

    #[test]
    fn blank_category_is_ignored() {
        assert_eq!(NotifyOptions::new().category("   ").category_label(), None);
        assert_eq!(
            NotifyOptions::new().category(" grades ").category_label(),
            Some("grades")
        );
    }

    #[test]
    fn builder_sets_display_overrides() {
        let options = NotifyOptions::new()
            .position(Position::BottomLeft)
            .duration(Duration::from_secs(8));
        assert_eq!(options.display.position, Some(Position::BottomLeft));
        assert_eq!(
            options.display.duration,
            Some(ToastDuration::from_millis(8_000))
        );
    }

    #[test]
    fn level_display_matches_fingerprint_name() {
        assert_eq!(Level::Warning.to_string(), "warning");
        assert_eq!(Level::Error.as_str(), "error");
    }
}
