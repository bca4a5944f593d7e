// SPDX-License-Identifier: MPL-2.0
//! Category-based suppression rules.
//!
//! Low-value `success` acknowledgements (selection changes, field input,
//! loading finished) are noise on a grades dashboard and are dropped unless
//! the caller marks them important. A small allowlist of categories is never
//! filtered this way.

use super::notification::{Level, NotifyOptions, Priority};
use std::collections::BTreeSet;

/// Categories whose `success` notifications are dropped by default.
pub const DEFAULT_SUPPRESSED_SUCCESS: &[&str] = &["selection", "input", "loading"];

/// Categories that are never dropped by the low-value filter or the kill switch.
pub const DEFAULT_ALWAYS_SHOW: &[&str] = &["auth", "critical", "error"];

/// Suppression lists, compared case-insensitively on trimmed labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionPolicy {
    suppressed_success: BTreeSet<String>,
    always_show: BTreeSet<String>,
}

impl Default for SuppressionPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_SUPPRESSED_SUCCESS.iter().copied(),
            DEFAULT_ALWAYS_SHOW.iter().copied(),
        )
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

impl SuppressionPolicy {
    pub fn new<S, A>(suppressed_success: S, always_show: A) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            suppressed_success: suppressed_success
                .into_iter()
                .map(|c| normalize(c.as_ref()))
                .filter(|c| !c.is_empty())
                .collect(),
            always_show: always_show
                .into_iter()
                .map(|c| normalize(c.as_ref()))
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// True when the category is on the always-show allowlist.
    #[must_use]
    pub fn is_always_show_category(&self, category: Option<&str>) -> bool {
        category.is_some_and(|c| self.always_show.contains(&normalize(c)))
    }

    /// True for high-priority requests and always-show categories.
    #[must_use]
    pub fn is_always_show(&self, level: Level, options: &NotifyOptions) -> bool {
        options.effective_priority(level) == Priority::High
            || self.is_always_show_category(options.category_label())
    }

    /// True when a request is low-value noise that should be dropped.
    ///
    /// Only `success` notifications are ever filtered here.
    #[must_use]
    pub fn suppresses(&self, level: Level, options: &NotifyOptions) -> bool {
        if level != Level::Success || self.is_always_show(level, options) {
            return false;
        }
        options
            .category_label()
            .is_some_and(|c| self.suppressed_success.contains(&normalize(c)))
    }

    pub fn suppressed_success(&self) -> impl Iterator<Item = &str> {
        self.suppressed_success.iter().map(String::as_str)
    }

    pub fn always_show(&self) -> impl Iterator<Item = &str> {
        self.always_show.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppresses_low_value_success_categories() {
        let policy = SuppressionPolicy::default();
        let options = NotifyOptions::new().category("Selection");
        assert!(policy.suppresses(Level::Success, &options));
    }

    #[test]
    fn other_levels_are_never_filtered_by_category() {
        let policy = SuppressionPolicy::default();
        let options = NotifyOptions::new().category("loading");
        assert!(!policy.suppresses(Level::Info, &options));
        assert!(!policy.suppresses(Level::Warning, &options));
        assert!(!policy.suppresses(Level::Error, &options));
    }

    #[test]
    fn high_priority_escapes_suppression() {
        let policy = SuppressionPolicy::default();
        let options = NotifyOptions::new()
            .category("input")
            .priority(Priority::High);
        assert!(!policy.suppresses(Level::Success, &options));
    }

    #[test]
    fn category_on_both_lists_is_shown() {
        let policy = SuppressionPolicy::new(["input"], ["input"]);
        let options = NotifyOptions::new().category("input");
        assert!(!policy.suppresses(Level::Success, &options));
    }

    #[test]
    fn matching_is_exact_per_label() {
        let policy = SuppressionPolicy::default();
        let options = NotifyOptions::new().category("form input");
        assert!(!policy.suppresses(Level::Success, &options));
    }

    #[test]
    fn always_show_matches_case_insensitively() {
        let policy = SuppressionPolicy::default();
        assert!(policy.is_always_show_category(Some(" AUTH ")));
        assert!(!policy.is_always_show_category(Some("grades")));
        assert!(!policy.is_always_show_category(None));
    }

    #[test]
    fn errors_are_always_show_through_priority() {
        let policy = SuppressionPolicy::default();
        assert!(policy.is_always_show(Level::Error, &NotifyOptions::default()));
        assert!(!policy.is_always_show(Level::Info, &NotifyOptions::default()));
    }
}
