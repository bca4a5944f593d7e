// SPDX-License-Identifier: MPL-2.0
//! Deduplication key for notifications.

use super::notification::Level;
use std::fmt;

/// Category used when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Number of message characters that take part in the key.
pub const MESSAGE_PREFIX_CHARS: usize = 50;

/// Identifies "the same notification": level, category and the first
/// [`MESSAGE_PREFIX_CHARS`] characters of the message.
///
/// The category is trimmed and lowercased, matching how the suppression
/// policy compares categories. `Display` renders `level:category:prefix`
/// for logs and diagnostics; equality compares the parts, never the string.
///
/// # Example
///
/// ```
/// use scholar_toast::notifications::{Fingerprint, Level};
///
/// let a = Fingerprint::new(Level::Success, Some("Grades"), "Grade saved");
/// let b = Fingerprint::new(Level::Success, Some("grades"), "Grade saved");
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "success:grades:Grade saved");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint {
    level: Level,
    category: String,
    prefix: String,
}

impl Fingerprint {
    /// Derives the key. Truncation counts characters, not bytes.
    #[must_use]
    pub fn new(level: Level, category: Option<&str>, message: &str) -> Self {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map_or_else(|| DEFAULT_CATEGORY.to_owned(), str::to_lowercase);
        Self {
            level,
            category,
            prefix: message.chars().take(MESSAGE_PREFIX_CHARS).collect(),
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Message characters that took part in the key.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.level, self.category, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_category_uses_general() {
        let fp = Fingerprint::new(Level::Info, None, "Loaded");
        assert_eq!(fp.category(), DEFAULT_CATEGORY);
        assert_eq!(fp.to_string(), "info:general:Loaded");
        assert_eq!(fp, Fingerprint::new(Level::Info, Some("  "), "Loaded"));
    }

    #[test]
    fn messages_differing_after_prefix_collide() {
        let base = "x".repeat(MESSAGE_PREFIX_CHARS);
        let a = Fingerprint::new(Level::Error, None, &format!("{base} first tail"));
        let b = Fingerprint::new(Level::Error, None, &format!("{base} second tail"));
        assert_eq!(a, b);
    }

    #[test]
    fn level_and_category_separate_keys() {
        let success = Fingerprint::new(Level::Success, Some("grades"), "Saved");
        let info = Fingerprint::new(Level::Info, Some("grades"), "Saved");
        let other_category = Fingerprint::new(Level::Success, Some("profile"), "Saved");
        assert_ne!(success, info);
        assert_ne!(success, other_category);
    }

    #[test]
    fn colons_cannot_shift_parts_between_fields() {
        let a = Fingerprint::new(Level::Success, Some("a:b"), "c");
        let b = Fingerprint::new(Level::Success, Some("a"), "b:c");
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn category_case_and_padding_are_ignored() {
        let a = Fingerprint::new(Level::Success, Some(" Grades "), "Saved");
        let b = Fingerprint::new(Level::Success, Some("grades"), "Saved");
        assert_eq!(a, b);
        assert_eq!(a.category(), "grades");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let message = "é".repeat(80);
        let fp = Fingerprint::new(Level::Success, None, &message);
        assert_eq!(fp.prefix().chars().count(), MESSAGE_PREFIX_CHARS);
        assert_eq!(fp.level(), Level::Success);
    }
}
