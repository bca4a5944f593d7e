// SPDX-License-Identifier: MPL-2.0
//! Coalescing newtypes.
//!
//! Every timing knob of the coalescer is carried as a clamped value so the
//! scheduler never sees a zero-length debounce or an unbounded retention.

use std::time::Duration;

// =============================================================================
// Bounds
// =============================================================================

/// Debounce window bounds in milliseconds (100 ms to 10 s).
pub mod debounce_bounds {
    /// Minimum debounce window.
    pub const MIN_MS: u64 = 100;
    /// Maximum debounce window.
    pub const MAX_MS: u64 = 10_000;
    /// Default debounce window.
    pub const DEFAULT_MS: u64 = 2_000;
}

/// Retention window bounds in milliseconds (500 ms to 60 s).
pub mod retention_bounds {
    /// Minimum retention window.
    pub const MIN_MS: u64 = 500;
    /// Maximum retention window.
    pub const MAX_MS: u64 = 60_000;
    /// Default retention window.
    pub const DEFAULT_MS: u64 = 5_000;
}

/// Pending queue capacity bounds (1 to 100 distinct fingerprints).
pub mod queue_capacity_bounds {
    /// Minimum number of pending entries.
    pub const MIN: usize = 1;
    /// Maximum number of pending entries.
    pub const MAX: usize = 100;
    /// Default number of pending entries.
    pub const DEFAULT: usize = 10;
}

/// Toast display duration bounds in milliseconds (500 ms to 60 s).
pub mod duration_bounds {
    /// Shortest toast.
    pub const MIN_MS: u64 = 500;
    /// Longest toast.
    pub const MAX_MS: u64 = 60_000;
    /// Default for success, info and warning toasts.
    pub const DEFAULT_MS: u64 = 3_000;
    /// Default for error toasts.
    pub const DEFAULT_ERROR_MS: u64 = 5_000;
}

/// Diagnostics history bounds (10 to 10 000 events).
pub mod buffer_capacity_bounds {
    pub const MIN: usize = 10;
    pub const MAX: usize = 10_000;
    pub const DEFAULT: usize = 500;
}

// =============================================================================
// DebounceWindow
// =============================================================================

/// Quiet period after the last occurrence of a fingerprint before it is shown.
///
/// # Example
///
/// ```
/// use scholar_toast::domain::coalescing::DebounceWindow;
///
/// assert_eq!(DebounceWindow::from_millis(2_000).as_millis(), 2_000);
/// assert_eq!(DebounceWindow::from_millis(0).as_millis(), 100); // clamped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DebounceWindow(u64);

impl DebounceWindow {
    /// Creates a debounce window, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(debounce_bounds::MIN_MS, debounce_bounds::MAX_MS))
    }

    /// Returns the window in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the window as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for DebounceWindow {
    fn default() -> Self {
        Self(debounce_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// RetentionWindow
// =============================================================================

/// How long a dispatched fingerprint keeps blocking identical requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RetentionWindow(u64);

impl RetentionWindow {
    /// Creates a retention window, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(retention_bounds::MIN_MS, retention_bounds::MAX_MS))
    }

    /// Returns the window in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the window as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for RetentionWindow {
    fn default() -> Self {
        Self(retention_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// QueueCapacity
// =============================================================================

/// Maximum number of distinct fingerprints waiting for their debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueCapacity(usize);

impl QueueCapacity {
    /// Creates a queue capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(queue_capacity_bounds::MIN, queue_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns the capacity as a non-zero count.
    #[must_use]
    pub fn as_non_zero(self) -> std::num::NonZeroUsize {
        // `new` clamps to at least 1
        std::num::NonZeroUsize::new(self.0).unwrap_or(std::num::NonZeroUsize::MIN)
    }
}

impl Default for QueueCapacity {
    fn default() -> Self {
        Self(queue_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// ToastDuration
// =============================================================================

/// How long the display sink keeps a toast on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToastDuration(u64);

impl ToastDuration {
    /// Creates a toast duration, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(duration_bounds::MIN_MS, duration_bounds::MAX_MS))
    }

    /// Returns the duration in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the value as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for ToastDuration {
    fn default() -> Self {
        Self(duration_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// BufferCapacity
// =============================================================================

/// Number of coalescer decisions kept in the diagnostics history.
///
/// ```
/// use scholar_toast::domain::coalescing::BufferCapacity;
///
/// assert_eq!(BufferCapacity::new(250).value(), 250);
/// assert_eq!(BufferCapacity::new(0).value(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_window_clamps() {
        assert_eq!(
            DebounceWindow::from_millis(1).as_millis(),
            debounce_bounds::MIN_MS
        );
        assert_eq!(
            DebounceWindow::from_millis(u64::MAX).as_millis(),
            debounce_bounds::MAX_MS
        );
    }

    #[test]
    fn debounce_window_default_is_two_seconds() {
        assert_eq!(
            DebounceWindow::default().as_duration(),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn retention_window_clamps() {
        assert_eq!(
            RetentionWindow::from_millis(0).as_millis(),
            retention_bounds::MIN_MS
        );
        assert_eq!(
            RetentionWindow::from_millis(3_600_000).as_millis(),
            retention_bounds::MAX_MS
        );
        assert_eq!(RetentionWindow::from_millis(8_000).as_millis(), 8_000);
    }

    #[test]
    fn queue_capacity_never_zero() {
        assert_eq!(QueueCapacity::new(0).value(), 1);
        assert_eq!(QueueCapacity::new(0).as_non_zero().get(), 1);
        assert_eq!(QueueCapacity::new(1_000).value(), queue_capacity_bounds::MAX);
    }

    #[test]
    fn toast_duration_clamps_and_converts() {
        assert_eq!(ToastDuration::from_millis(10).as_millis(), 500);
        assert_eq!(
            ToastDuration::from_millis(4_000).as_duration(),
            Duration::from_secs(4)
        );
    }

    #[test]
    fn buffer_capacity_clamps_both_ends() {
        assert_eq!(BufferCapacity::new(3).value(), buffer_capacity_bounds::MIN);
        assert_eq!(BufferCapacity::new(1 << 20).value(), buffer_capacity_bounds::MAX);
        assert_eq!(BufferCapacity::default().value(), 500);
    }

    #[test]
    fn error_default_outlasts_regular_default() {
        assert!(duration_bounds::DEFAULT_ERROR_MS > duration_bounds::DEFAULT_MS);
    }
}
