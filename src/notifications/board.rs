// SPDX-License-Identifier: MPL-2.0
//! On-screen toast stack.
//!
//! The `ToastBoard` is the in-process model of the rendering layer: it limits
//! the number of visible toasts, queues the overflow and dismisses toasts
//! once their display duration has elapsed. It implements [`DisplaySink`]
//! so it can sit directly behind the coalescer.

use super::clock::{Clock, SystemClock};
use super::notification::{Level, ResolvedDisplay, Toast, ToastId};
use super::sink::DisplaySink;
use std::collections::VecDeque;
use std::time::Instant;

/// Maximum number of toasts visible at once.
pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
struct Shown {
    toast: Toast,
    /// When the toast became visible; the display duration counts from here.
    since: Instant,
}

impl Shown {
    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.since) >= self.toast.display().duration.as_duration()
    }
}

/// Visible toasts plus the overflow queue.
pub struct ToastBoard {
    /// Currently visible toasts (newest first).
    visible: VecDeque<Shown>,
    /// Toasts waiting for a free slot.
    queue: VecDeque<Toast>,
    clock: Box<dyn Clock>,
}

impl Default for ToastBoard {
    fn default() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }
}

impl ToastBoard {
    /// Creates an empty board on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty board on a custom clock.
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            visible: VecDeque::new(),
            queue: VecDeque::new(),
            clock,
        }
    }

    /// Adds a toast, showing it immediately if a slot is free.
    pub fn push(&mut self, toast: Toast) {
        if self.visible.len() < MAX_VISIBLE {
            let since = self.clock.now();
            self.visible.push_front(Shown { toast, since });
        } else {
            self.queue.push_back(toast);
        }
    }

    /// Dismisses a toast by its ID.
    ///
    /// Returns `true` if the toast was found and removed.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        if let Some(pos) = self.visible.iter().position(|s| s.toast.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }

        if let Some(pos) = self.queue.iter().position(|t| t.id() == id) {
            self.queue.remove(pos);
            return true;
        }

        false
    }

    /// Dismisses every visible toast whose duration has elapsed.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let expired: Vec<ToastId> = self
            .visible
            .iter()
            .filter(|s| s.expired(now))
            .map(|s| s.toast.id())
            .collect();

        for id in expired {
            self.dismiss(id);
        }
    }

    /// Returns the visible toasts, newest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.visible.iter().map(|s| &s.toast)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn has_toasts(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    /// Clears all toasts (visible and queued).
    pub fn clear(&mut self) {
        self.visible.clear();
        self.queue.clear();
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            let Some(toast) = self.queue.pop_front() else {
                break;
            };
            let since = self.clock.now();
            self.visible.push_back(Shown { toast, since });
        }
    }
}

impl DisplaySink for ToastBoard {
    fn success(&mut self, message: &str, display: ResolvedDisplay) {
        self.push(Toast::new(Level::Success, message, display));
    }
    fn error(&mut self, message: &str, display: ResolvedDisplay) {
        self.push(Toast::new(Level::Error, message, display));
    }
    fn info(&mut self, message: &str, display: ResolvedDisplay) {
        self.push(Toast::new(Level::Info, message, display));
    }
    fn warning(&mut self, message: &str, display: ResolvedDisplay) {
        self.push(Toast::new(Level::Warning, message, display));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coalescing::ToastDuration;
    use crate::notifications::clock::ManualClock;
    use crate::notifications::notification::Position;
    use std::time::Duration;

    fn toast(message: &str, duration_ms: u64) -> Toast {
        Toast::new(
            Level::Success,
            message,
            ResolvedDisplay {
                position: Position::TopRight,
                duration: ToastDuration::from_millis(duration_ms),
            },
        )
    }

    fn board() -> (ToastBoard, ManualClock) {
        let clock = ManualClock::new();
        (ToastBoard::with_clock(Box::new(clock.clone())), clock)
    }

    #[test]
    fn new_board_is_empty() {
        let (board, _) = board();
        assert_eq!(board.visible_count(), 0);
        assert_eq!(board.queued_count(), 0);
        assert!(!board.has_toasts());
    }

    #[test]
    fn push_queues_when_visible_is_full() {
        let (mut board, _) = board();
        for i in 0..MAX_VISIBLE {
            board.push(toast(&format!("grade-{i}"), 3_000));
        }
        board.push(toast("overflow", 3_000));

        assert_eq!(board.visible_count(), MAX_VISIBLE);
        assert_eq!(board.queued_count(), 1);
    }

    #[test]
    fn newest_toast_is_listed_first() {
        let (mut board, _) = board();
        board.push(toast("first", 3_000));
        board.push(toast("second", 3_000));

        let messages: Vec<_> = board.visible().map(Toast::message).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn dismiss_promotes_from_queue() {
        let (mut board, _) = board();
        let first = toast("visible-0", 3_000);
        let first_id = first.id();
        board.push(first);
        for i in 1..MAX_VISIBLE {
            board.push(toast(&format!("visible-{i}"), 3_000));
        }
        board.push(toast("queued", 3_000));

        assert!(board.dismiss(first_id));
        assert_eq!(board.visible_count(), MAX_VISIBLE);
        assert_eq!(board.queued_count(), 0);
    }

    #[test]
    fn dismiss_unknown_returns_false() {
        let (mut board, _) = board();
        assert!(!board.dismiss(toast("never pushed", 3_000).id()));
    }

    #[test]
    fn tick_expires_toasts_after_their_duration() {
        let (mut board, clock) = board();
        board.push(toast("short", 1_000));
        board.push(toast("long", 5_000));

        clock.advance(Duration::from_millis(999));
        board.tick();
        assert_eq!(board.visible_count(), 2);

        clock.advance(Duration::from_millis(1));
        board.tick();
        let remaining: Vec<_> = board.visible().map(Toast::message).collect();
        assert_eq!(remaining, vec!["long"]);
    }

    #[test]
    fn promoted_toast_duration_starts_when_shown() {
        let (mut board, clock) = board();
        for i in 0..MAX_VISIBLE {
            board.push(toast(&format!("v{i}"), 1_000));
        }
        board.push(toast("queued", 1_000));

        clock.advance(Duration::from_millis(1_000));
        board.tick();
        assert_eq!(board.visible_count(), 1);

        clock.advance(Duration::from_millis(500));
        board.tick();
        assert_eq!(board.visible_count(), 1, "queued toast only became visible 500ms ago");
    }

    #[test]
    fn dismiss_by_id_then_clear() {
        let (mut board, _) = board();
        let t = toast("dismiss me", 3_000);
        let id = t.id();
        board.push(t);
        board.push(toast("keep", 3_000));

        assert!(board.dismiss(id));
        assert!(!board.dismiss(id));
        assert_eq!(board.visible_count(), 1);

        board.clear();
        assert!(!board.has_toasts());
    }

    #[test]
    fn board_accepts_sink_calls() {
        let (mut board, _) = board();
        let display = ResolvedDisplay {
            position: Position::TopCenter,
            duration: ToastDuration::default(),
        };
        board.error("Could not reach the results service", display);

        let shown: Vec<_> = board.visible().map(Toast::level).collect();
        assert_eq!(shown, vec![Level::Error]);
    }
}
