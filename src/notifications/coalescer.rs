// SPDX-License-Identifier: MPL-2.0
//! Debouncing, deduplicating notification coalescer.
//!
//! Every call is reduced to a [`Fingerprint`]. Repeats of a fingerprint within
//! the debounce window collapse into one pending entry whose timer restarts
//! on each repeat; when the timer expires the toast is handed to the sink
//! with a `(count)` suffix, and the fingerprint is remembered for the
//! retention window so immediate repeats are dropped.
//!
//! The coalescer owns no thread and no runtime. Time comes from a [`Clock`]
//! and timers only fire inside [`Coalescer::poll`], so every mutation happens
//! inside a single `&mut self` call. Drivers (see [`super::driver`]) call
//! `poll` at [`Coalescer::next_deadline`].

use super::clock::{Clock, SystemClock};
use super::fingerprint::Fingerprint;
use super::notification::{
    DisplayOptions, Level, NotifyOptions, Position, ResolvedDisplay,
};
use super::policy::SuppressionPolicy;
use super::scheduler::{Scheduler, TimerId};
use super::sink::DisplaySink;
use crate::diagnostics::{CoalescerEventKind, DiagnosticsHandle};
use crate::domain::coalescing::{DebounceWindow, QueueCapacity, RetentionWindow, ToastDuration};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::Instant;
use tracing::{debug, info};

/// Why a notification was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// Notifications are globally disabled.
    Disabled,
    /// `success` in a low-value category.
    LowValueCategory,
    /// Same fingerprint shown within the retention window.
    RecentDuplicate,
}

/// What happened to a notification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// New pending entry; shown when its debounce timer expires.
    Queued,
    /// Folded into an existing pending entry.
    Merged { count: u32 },
    /// Dropped.
    Suppressed(SuppressReason),
    /// Handed to the sink immediately.
    Shown,
}

/// Display duration per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDurations {
    pub success: ToastDuration,
    pub info: ToastDuration,
    pub warning: ToastDuration,
    pub error: ToastDuration,
}

impl Default for LevelDurations {
    fn default() -> Self {
        Self {
            success: Level::Success.default_duration(),
            info: Level::Info.default_duration(),
            warning: Level::Warning.default_duration(),
            error: Level::Error.default_duration(),
        }
    }
}

impl LevelDurations {
    #[must_use]
    pub fn for_level(&self, level: Level) -> ToastDuration {
        match level {
            Level::Success => self.success,
            Level::Info => self.info,
            Level::Warning => self.warning,
            Level::Error => self.error,
        }
    }
}

/// Tuning parameters, usually built from [`crate::config::Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoalescerSettings {
    /// Initial state of the kill switch.
    pub enabled: bool,
    pub debounce: DebounceWindow,
    pub retention: RetentionWindow,
    pub capacity: QueueCapacity,
    pub default_position: Position,
    pub durations: LevelDurations,
    pub policy: SuppressionPolicy,
}

impl Default for CoalescerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce: DebounceWindow::default(),
            retention: RetentionWindow::default(),
            capacity: QueueCapacity::default(),
            default_position: Position::default(),
            durations: LevelDurations::default(),
            policy: SuppressionPolicy::default(),
        }
    }
}

#[derive(Debug)]
enum Timer {
    Debounce(Fingerprint),
    Retention(Fingerprint),
}

#[derive(Debug)]
struct PendingEntry {
    level: Level,
    /// Latest message text for this fingerprint, without the count suffix.
    message: String,
    display: DisplayOptions,
    count: u32,
    timer: TimerId,
}

/// The notification coalescer. One instance per process is the norm; pass
/// it (or a [`super::NotifierHandle`]) to the code that needs it.
pub struct Coalescer {
    settings: CoalescerSettings,
    enabled: bool,
    /// Never promoted on access, so LRU order is insertion order.
    pending: LruCache<Fingerprint, PendingEntry>,
    recent: HashMap<Fingerprint, TimerId>,
    timers: Scheduler<Timer>,
    sink: Box<dyn DisplaySink>,
    clock: Box<dyn Clock>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Coalescer {
    /// Creates a coalescer on the system clock.
    pub fn new(settings: CoalescerSettings, sink: impl DisplaySink + 'static) -> Self {
        Self::with_clock(settings, sink, SystemClock)
    }

    /// Creates a coalescer on a custom clock.
    pub fn with_clock(
        settings: CoalescerSettings,
        sink: impl DisplaySink + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            enabled: settings.enabled,
            pending: LruCache::new(settings.capacity.as_non_zero()),
            recent: HashMap::new(),
            timers: Scheduler::new(),
            sink: Box::new(sink),
            clock: Box::new(clock),
            diagnostics: None,
            settings,
        }
    }

    /// Sets the diagnostics handle that receives every decision.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn settings(&self) -> &CoalescerSettings {
        &self.settings
    }

    // =========================================================================
    // Public operations
    // =========================================================================

    /// Standard path: filtering, deduplication and debouncing all apply.
    pub fn notify(
        &mut self,
        level: Level,
        message: impl Into<String>,
        options: NotifyOptions,
    ) -> Outcome {
        let message = message.into();
        let always_show = self.settings.policy.is_always_show(level, &options);

        if !self.enabled && !always_show {
            return self.suppress(level, None, SuppressReason::Disabled);
        }

        if self.settings.policy.suppresses(level, &options) {
            return self.suppress(level, None, SuppressReason::LowValueCategory);
        }

        let fingerprint = Fingerprint::new(level, options.category_label(), &message);

        if options.suppress_duplicates && self.recent.contains_key(&fingerprint) {
            return self.suppress(level, Some(fingerprint), SuppressReason::RecentDuplicate);
        }

        let deadline = self.clock.now() + self.settings.debounce.as_duration();

        if let Some(entry) = self.pending.peek_mut(&fingerprint) {
            entry.count = entry.count.saturating_add(1);
            entry.message = message;
            entry.display = options.display;
            self.timers.cancel(entry.timer);
            entry.timer = self
                .timers
                .schedule(deadline, Timer::Debounce(fingerprint.clone()));
            let count = entry.count;

            debug!(%fingerprint, count, "merged repeat notification");
            self.record(CoalescerEventKind::Merged {
                fingerprint: fingerprint.to_string(),
                count,
            });
            return Outcome::Merged { count };
        }

        if self.pending.len() >= self.settings.capacity.value() {
            self.evict_oldest();
        }

        let timer = self
            .timers
            .schedule(deadline, Timer::Debounce(fingerprint.clone()));
        debug!(%fingerprint, "queued notification");
        self.record(CoalescerEventKind::Queued {
            fingerprint: fingerprint.to_string(),
        });
        self.pending.put(
            fingerprint,
            PendingEntry {
                level,
                message,
                display: options.display,
                count: 1,
                timer,
            },
        );
        Outcome::Queued
    }

    pub fn success(&mut self, message: impl Into<String>, options: NotifyOptions) -> Outcome {
        self.notify(Level::Success, message, options)
    }

    pub fn error(&mut self, message: impl Into<String>, options: NotifyOptions) -> Outcome {
        self.notify(Level::Error, message, options)
    }

    pub fn info(&mut self, message: impl Into<String>, options: NotifyOptions) -> Outcome {
        self.notify(Level::Info, message, options)
    }

    pub fn warning(&mut self, message: impl Into<String>, options: NotifyOptions) -> Outcome {
        self.notify(Level::Warning, message, options)
    }

    /// Shows a toast right away, ignoring the kill switch, suppression,
    /// duplicate blocking and the debounce queue.
    ///
    /// Pending and recent state are left untouched.
    pub fn force_show(
        &mut self,
        level: Level,
        message: impl Into<String>,
        options: NotifyOptions,
    ) -> Outcome {
        let message = message.into();
        let display = self.resolve(level, options.display);
        self.sink.show(level, &message, display);

        debug!(%level, "forced notification shown");
        self.record(CoalescerEventKind::Dispatched {
            fingerprint: None,
            level,
            count: 1,
            forced: true,
        });
        Outcome::Shown
    }

    /// Collapses several messages into one notification.
    ///
    /// Returns `None` for an empty slice. A single message goes through
    /// [`Coalescer::notify`] unchanged; more become
    /// `"Multiple updates: A, B and N more"`.
    pub fn group<S: AsRef<str>>(
        &mut self,
        messages: &[S],
        level: Level,
        options: NotifyOptions,
    ) -> Option<Outcome> {
        let message = match messages {
            [] => return None,
            [only] => only.as_ref().to_owned(),
            [first, second, rest @ ..] => {
                let mut text =
                    format!("Multiple updates: {}, {}", first.as_ref(), second.as_ref());
                if !rest.is_empty() {
                    let _ = write!(text, " and {} more", rest.len());
                }
                text
            }
        };
        Some(self.notify(level, message, options))
    }

    /// Process-wide kill switch for [`Coalescer::notify`].
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            info!(enabled, "notifications toggled");
        }
        self.enabled = enabled;
        self.record(CoalescerEventKind::EnabledChanged { enabled });
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cancels every timer and forgets all pending and recent notifications.
    pub fn clear_all(&mut self) {
        let pending = self.pending.len();
        let recent = self.recent.len();
        self.timers.clear();
        self.pending.clear();
        self.recent.clear();

        debug!(pending, recent, "cleared notification state");
        self.record(CoalescerEventKind::Cleared { pending, recent });
    }

    /// Fires every expired timer. Returns the number of toasts dispatched.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut dispatched = 0;

        while let Some((id, timer)) = self.timers.pop_expired(now) {
            match timer {
                Timer::Debounce(fingerprint) => {
                    if self.dispatch(id, fingerprint, now) {
                        dispatched += 1;
                    }
                }
                Timer::Retention(fingerprint) => {
                    if self.recent.get(&fingerprint) == Some(&id) {
                        self.recent.remove(&fingerprint);
                        self.record(CoalescerEventKind::Forgotten {
                            fingerprint: fingerprint.to_string(),
                        });
                    }
                }
            }
        }

        dispatched
    }

    /// Earliest instant at which [`Coalescer::poll`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn recent_count(&self) -> usize {
        self.recent.len()
    }

    #[must_use]
    pub fn is_pending(&self, fingerprint: &Fingerprint) -> bool {
        self.pending.contains(fingerprint)
    }

    #[must_use]
    pub fn is_recent(&self, fingerprint: &Fingerprint) -> bool {
        self.recent.contains_key(fingerprint)
    }

    /// Number of live timers (debounce and retention).
    #[must_use]
    pub fn scheduled_timers(&self) -> usize {
        self.timers.len()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn dispatch(&mut self, id: TimerId, fingerprint: Fingerprint, now: Instant) -> bool {
        match self.pending.peek(&fingerprint) {
            Some(entry) if entry.timer == id => {}
            _ => return false,
        }
        let Some(entry) = self.pending.pop(&fingerprint) else {
            return false;
        };

        let message = if entry.count > 1 {
            format!("{} ({})", entry.message, entry.count)
        } else {
            entry.message
        };
        let display = self.resolve(entry.level, entry.display);
        self.sink.show(entry.level, &message, display);

        if let Some(previous) = self.recent.remove(&fingerprint) {
            self.timers.cancel(previous);
        }
        let retention = self.timers.schedule(
            now + self.settings.retention.as_duration(),
            Timer::Retention(fingerprint.clone()),
        );

        debug!(%fingerprint, count = entry.count, "dispatched notification");
        self.record(CoalescerEventKind::Dispatched {
            fingerprint: Some(fingerprint.to_string()),
            level: entry.level,
            count: entry.count,
            forced: false,
        });
        self.recent.insert(fingerprint, retention);
        true
    }

    fn evict_oldest(&mut self) {
        if let Some((fingerprint, entry)) = self.pending.pop_lru() {
            self.timers.cancel(entry.timer);
            debug!(%fingerprint, count = entry.count, "evicted pending notification");
            self.record(CoalescerEventKind::Evicted {
                fingerprint: fingerprint.to_string(),
                count: entry.count,
            });
        }
    }

    fn suppress(
        &self,
        level: Level,
        fingerprint: Option<Fingerprint>,
        reason: SuppressReason,
    ) -> Outcome {
        debug!(%level, ?reason, "suppressed notification");
        self.record(CoalescerEventKind::Suppressed {
            fingerprint: fingerprint.map(|fp| fp.to_string()),
            level,
            reason,
        });
        Outcome::Suppressed(reason)
    }

    fn resolve(&self, level: Level, display: DisplayOptions) -> ResolvedDisplay {
        ResolvedDisplay {
            position: display.position.unwrap_or(self.settings.default_position),
            duration: display
                .duration
                .unwrap_or_else(|| self.settings.durations.for_level(level)),
        }
    }

    fn record(&self, kind: CoalescerEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.log(kind);
        }
    }
}
