// SPDX-License-Identifier: MPL-2.0
//! Display sink contract.
//!
//! A sink renders whatever survives coalescing. It is fire-and-forget: the
//! coalescer calls it synchronously and does not expect a result.

use super::notification::{Level, ResolvedDisplay, Toast};
use std::sync::{Arc, Mutex, PoisonError};

/// Renders toasts, one entry point per level.
pub trait DisplaySink: Send {
    fn success(&mut self, message: &str, display: ResolvedDisplay);
    fn error(&mut self, message: &str, display: ResolvedDisplay);
    fn info(&mut self, message: &str, display: ResolvedDisplay);
    fn warning(&mut self, message: &str, display: ResolvedDisplay);

    /// Routes to the level-specific method.
    fn show(&mut self, level: Level, message: &str, display: ResolvedDisplay) {
        match level {
            Level::Success => self.success(message, display),
            Level::Error => self.error(message, display),
            Level::Info => self.info(message, display),
            Level::Warning => self.warning(message, display),
        }
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn success(&mut self, message: &str, display: ResolvedDisplay) {
        (**self).success(message, display);
    }
    fn error(&mut self, message: &str, display: ResolvedDisplay) {
        (**self).error(message, display);
    }
    fn info(&mut self, message: &str, display: ResolvedDisplay) {
        (**self).info(message, display);
    }
    fn warning(&mut self, message: &str, display: ResolvedDisplay) {
        (**self).warning(message, display);
    }
}

/// Shared sinks let the caller keep reading state the coalescer writes.
impl<S: DisplaySink> DisplaySink for Arc<Mutex<S>> {
    fn success(&mut self, message: &str, display: ResolvedDisplay) {
        self.show(Level::Success, message, display);
    }
    fn error(&mut self, message: &str, display: ResolvedDisplay) {
        self.show(Level::Error, message, display);
    }
    fn info(&mut self, message: &str, display: ResolvedDisplay) {
        self.show(Level::Info, message, display);
    }
    fn warning(&mut self, message: &str, display: ResolvedDisplay) {
        self.show(Level::Warning, message, display);
    }
    fn show(&mut self, level: Level, message: &str, display: ResolvedDisplay) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .show(level, message, display);
    }
}

/// Fans every toast out to two sinks, in order.
impl<A: DisplaySink, B: DisplaySink> DisplaySink for (A, B) {
    fn success(&mut self, message: &str, display: ResolvedDisplay) {
        self.0.success(message, display);
        self.1.success(message, display);
    }
    fn error(&mut self, message: &str, display: ResolvedDisplay) {
        self.0.error(message, display);
        self.1.error(message, display);
    }
    fn info(&mut self, message: &str, display: ResolvedDisplay) {
        self.0.info(message, display);
        self.1.info(message, display);
    }
    fn warning(&mut self, message: &str, display: ResolvedDisplay) {
        self.0.warning(message, display);
        self.1.warning(message, display);
    }
}

/// Sink that keeps every toast it receives, oldest first.
#[derive(Debug, Default)]
pub struct RecordingSink {
    toasts: Vec<Toast>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for tests: a recorder behind a shared handle.
    #[must_use]
    pub fn shared() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::new()))
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Messages in dispatch order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.toasts.iter().map(Toast::message).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Drains the recorded toasts.
    pub fn take(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    fn record(&mut self, level: Level, message: &str, display: ResolvedDisplay) {
        self.toasts.push(Toast::new(level, message, display));
    }
}

impl DisplaySink for RecordingSink {
    fn success(&mut self, message: &str, display: ResolvedDisplay) {
        self.record(Level::Success, message, display);
    }
    fn error(&mut self, message: &str, display: ResolvedDisplay) {
        self.record(Level::Error, message, display);
    }
    fn info(&mut self, message: &str, display: ResolvedDisplay) {
        self.record(Level::Info, message, display);
    }
    fn warning(&mut self, message: &str, display: ResolvedDisplay) {
        self.record(Level::Warning, message, display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coalescing::ToastDuration;
    use crate::notifications::notification::Position;

    fn display() -> ResolvedDisplay {
        ResolvedDisplay {
            position: Position::BottomRight,
            duration: ToastDuration::default(),
        }
    }

    #[test]
    fn show_routes_by_level() {
        let mut sink = RecordingSink::new();
        sink.show(Level::Warning, "Attendance incomplete", display());
        sink.show(Level::Error, "Save failed", display());

        let levels: Vec<_> = sink.toasts().iter().map(Toast::level).collect();
        assert_eq!(levels, vec![Level::Warning, Level::Error]);
    }

    #[test]
    fn shared_sink_is_visible_through_clones() {
        let shared = RecordingSink::shared();
        let mut writer = Arc::clone(&shared);
        writer.info("Term report ready", display());

        assert_eq!(shared.lock().unwrap().messages(), vec!["Term report ready"]);
    }

    #[test]
    fn pair_sink_delivers_to_both() {
        let first = RecordingSink::shared();
        let second = RecordingSink::shared();
        let mut pair = (Arc::clone(&first), Arc::clone(&second));
        pair.success("Saved", display());

        assert_eq!(first.lock().unwrap().len(), 1);
        assert_eq!(second.lock().unwrap().len(), 1);
    }

    #[test]
    fn take_drains_recorder() {
        let mut sink = RecordingSink::new();
        sink.success("one", display());
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }
}
