// SPDX-License-Identifier: MPL-2.0
//! Collector for coalescer activity events.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::info;

use super::export::write_atomic;
use super::{
    BufferCapacity, CoalescerEventKind, DiagnosticEvent, DiagnosticReport, EventRing,
    ReportMetadata, SerializableEvent,
};
use crate::error::{Error, Result};

/// Events buffered between the coalescer and the collector.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Sending side, held by the coalescer.
///
/// Cheap to clone. Never blocks: events are dropped when the channel is
/// full or the collector is gone.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log(&self, kind: CoalescerEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Stores coalescer events in a bounded ring and builds reports from them.
pub struct DiagnosticsCollector {
    ring: EventRing<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// Monotonic start, for relative timestamps.
    started_at: Instant,
    /// Wall-clock start, for report metadata.
    started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);
        Self {
            ring: EventRing::new(capacity),
            event_rx,
            event_tx,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the ring.
    ///
    /// Call this regularly; events beyond the channel capacity are lost
    /// between two calls.
    pub fn process_pending(&mut self) -> usize {
        let mut received = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.ring.push(event);
            received += 1;
        }
        received
    }

    /// Records an event directly, bypassing the channel.
    pub fn log(&mut self, kind: CoalescerEventKind) {
        self.ring.push(DiagnosticEvent::new(kind));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.ring.iter()
    }

    pub fn clear(&mut self) {
        self.ring.clear();
    }

    /// Number of stored events per kind name.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for event in self.ring.iter() {
            *counts.entry(event.kind.name()).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn collection_duration(&self) -> Duration {
        self.started_at.elapsed()
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn build_report(&self) -> DiagnosticReport {
        let events: Vec<SerializableEvent> = self
            .ring
            .iter()
            .map(|event| SerializableEvent::new(event.timestamp, self.started_at, event.kind.clone()))
            .collect();

        let metadata = ReportMetadata::new(
            self.started_at_utc,
            self.collection_duration().as_millis() as u64,
            events.len(),
            self.ring.overwritten(),
        );
        DiagnosticReport::new(metadata, events)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> Result<String> {
        Ok(self.build_report().to_json()?)
    }

    /// Writes the JSON report to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Export`] if serialization or the write fails.
    pub fn export_to_path(&self, path: &Path) -> Result<()> {
        let json = self
            .export_json()
            .map_err(|e| Error::Export(e.to_string()))?;
        write_atomic(path, &json)
            .map_err(|e| Error::Export(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), events = self.len(), "exported diagnostics report");
        Ok(())
    }
}
