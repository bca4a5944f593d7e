// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report model.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CoalescerEventKind;

/// Metadata about a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// When the report was generated (RFC 3339)
    pub generated_at: String,
    pub version: String,
    /// When collection started (RFC 3339)
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    pub event_count: usize,
    /// Events lost because the ring was full
    pub events_overwritten: u64,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
        events_overwritten: u64,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
            events_overwritten,
        }
    }
}

/// An event with its timestamp relative to collection start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: CoalescerEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(event_timestamp: Instant, collection_start: Instant, kind: CoalescerEventKind) -> Self {
        let timestamp_ms = event_timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;
        Self { timestamp_ms, kind }
    }
}

/// Per-kind counts plus the headline numbers for coalescing efficiency.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub event_counts: BTreeMap<String, usize>,
    /// Calls that reached the queue (queued + merged).
    pub requests_coalesced: usize,
    /// Toasts actually handed to the sink.
    pub toasts_shown: usize,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        let mut summary = Self::default();
        for event in events {
            *summary
                .event_counts
                .entry(event.kind.name().to_string())
                .or_insert(0) += 1;
            match event.kind {
                CoalescerEventKind::Queued { .. } | CoalescerEventKind::Merged { .. } => {
                    summary.requests_coalesced += 1;
                }
                CoalescerEventKind::Dispatched { .. } => summary.toasts_shown += 1,
                _ => {}
            }
        }
        summary
    }
}

/// A complete diagnostic report ready for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub events: Vec<SerializableEvent>,
    pub summary: ReportSummary,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(metadata: ReportMetadata, events: Vec<SerializableEvent>) -> Self {
        let summary = ReportSummary::from_events(&events);
        Self {
            metadata,
            events,
            summary,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::Level;
    use std::time::Duration;

    fn event(ms: u64, kind: CoalescerEventKind) -> SerializableEvent {
        let start = Instant::now();
        SerializableEvent::new(start + Duration::from_millis(ms), start, kind)
    }

    #[test]
    fn serializable_event_uses_relative_millis() {
        let e = event(1_500, CoalescerEventKind::EnabledChanged { enabled: true });
        assert_eq!(e.timestamp_ms, 1_500);
    }

    #[test]
    fn serializable_event_flattens_kind() {
        let e = event(
            10,
            CoalescerEventKind::Queued {
                fingerprint: "info:general:Synced".into(),
            },
        );
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["timestamp_ms"], 10);
        assert_eq!(json["type"], "queued");
    }

    #[test]
    fn summary_counts_by_kind() {
        let fp = || "success:input:Grade saved".to_string();
        let events = vec![
            event(0, CoalescerEventKind::Queued { fingerprint: fp() }),
            event(1, CoalescerEventKind::Merged { fingerprint: fp(), count: 2 }),
            event(2, CoalescerEventKind::Merged { fingerprint: fp(), count: 3 }),
            event(
                2_002,
                CoalescerEventKind::Dispatched {
                    fingerprint: Some(fp()),
                    level: Level::Success,
                    count: 3,
                    forced: false,
                },
            ),
        ];
        let summary = ReportSummary::from_events(&events);

        assert_eq!(summary.event_counts["merged"], 2);
        assert_eq!(summary.requests_coalesced, 3);
        assert_eq!(summary.toasts_shown, 1);
    }

    #[test]
    fn empty_report_has_empty_summary() {
        let metadata = ReportMetadata::new(Utc::now(), 0, 0, 0);
        let report = DiagnosticReport::new(metadata, Vec::new());
        assert!(report.summary.event_counts.is_empty());

        let json = report.to_json().unwrap();
        let parsed: DiagnosticReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.metadata.version, env!("CARGO_PKG_VERSION"));
    }
}
