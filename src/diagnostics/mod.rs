// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the notification coalescer.
//!
//! The coalescer reports every decision it takes (queued, merged, shown,
//! suppressed, evicted...) through a cheap [`DiagnosticsHandle`]. The
//! [`DiagnosticsCollector`] drains those events into a memory-bounded
//! [`EventRing`] and can export them as a JSON report.
//!
//! # Architecture
//!
//! - [`EventRing`]: Fixed-size ring that overwrites the oldest entry
//! - [`CoalescerEventKind`]: What the coalescer decided
//! - [`DiagnosticReport`]: Serializable snapshot with summary counts

mod buffer;
mod collector;
mod events;
mod export;
mod report;

pub use buffer::{BufferCapacity, EventRing};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{CoalescerEventKind, DiagnosticEvent};
pub use export::{generate_default_filename, resolve_report_path, write_atomic};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent};
