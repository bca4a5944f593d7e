// SPDX-License-Identifier: MPL-2.0
//! Coalescer activity events.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::notifications::{Level, SuppressReason};

/// A decision taken by the coalescer.
///
/// Fingerprints are `level:category:prefix` strings; `None` means the
/// notification was dropped before a fingerprint was computed or was
/// force-shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoalescerEventKind {
    Queued {
        fingerprint: String,
    },
    Merged {
        fingerprint: String,
        count: u32,
    },
    Dispatched {
        #[serde(skip_serializing_if = "Option::is_none")]
        fingerprint: Option<String>,
        level: Level,
        count: u32,
        forced: bool,
    },
    Suppressed {
        #[serde(skip_serializing_if = "Option::is_none")]
        fingerprint: Option<String>,
        level: Level,
        reason: SuppressReason,
    },
    /// Pushed out of a full queue; never shown.
    Evicted {
        fingerprint: String,
        count: u32,
    },
    /// Retention window ended.
    Forgotten {
        fingerprint: String,
    },
    Cleared {
        pending: usize,
        recent: usize,
    },
    EnabledChanged {
        enabled: bool,
    },
}

impl CoalescerEventKind {
    /// Stable snake_case name, matching the serialized `type` tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Queued { .. } => "queued",
            Self::Merged { .. } => "merged",
            Self::Dispatched { .. } => "dispatched",
            Self::Suppressed { .. } => "suppressed",
            Self::Evicted { .. } => "evicted",
            Self::Forgotten { .. } => "forgotten",
            Self::Cleared { .. } => "cleared",
            Self::EnabledChanged { .. } => "enabled_changed",
        }
    }
}

/// An event stamped with the monotonic time it was recorded.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub timestamp: Instant,
    pub kind: CoalescerEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: CoalescerEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}
