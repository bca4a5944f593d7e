// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Coalescing**: Debounce and retention windows, pending queue size
//! - **Display**: Toast durations
//! - **Diagnostics**: Activity buffer size

// ==========================================================================
// Coalescing Defaults
// ==========================================================================

/// Quiet period after the last repeat before a toast is shown (ms).
pub const DEFAULT_DEBOUNCE_MS: u64 = 2_000;

pub const MIN_DEBOUNCE_MS: u64 = 100;

pub const MAX_DEBOUNCE_MS: u64 = 10_000;

/// How long a shown fingerprint blocks duplicates (ms).
pub const DEFAULT_RETENTION_MS: u64 = 5_000;

pub const MIN_RETENTION_MS: u64 = 500;

pub const MAX_RETENTION_MS: u64 = 60_000;

/// Distinct fingerprints waiting for their debounce timer.
pub const DEFAULT_MAX_PENDING: usize = 10;

pub const MIN_MAX_PENDING: usize = 1;

pub const MAX_MAX_PENDING: usize = 100;

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Display time for success, info and warning toasts (ms).
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;

/// Display time for error toasts (ms).
pub const DEFAULT_ERROR_TOAST_DURATION_MS: u64 = 5_000;

pub const MIN_TOAST_DURATION_MS: u64 = 500;

pub const MAX_TOAST_DURATION_MS: u64 = 60_000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Coalescer events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_DEBOUNCE_MS > 0);
    assert!(DEFAULT_DEBOUNCE_MS >= MIN_DEBOUNCE_MS);
    assert!(DEFAULT_DEBOUNCE_MS <= MAX_DEBOUNCE_MS);

    assert!(MIN_RETENTION_MS > 0);
    assert!(DEFAULT_RETENTION_MS >= MIN_RETENTION_MS);
    assert!(DEFAULT_RETENTION_MS <= MAX_RETENTION_MS);

    assert!(MIN_MAX_PENDING > 0);
    assert!(DEFAULT_MAX_PENDING >= MIN_MAX_PENDING);
    assert!(DEFAULT_MAX_PENDING <= MAX_MAX_PENDING);

    assert!(MIN_TOAST_DURATION_MS > 0);
    assert!(DEFAULT_TOAST_DURATION_MS >= MIN_TOAST_DURATION_MS);
    assert!(DEFAULT_ERROR_TOAST_DURATION_MS <= MAX_TOAST_DURATION_MS);
    assert!(DEFAULT_ERROR_TOAST_DURATION_MS >= DEFAULT_TOAST_DURATION_MS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
