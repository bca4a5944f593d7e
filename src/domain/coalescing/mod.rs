// SPDX-License-Identifier: MPL-2.0
//! Coalescing domain types.
//!
//! Value objects bounding the debounce window, the duplicate retention
//! window, the pending queue capacity, toast display durations and the
//! size of the decision history.

pub mod newtypes;

pub use newtypes::{
    buffer_capacity_bounds, debounce_bounds, duration_bounds, queue_capacity_bounds,
    retention_bounds, BufferCapacity, DebounceWindow, QueueCapacity, RetentionWindow,
    ToastDuration,
};
