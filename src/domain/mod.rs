// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`coalescing`]: Clamped timing and capacity types
//!   ([`DebounceWindow`](coalescing::DebounceWindow),
//!   [`RetentionWindow`](coalescing::RetentionWindow),
//!   [`QueueCapacity`](coalescing::QueueCapacity),
//!   [`ToastDuration`](coalescing::ToastDuration),
//!   [`BufferCapacity`](coalescing::BufferCapacity))

pub mod coalescing;
