// SPDX-License-Identifier: MPL-2.0
//! `scholar_toast` coalesces bursts of toast notifications for a school
//! management front end.
//!
//! Repeated notifications collapse into one toast with a count, low-value
//! successes are dropped, and recently shown messages are not repeated.
//! See [`notifications`] for the coalescer and [`config`] for tuning.

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod paths;
