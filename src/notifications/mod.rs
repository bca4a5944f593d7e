// SPDX-License-Identifier: MPL-2.0
//! Toast notifications with burst coalescing.
//!
//! Application code raises notifications freely; the [`Coalescer`] turns
//! bursts into a single toast, drops noise and repeats, and hands the rest
//! to a [`DisplaySink`].
//!
//! # Architecture
//!
//! - [`Coalescer`]: Fingerprinting, debounce, retention and suppression
//! - [`DisplaySink`]: Rendering contract (see [`ToastBoard`] and [`RecordingSink`])
//! - [`NotifierHandle`]: Async front end from [`spawn`]
//!
//! # Example
//!
//! ```
//! use scholar_toast::notifications::{
//!     Coalescer, CoalescerSettings, ManualClock, NotifyOptions, Outcome, RecordingSink,
//! };
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let sink = RecordingSink::shared();
//! let mut coalescer =
//!     Coalescer::with_clock(CoalescerSettings::default(), Arc::clone(&sink), clock.clone());
//!
//! coalescer.success("Grade saved", NotifyOptions::new());
//! let outcome = coalescer.success("Grade saved", NotifyOptions::new());
//! assert_eq!(outcome, Outcome::Merged { count: 2 });
//!
//! clock.advance(Duration::from_secs(2));
//! coalescer.poll();
//! assert_eq!(sink.lock().unwrap().messages(), vec!["Grade saved (2)"]);
//! ```

mod board;
mod clock;
mod coalescer;
pub mod driver;
mod fingerprint;
mod notification;
mod policy;
mod scheduler;
mod sink;

pub use board::{ToastBoard, MAX_VISIBLE};
pub use clock::{Clock, ManualClock, SystemClock};
pub use coalescer::{Coalescer, CoalescerSettings, LevelDurations, Outcome, SuppressReason};
pub use driver::{spawn, NotifierHandle, TokioClock};
pub use fingerprint::{Fingerprint, DEFAULT_CATEGORY, MESSAGE_PREFIX_CHARS};
pub use notification::{
    DisplayOptions, Level, NotifyOptions, Position, Priority, ResolvedDisplay, Toast, ToastId,
};
pub use policy::{SuppressionPolicy, DEFAULT_ALWAYS_SHOW, DEFAULT_SUPPRESSED_SUCCESS};
pub use scheduler::{Scheduler, TimerId};
pub use sink::{DisplaySink, RecordingSink};
