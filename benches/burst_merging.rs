// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the coalescer hot paths.
//!
//! Measures:
//! - Merging a burst of identical notifications into one pending entry
//! - Churning a full pending queue with distinct fingerprints (eviction)
//! - Dispatching a full queue on poll

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use scholar_toast::notifications::{
    Coalescer, CoalescerSettings, ManualClock, NotifyOptions, RecordingSink,
};
use std::hint::black_box;
use std::time::Duration;

fn fresh() -> (Coalescer, ManualClock) {
    let clock = ManualClock::new();
    let coalescer =
        Coalescer::with_clock(CoalescerSettings::default(), RecordingSink::new(), clock.clone());
    (coalescer, clock)
}

fn burst_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("burst_merging");

    group.bench_function("merge_100_identical", |b| {
        b.iter_batched(
            fresh,
            |(mut coalescer, _clock)| {
                for _ in 0..100 {
                    black_box(coalescer.success("Grade saved", NotifyOptions::new()));
                }
            },
            BatchSize::SmallInput,
        );
    });

    let messages: Vec<String> = (0..100).map(|i| format!("Report {i} generated")).collect();
    group.bench_function("evict_100_distinct", |b| {
        b.iter_batched(
            fresh,
            |(mut coalescer, _clock)| {
                for message in &messages {
                    black_box(coalescer.info(message.as_str(), NotifyOptions::new()));
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("poll_full_queue", |b| {
        b.iter_batched(
            || {
                let (mut coalescer, clock) = fresh();
                for message in messages.iter().take(10) {
                    coalescer.info(message.as_str(), NotifyOptions::new());
                }
                clock.advance(Duration::from_secs(2));
                coalescer
            },
            |mut coalescer| black_box(coalescer.poll()),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, burst_benchmark);
criterion_main!(benches);
