// SPDX-License-Identifier: MPL-2.0
//! Driver tests on a paused tokio clock.

use scholar_toast::diagnostics::{BufferCapacity, DiagnosticsCollector};
use scholar_toast::notifications::{
    spawn, Coalescer, CoalescerSettings, Level, NotifyOptions, Outcome, RecordingSink,
    SuppressReason, TokioClock,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

fn coalescer(sink: &Arc<Mutex<RecordingSink>>) -> Coalescer {
    Coalescer::with_clock(CoalescerSettings::default(), Arc::clone(sink), TokioClock)
}

fn messages(sink: &Arc<Mutex<RecordingSink>>) -> Vec<String> {
    sink.lock()
        .unwrap()
        .messages()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn burst_from_many_tasks_becomes_one_toast() {
    let sink = RecordingSink::shared();
    let (notifier, task) = spawn(coalescer(&sink));

    let mut workers = Vec::new();
    for _ in 0..4 {
        let notifier = notifier.clone();
        workers.push(tokio::spawn(async move {
            for _ in 0..5 {
                notifier
                    .success("Attendance recorded", NotifyOptions::new())
                    .await
                    .unwrap();
                sleep(Duration::from_millis(10)).await;
            }
        }));
    }
    for worker in workers {
        worker.await.unwrap();
    }

    sleep(Duration::from_millis(2_100)).await;
    assert_eq!(messages(&sink), vec!["Attendance recorded (20)"]);

    notifier.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn repeat_inside_retention_is_suppressed() {
    let sink = RecordingSink::shared();
    let (notifier, _task) = spawn(coalescer(&sink));

    notifier.info("Timetable published", NotifyOptions::new()).await.unwrap();
    sleep(Duration::from_millis(2_500)).await;

    let outcome = notifier
        .info("Timetable published", NotifyOptions::new())
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Suppressed(SuppressReason::RecentDuplicate));

    sleep(Duration::from_millis(5_000)).await;
    let outcome = notifier
        .info("Timetable published", NotifyOptions::new())
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Queued);
}

#[tokio::test(start_paused = true)]
async fn force_show_is_immediate() {
    let sink = RecordingSink::shared();
    let (notifier, _task) = spawn(coalescer(&sink));
    notifier.set_enabled(false).await.unwrap();

    let outcome = notifier
        .force_show(Level::Warning, "Fire drill at 11:00", NotifyOptions::new())
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Shown);
    assert_eq!(messages(&sink), vec!["Fire drill at 11:00"]);
}

#[tokio::test(start_paused = true)]
async fn group_and_clear_all() {
    let sink = RecordingSink::shared();
    let (notifier, _task) = spawn(coalescer(&sink));

    let outcome = notifier
        .group(
            vec!["Room 4".into(), "Room 7".into(), "Lab 2".into()],
            Level::Info,
            NotifyOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(outcome, Some(Outcome::Queued));
    assert_eq!(
        notifier.group(Vec::new(), Level::Info, NotifyOptions::new()).await.unwrap(),
        None
    );

    notifier.info("Will be cleared", NotifyOptions::new()).await.unwrap();
    sleep(Duration::from_millis(500)).await;
    notifier.clear_all().await.unwrap();

    sleep(Duration::from_millis(5_000)).await;
    assert!(messages(&sink).is_empty());
}

#[tokio::test(start_paused = true)]
async fn diagnostics_flow_through_the_driver() {
    let sink = RecordingSink::shared();
    let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
    let mut c = coalescer(&sink);
    c.set_diagnostics(collector.handle());
    let (notifier, task) = spawn(c);

    notifier.error("Payment failed", NotifyOptions::new()).await.unwrap();
    notifier.error("Payment failed", NotifyOptions::new()).await.unwrap();
    sleep(Duration::from_millis(2_100)).await;
    notifier.shutdown().await.unwrap();
    task.await.unwrap();

    collector.process_pending();
    let counts = collector.counts();
    assert_eq!(counts.get("queued"), Some(&1));
    assert_eq!(counts.get("merged"), Some(&1));
    assert_eq!(counts.get("dispatched"), Some(&1));
}
