// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use ember::{BehaviorSubject, Multicast, PublishSubject, RefCountSubject};
use ember_test_utils::{expect_value, CountingHooks};
use futures::StreamExt;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 8;
const ROUNDS: usize = 200;

#[test]
fn concurrent_churn_keeps_callbacks_balanced() {
    let hooks = Arc::new(CountingHooks::new());
    let subject = RefCountSubject::new(PublishSubject::<u64>::new(), hooks.clone());
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                for _ in 0..ROUNDS {
                    let observer = subject.subscribe();
                    let _ = subject.publish(1);
                    drop(observer);
                }
            });
        }
    });

    let (active, inactive) = hooks.counts();
    assert!(active >= 1);
    assert_eq!(active, inactive);
    assert!(!subject.is_active());
    assert!(!hooks.overlapped());
    assert!(!hooks.out_of_order());
    assert_eq!(subject.observer_count(), 0);
}

#[test]
fn slow_callbacks_never_overlap() {
    let hooks = Arc::new(CountingHooks::with_dwell(Duration::from_millis(1)));
    let subject = RefCountSubject::new(BehaviorSubject::<u64>::new(), hooks.clone());
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                for _ in 0..20 {
                    drop(subject.subscribe());
                }
            });
        }
    });

    let (active, inactive) = hooks.counts();
    assert_eq!(active, inactive);
    assert!(!hooks.overlapped());
    assert!(!hooks.out_of_order());
}

#[test]
fn a_long_lived_observer_pins_activation() {
    let hooks = Arc::new(CountingHooks::new());
    let subject = RefCountSubject::new(PublishSubject::<u64>::new(), hooks.clone());
    let anchor = subject.subscribe();
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                for _ in 0..ROUNDS {
                    drop(subject.subscribe());
                }
            });
        }
    });

    assert_eq!(hooks.counts(), (1, 0));
    drop(anchor);
    assert_eq!(hooks.counts(), (1, 1));
}

#[test]
fn disposal_racing_completion_tears_down_once() {
    for _ in 0..50 {
        let hooks = Arc::new(CountingHooks::new());
        let subject = RefCountSubject::new(PublishSubject::<u64>::new(), hooks.clone());
        let observers: Vec<_> = (0..THREADS).map(|_| subject.subscribe()).collect();
        let barrier = Barrier::new(THREADS + 1);

        thread::scope(|scope| {
            for observer in observers {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    drop(observer);
                });
            }
            barrier.wait();
            subject.complete();
        });

        assert_eq!(hooks.counts(), (1, 1));
        assert!(!hooks.out_of_order());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn observers_on_worker_threads_receive_values() {
    let hooks = Arc::new(CountingHooks::new());
    let subject = RefCountSubject::new(BehaviorSubject::new(), hooks.clone());
    subject.publish(0u32).unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let subject = subject.clone();
        handles.push(tokio::spawn(async move {
            let mut observer = subject.subscribe();
            expect_value(&mut observer, 0).await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let (active, inactive) = hooks.counts();
    assert_eq!(active, inactive);
    assert!(!subject.is_active());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn completion_ends_observers_on_other_threads() {
    let hooks = Arc::new(CountingHooks::new());
    let subject = RefCountSubject::new(PublishSubject::<u32>::new(), hooks.clone());

    let observers: Vec<_> = (0..4).map(|_| subject.subscribe()).collect();
    let handles: Vec<_> = observers
        .into_iter()
        .map(|observer| tokio::spawn(async move { observer.collect::<Vec<_>>().await.len() }))
        .collect();

    subject.publish(1).unwrap();
    subject.publish(2).unwrap();
    subject.complete();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), 2);
    }
    assert_eq!(hooks.counts(), (1, 1));
}
