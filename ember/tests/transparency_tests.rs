// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use ember::{BehaviorSubject, EmberError, Multicast, PublishSubject, RefCountSubject, SubjectError};
use ember_test_utils::{
    assert_no_element_emitted, expect_end, expect_error, expect_value, CountingHooks,
};
use std::sync::Arc;

#[tokio::test]
async fn publish_subject_drops_values_sent_before_any_observer() {
    let hooks = Arc::new(CountingHooks::new());
    let subject = RefCountSubject::new(PublishSubject::new(), hooks.clone());

    subject.publish("Item 1".to_string()).unwrap();

    let mut observers: Vec<_> = (0..10).map(|_| subject.subscribe()).collect();
    for observer in &mut observers {
        assert_no_element_emitted(observer, 10).await;
    }

    subject.complete();
    for observer in &mut observers {
        expect_end(observer).await;
    }
    assert_eq!(hooks.counts(), (1, 1));
}

#[tokio::test]
async fn behavior_subject_replays_values_sent_before_any_observer() {
    let hooks = Arc::new(CountingHooks::new());
    let subject = RefCountSubject::new(BehaviorSubject::new(), hooks.clone());

    subject.publish("Item 1".to_string()).unwrap();
    assert_eq!(hooks.counts(), (0, 0));

    let mut observers: Vec<_> = (0..10).map(|_| subject.subscribe()).collect();
    for observer in &mut observers {
        expect_value(observer, "Item 1".to_string()).await;
    }
    assert_eq!(hooks.counts(), (1, 0));
}

#[tokio::test]
async fn replay_continues_until_a_newer_value() {
    let subject = RefCountSubject::with_callbacks(BehaviorSubject::new(), || Ok(()), || Ok(()));

    subject.publish(1).unwrap();
    let mut first = subject.subscribe();
    expect_value(&mut first, 1).await;
    drop(first);

    // Inactive again, yet the cache survives for the next observer.
    let mut second = subject.subscribe();
    expect_value(&mut second, 1).await;

    subject.publish(2).unwrap();
    expect_value(&mut second, 2).await;

    let mut third = subject.subscribe();
    expect_value(&mut third, 2).await;
}

#[tokio::test]
async fn values_reach_every_attached_observer() {
    let subject =
        RefCountSubject::with_callbacks(PublishSubject::<u32>::new(), || Ok(()), || Ok(()));
    let mut a = subject.subscribe();
    subject.publish(1).unwrap();

    let mut b = subject.subscribe();
    subject.publish(2).unwrap();

    expect_value(&mut a, 1).await;
    expect_value(&mut a, 2).await;
    expect_value(&mut b, 2).await;
    assert_no_element_emitted(&mut b, 10).await;
}

#[tokio::test]
async fn upstream_error_reaches_observers_unchanged() {
    let subject =
        RefCountSubject::with_callbacks(PublishSubject::<u32>::new(), || Ok(()), || Ok(()));
    let mut observer = subject.subscribe();

    subject.publish(7).unwrap();
    subject.error(EmberError::stream_error("sensor unplugged")).unwrap();

    expect_value(&mut observer, 7).await;
    let err = expect_error(&mut observer).await;
    assert!(matches!(err, EmberError::StreamProcessingError { .. }));
    expect_end(&mut observer).await;

    assert!(subject.has_error());
    assert!(subject.current_error().is_some());
    assert!(!subject.has_completed());
}

#[tokio::test]
async fn pass_through_queries_follow_the_inner_subject() {
    let subject =
        RefCountSubject::with_callbacks(PublishSubject::<u32>::new(), || Ok(()), || Ok(()));
    assert!(!subject.has_observers());
    assert!(!subject.has_completed());
    assert!(!subject.has_error());

    let observer = subject.subscribe();
    assert!(subject.has_observers());
    assert_eq!(subject.observer_count(), subject.inner().observer_count());

    subject.complete();
    assert!(subject.has_completed());
    assert!(subject.is_terminated());
    assert_eq!(subject.publish(1), Err(SubjectError::Closed));
    assert!(observer.is_torn_down());
    assert!(!subject.is_active());
}
