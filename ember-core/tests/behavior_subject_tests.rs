// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use ember_core::{BehaviorSubject, EmberError, StreamItem};
use futures::StreamExt;

#[tokio::test]
async fn replays_value_published_before_subscribing() {
    let subject = BehaviorSubject::new();
    subject.publish("Item 1".to_string()).unwrap();

    let mut a = subject.subscribe();
    let mut b = subject.subscribe();

    assert_eq!(a.next().await, Some(StreamItem::Value("Item 1".to_string())));
    assert_eq!(b.next().await, Some(StreamItem::Value("Item 1".to_string())));
}

#[tokio::test]
async fn replays_only_the_latest_value() {
    let subject = BehaviorSubject::new();
    subject.publish(1).unwrap();
    subject.publish(2).unwrap();

    let mut stream = subject.subscribe();
    subject.publish(3).unwrap();
    subject.complete();

    let items: Vec<_> = stream.by_ref().collect().await;
    assert_eq!(items, vec![StreamItem::Value(2), StreamItem::Value(3)]);
}

#[tokio::test]
async fn initial_value_is_replayed() {
    let subject = BehaviorSubject::with_initial(42);
    assert_eq!(subject.latest(), Some(42));

    let mut stream = subject.subscribe();
    assert_eq!(stream.next().await, Some(StreamItem::Value(42)));
}

#[tokio::test]
async fn empty_subject_replays_nothing() {
    let subject = BehaviorSubject::<i32>::new();
    let mut stream = subject.subscribe();

    subject.complete();

    assert_eq!(stream.next().await, None);
    assert_eq!(subject.latest(), None);
}

#[tokio::test]
async fn completed_subject_does_not_replay() {
    let subject = BehaviorSubject::with_initial(1);
    subject.complete();

    let mut late = subject.subscribe();
    assert_eq!(late.next().await, None);
}

#[tokio::test]
async fn errored_subject_delivers_error_instead_of_replay() {
    let subject = BehaviorSubject::with_initial(1);
    subject.error(EmberError::stream_error("sensor lost")).unwrap();

    let mut late = subject.subscribe();
    assert!(matches!(late.next().await, Some(StreamItem::Error(_))));
    assert_eq!(late.next().await, None);
    assert!(subject.has_error());
}

#[test]
fn observer_count_tracks_drops() {
    let subject = BehaviorSubject::with_initial(0);
    let a = subject.subscribe();
    let _b = subject.subscribe();
    assert_eq!(subject.observer_count(), 2);

    drop(a);
    assert_eq!(subject.observer_count(), 1);
}
