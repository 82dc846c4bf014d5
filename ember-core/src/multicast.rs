// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{EmberError, SubjectError, Subscription, Teardown};

/// A hot source that fans every published value out to its current subscribers.
///
/// Implementations differ in what a late subscriber sees ([`PublishSubject`](crate::PublishSubject)
/// vs [`BehaviorSubject`](crate::BehaviorSubject)); everything that wraps a subject should be
/// written against this trait so the flavour stays swappable.
///
/// Implementors must uphold:
///
/// - `observer_count` is exact: a dropped subscription is no longer counted when its
///   teardown runs.
/// - Teardowns are never run while the implementation holds its own lock.
/// - The teardown handed to `subscribe_with_teardown` never runs before that call
///   returns, even when the new subscription is already over.
/// - After `complete` or `error`, new subscriptions end immediately (after the recorded
///   error, if any) and are not counted.
pub trait Multicast: Clone + Send + Sync + 'static {
    /// The type of values delivered to subscribers.
    type Item: Clone + Send + Sync + 'static;

    /// Subscribes a new observer.
    fn subscribe(&self) -> Subscription<Self::Item> {
        self.subscribe_with_teardown(Teardown::noop())
    }

    /// Subscribes a new observer and attaches `teardown`, which runs once when the
    /// subscription is disposed or the subject completes or errors.
    fn subscribe_with_teardown(&self, teardown: Teardown) -> Subscription<Self::Item>;

    /// Delivers `value` to all current subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the subject has completed or errored.
    fn publish(&self, value: Self::Item) -> Result<(), SubjectError>;

    /// Completes the subject, ending every subscription. Idempotent.
    fn complete(&self);

    /// Delivers `err` to all current subscribers, records it for future ones and
    /// terminates the subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has already completed or errored.
    fn error(&self, err: EmberError) -> Result<(), SubjectError>;

    /// Number of subscriptions currently attached.
    fn observer_count(&self) -> usize;

    /// Returns `true` if at least one subscription is attached.
    fn has_observers(&self) -> bool {
        self.observer_count() > 0
    }

    /// Returns `true` if the subject terminated with an error.
    fn has_error(&self) -> bool {
        self.current_error().is_some()
    }

    /// The error the subject terminated with, if any.
    fn current_error(&self) -> Option<EmberError>;

    /// Returns `true` if the subject completed without error.
    fn has_completed(&self) -> bool;

    /// Returns `true` if the subject completed or errored.
    fn is_terminated(&self) -> bool {
        self.has_completed() || self.has_error()
    }
}
