// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Latest-value replaying subject.
//!
//! A [`BehaviorSubject`] remembers the most recently published value and hands it to
//! every new subscriber before any live value. A value published while nobody is
//! listening is therefore not lost.
//!
//! ```
//! use ember_core::{BehaviorSubject, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = BehaviorSubject::new();
//! subject.publish("Item 1").unwrap();
//!
//! let mut late = subject.subscribe();
//! assert_eq!(late.next().await, Some(StreamItem::Value("Item 1")));
//! # }
//! ```

use crate::subject_state::{SharedState, SubjectState, Terminal};
use crate::{EmberError, Multicast, SubjectError, Subscription, Teardown};

/// A subject that replays its latest value to each new subscriber.
pub struct BehaviorSubject<T: Clone + Send + Sync + 'static> {
    state: SharedState<T>,
}

impl<T: Clone + Send + Sync + 'static> BehaviorSubject<T> {
    /// Creates an empty subject; subscribers get nothing replayed until the first publish.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SubjectState::shared(None),
        }
    }

    /// Creates a subject whose cache starts out holding `initial`.
    #[must_use]
    pub fn with_initial(initial: T) -> Self {
        Self {
            state: SubjectState::shared(Some(initial)),
        }
    }

    /// Subscribe to this subject. The cached value, if any, is delivered first.
    pub fn subscribe(&self) -> Subscription<T> {
        self.subscribe_with_teardown(Teardown::noop())
    }

    /// Subscribe with a teardown that runs once when the subscription goes away.
    pub fn subscribe_with_teardown(&self, teardown: Teardown) -> Subscription<T> {
        SubjectState::subscribe(&self.state, teardown, true)
    }

    /// Caches `value` and sends it to all current subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has completed or errored.
    pub fn publish(&self, value: T) -> Result<(), SubjectError> {
        SubjectState::publish(&self.state, value, true)
    }

    /// Completes the subject. Later subscribers end immediately without a replay.
    pub fn complete(&self) {
        let _ = SubjectState::terminate(&self.state, Terminal::Completed);
    }

    /// Sends an error to all subscribers and terminates the subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has already completed or errored.
    pub fn error(&self, err: EmberError) -> Result<(), SubjectError> {
        SubjectState::terminate(&self.state, Terminal::Errored(err))
    }

    /// The currently cached value.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.state.lock().latest()
    }

    /// Returns the number of currently attached subscribers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.state.lock().observer_count()
    }

    /// Returns `true` if at least one subscriber is attached.
    #[must_use]
    pub fn has_observers(&self) -> bool {
        self.observer_count() > 0
    }

    /// Returns `true` if the subject terminated with an error.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.state.lock().current_error().is_some()
    }

    /// The error the subject terminated with, if any.
    #[must_use]
    pub fn current_error(&self) -> Option<EmberError> {
        self.state.lock().current_error()
    }

    /// Returns `true` if the subject completed without error.
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.state.lock().has_completed()
    }

    /// Returns `true` if the subject completed or errored.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state.lock().is_terminated()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for BehaviorSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for BehaviorSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Multicast for BehaviorSubject<T> {
    type Item = T;

    fn subscribe_with_teardown(&self, teardown: Teardown) -> Subscription<T> {
        BehaviorSubject::subscribe_with_teardown(self, teardown)
    }

    fn publish(&self, value: T) -> Result<(), SubjectError> {
        BehaviorSubject::publish(self, value)
    }

    fn complete(&self) {
        BehaviorSubject::complete(self);
    }

    fn error(&self, err: EmberError) -> Result<(), SubjectError> {
        BehaviorSubject::error(self, err)
    }

    fn observer_count(&self) -> usize {
        BehaviorSubject::observer_count(self)
    }

    fn current_error(&self) -> Option<EmberError> {
        BehaviorSubject::current_error(self)
    }

    fn has_completed(&self) -> bool {
        BehaviorSubject::has_completed(self)
    }

    fn is_terminated(&self) -> bool {
        BehaviorSubject::is_terminated(self)
    }
}
