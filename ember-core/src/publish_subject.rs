// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subject.
//!
//! A [`PublishSubject`] broadcasts each value to all subscribers attached at the time
//! of publishing.
//!
//! ## Characteristics
//!
//! - **Hot**: Late subscribers do not receive past items, only items published after subscribing.
//! - **Unbounded**: Uses unbounded mpsc channels internally (no backpressure).
//! - **Thread-safe**: Cheap to clone; all clones share the same internal state.
//! - **Error/complete**: Both terminate the subject; an error is also delivered to later subscribers.
//!
//! ## Example
//!
//! ```
//! use ember_core::{PublishSubject, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = PublishSubject::<i32>::new();
//!
//! // Nobody is listening yet, so this value is lost
//! subject.publish(0).unwrap();
//!
//! let mut stream = subject.subscribe();
//! subject.publish(1).unwrap();
//! subject.publish(2).unwrap();
//! subject.complete();
//!
//! assert_eq!(stream.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(stream.next().await, Some(StreamItem::Value(2)));
//! assert_eq!(stream.next().await, None); // Subject completed
//! # }
//! ```

use crate::subject_state::{SharedState, SubjectState, Terminal};
use crate::{EmberError, Multicast, SubjectError, Subscription, Teardown};

/// A hot, unbounded subject that broadcasts values to all current subscribers.
///
/// See the [module documentation](self) for examples and more details.
pub struct PublishSubject<T: Clone + Send + Sync + 'static> {
    state: SharedState<T>,
}

impl<T: Clone + Send + Sync + 'static> PublishSubject<T> {
    /// Creates a new subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SubjectState::shared(None),
        }
    }

    /// Subscribe to this subject. Late subscribers do not receive previously published values.
    pub fn subscribe(&self) -> Subscription<T> {
        self.subscribe_with_teardown(Teardown::noop())
    }

    /// Subscribe with a teardown that runs once when the subscription goes away.
    pub fn subscribe_with_teardown(&self, teardown: Teardown) -> Subscription<T> {
        SubjectState::subscribe(&self.state, teardown, false)
    }

    /// Send a value to all current subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has completed or errored.
    pub fn publish(&self, value: T) -> Result<(), SubjectError> {
        SubjectState::publish(&self.state, value, false)
    }

    /// Completes the subject, ending all subscriber streams.
    ///
    /// Completing is idempotent; calling it on a terminated subject has no effect.
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

impl<T: Clone + Send + Sync + 'static> Default for PublishSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for PublishSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Multicast for PublishSubject<T> {
    type Item = T;

    fn subscribe_with_teardown(&self, teardown: Teardown) -> Subscription<T> {
        PublishSubject::subscribe_with_teardown(self, teardown)
    }

    fn publish(&self, value: T) -> Result<(), SubjectError> {
        PublishSubject::publish(self, value)
    }

    fn complete(&self) {
        PublishSubject::complete(self);
    }

    fn error(&self, err: EmberError) -> Result<(), SubjectError> {
        PublishSubject::error(self, err)
    }

    fn observer_count(&self) -> usize {
        PublishSubject::observer_count(self)
    }

    fn current_error(&self) -> Option<EmberError> {
        PublishSubject::current_error(self)
    }

    fn has_completed(&self) -> bool {
        PublishSubject::has_completed(self)
    }

    fn is_terminated(&self) -> bool {
        PublishSubject::is_terminated(self)
    }
}
