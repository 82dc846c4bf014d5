// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::subject_state::SubjectState;
use crate::teardown::TeardownCell;
use crate::StreamItem;
use futures::channel::mpsc::UnboundedReceiver;
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Weak;
use std::task::{Context, Poll};

struct Registration<T> {
    id: u64,
    state: Weak<Mutex<SubjectState<T>>>,
}

/// A live subscription to a subject.
///
/// Yields every [`StreamItem`] the subject delivers to this observer and ends when the
/// subject completes or errors. Dropping it disposes the subscription: it is removed from
/// the subject immediately, so [`Multicast::observer_count`](crate::Multicast::observer_count)
/// reflects the drop right away.
///
/// The teardown passed at subscribe time runs once, on the first of: drop, subject
/// completion, subject error, or reaching the end of the stream.
pub struct Subscription<T> {
    // Mutex makes the receiver Sync so subscriptions can be boxed as `Send + Sync` streams.
    receiver: Mutex<UnboundedReceiver<StreamItem<T>>>,
    registration: Option<Registration<T>>,
    teardown: TeardownCell,
}

impl<T> Subscription<T> {
    pub(crate) fn registered(
        receiver: UnboundedReceiver<StreamItem<T>>,
        teardown: TeardownCell,
        id: u64,
        state: Weak<Mutex<SubjectState<T>>>,
    ) -> Self {
        Self {
            receiver: Mutex::new(receiver),
            registration: Some(Registration { id, state }),
            teardown,
        }
    }

    /// A subscription to an already terminated subject; it only drains what was queued.
    pub(crate) fn detached(
        receiver: UnboundedReceiver<StreamItem<T>>,
        teardown: TeardownCell,
    ) -> Self {
        Self {
            receiver: Mutex::new(receiver),
            registration: None,
            teardown,
        }
    }

    /// Returns `true` once this subscription's teardown has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.teardown.is_spent()
    }

    /// Disposes the subscription. Equivalent to dropping it.
    pub fn dispose(self) {
        drop(self);
    }

    fn deregister(&mut self) {
        if let Some(registration) = self.registration.take() {
            if let Some(state) = registration.state.upgrade() {
                state.lock().deregister(registration.id);
            }
        }
    }
}

impl<T> Stream for Subscription<T> {
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let polled = Pin::new(this.receiver.get_mut()).poll_next(cx);
        if let Poll::Ready(None) = polled {
            this.deregister();
            this.teardown.run();
        }
        polled
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        // Deregister first so the teardown observes the reduced observer count.
        self.deregister();
        self.teardown.run();
    }
}
