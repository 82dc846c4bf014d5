// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Run-once finalizers attached to subscriptions.

use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

type TeardownFn = Box<dyn FnOnce() + Send + 'static>;

/// Code to run when a subscription finally tears down.
///
/// A teardown is handed to [`Multicast::subscribe_with_teardown`](crate::Multicast::subscribe_with_teardown)
/// and runs exactly once, on whichever comes first:
///
/// - the [`Subscription`](crate::Subscription) is dropped,
/// - the subject completes,
/// - the subject errors.
///
/// ```
/// use ember_core::{PublishSubject, Teardown};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let runs = Arc::new(AtomicUsize::new(0));
/// let counter = runs.clone();
///
/// let subject = PublishSubject::<i32>::new();
/// let subscription = subject.subscribe_with_teardown(Teardown::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// subject.complete();
/// drop(subscription);
/// assert_eq!(runs.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct Teardown(Option<TeardownFn>);

impl Teardown {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self(Some(Box::new(f)))
    }

    /// A teardown that does nothing.
    #[must_use]
    pub const fn noop() -> Self {
        Self(None)
    }

    /// Returns `true` if running this teardown has no effect.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.0.is_none()
    }

    /// Chains `next` to run after `self`.
    #[must_use]
    pub fn then(self, next: Teardown) -> Self {
        match (self.0, next.0) {
            (None, None) => Self::noop(),
            (Some(first), None) => Self(Some(first)),
            (None, Some(second)) => Self(Some(second)),
            (Some(first), Some(second)) => Self::new(move || {
                first();
                second();
            }),
        }
    }

    /// Consumes and runs the teardown.
    pub fn run(self) {
        if let Some(f) = self.0 {
            f();
        }
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Teardown")
            .field(&if self.is_noop() { "noop" } else { "pending" })
            .finish()
    }
}

// Shared between a subscription and the subject's registry; whichever side takes it first runs it.
#[derive(Clone)]
pub(crate) struct TeardownCell(Arc<Mutex<Option<Teardown>>>);

impl TeardownCell {
    pub(crate) fn new(teardown: Teardown) -> Self {
        Self(Arc::new(Mutex::new(Some(teardown))))
    }

    /// Runs the teardown unless another path already did. Never called with a subject lock held.
    pub(crate) fn run(&self) {
        let pending = self.0.lock().take();
        if let Some(teardown) = pending {
            teardown.run();
        }
    }

    pub(crate) fn is_spent(&self) -> bool {
        self.0.lock().is_none()
    }
}
