// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reference-counted activation around any [`Multicast`] subject.
//!
//! A [`RefCountSubject`] behaves exactly like the subject it wraps (same values, same
//! completion and errors, same replay behaviour) and additionally calls
//! [`ActivationHooks::on_active`] when its observer count goes from zero to one and
//! [`ActivationHooks::on_inactive`] when it drops back to zero. A producer can use this
//! to run an expensive upstream (sensor, socket, polling timer) only while somebody
//! listens.
//!
//! ## Example
//!
//! ```
//! use ember::{Multicast, PublishSubject, RefCountSubject};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let starts = Arc::new(AtomicUsize::new(0));
//! let stops = Arc::new(AtomicUsize::new(0));
//! let (s, t) = (starts.clone(), stops.clone());
//!
//! let subject = RefCountSubject::with_callbacks(
//!     PublishSubject::<u32>::new(),
//!     move || {
//!         s.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     },
//!     move || {
//!         t.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     },
//! );
//!
//! let first = subject.subscribe();
//! let second = subject.subscribe();
//! assert_eq!(starts.load(Ordering::SeqCst), 1);
//!
//! drop(first);
//! assert_eq!(stops.load(Ordering::SeqCst), 0);
//!
//! drop(second);
//! assert_eq!(stops.load(Ordering::SeqCst), 1);
//! ```
//!
//! ## Concurrency
//!
//! All activation decisions for one subject are serialized by a single lock, so the two
//! callbacks never overlap and every 0→1 transition is matched by exactly one 1→0
//! transition before the next 0→1. The lock is held while a callback runs; a slow
//! callback delays concurrent subscribers and disposals of the same subject.
//!
//! ## Callback failures
//!
//! An `Err` or a panic from either callback becomes [`EmberError::CallbackError`] and is
//! sent through the wrapped subject's error channel once the lock is released. When
//! `on_active` fails, `on_inactive` runs right away and the subject is errored before the
//! new subscription is installed, so that subscription yields the failure and ends.
//! `subscribe` never runs the teardown it was given.

use crate::activation_state::ActivationState;
use crate::hooks::{ActivationHooks, CallbackHooks};
use crate::logging::{debug, warn};
use ember_core::{EmberError, Hook, Multicast, Result, SubjectError, Subscription, Teardown};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

struct Shared<S, H> {
    subject: S,
    hooks: H,
    state: Mutex<ActivationState>,
}

/// A [`Multicast`] subject that tracks its observers and fires activation callbacks.
///
/// Cheap to clone; clones share the wrapped subject, the hooks and the activation state.
/// See the [module documentation](self) for details.
pub struct RefCountSubject<S: Multicast, H: ActivationHooks> {
    shared: Arc<Shared<S, H>>,
}

impl<S: Multicast, H: ActivationHooks> RefCountSubject<S, H> {
    /// Wraps `subject`, starting inactive.
    ///
    /// Only subscriptions made through the wrapper fire callbacks. Observers attached to
    /// `subject` directly still count toward its observer count, so they keep an active
    /// wrapper active.
    pub fn new(subject: S, hooks: H) -> Self {
        Self {
            shared: Arc::new(Shared {
                subject,
                hooks,
                state: Mutex::new(ActivationState::new()),
            }),
        }
    }

    /// Returns `true` while at least one observer is attached through this wrapper.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.state.lock().is_active()
    }

    /// The wrapped subject.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.shared.subject
    }

    /// The activation hooks.
    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.shared.hooks
    }
}

impl<S, A, I> RefCountSubject<S, CallbackHooks<A, I>>
where
    S: Multicast,
    A: Fn() -> Result<()> + Send + Sync + 'static,
    I: Fn() -> Result<()> + Send + Sync + 'static,
{
    /// Wraps `subject` with closure callbacks.
    pub fn with_callbacks(subject: S, on_active: A, on_inactive: I) -> Self {
        Self::new(subject, CallbackHooks::new(on_active, on_inactive))
    }
}

impl<S: Multicast, H: ActivationHooks> Shared<S, H> {
    fn subscribe(self: &Arc<Self>, teardown: Teardown) -> Subscription<S::Item> {
        let mut state = self.state.lock();

        if state.note_subscribe(self.subject.is_terminated()) {
            debug!("first observer attached, activating");
            if let Err(err) = invoke(Hook::Active, || self.hooks.on_active()) {
                // This subscription never counts as attached, so the cycle is closed here
                // instead of by its finalizer.
                state.note_failed_activation();
                if let Err(inactive) = invoke(Hook::Inactive, || self.hooks.on_inactive()) {
                    warn!("on_inactive failed after a failed activation: {}", inactive);
                }
                drop(state);

                // Errored before installing: the subscription is attached to a terminated
                // subject and only replays the failure, so no teardown runs in here.
                self.redirect(err);
                return self.subject.subscribe_with_teardown(teardown);
            }
        }

        // Installed under the lock so a racing teardown can't see a zero count
        // for a subscription that has already been counted as active.
        let finalizer = {
            let shared = Arc::clone(self);
            Teardown::new(move || shared.finalize())
        };
        self.subject.subscribe_with_teardown(finalizer.then(teardown))
    }

    fn finalize(&self) {
        let failure = {
            let mut state = self.state.lock();
            if state.note_unsubscribe(self.subject.observer_count()) {
                debug!("last observer detached, deactivating");
                invoke(Hook::Inactive, || self.hooks.on_inactive()).err()
            } else {
                None
            }
        };

        if let Some(err) = failure {
            self.redirect(err);
        }
    }

    // Must be called without the activation lock: erroring the subject runs the
    // teardowns of every subscription still attached to it.
    fn redirect(&self, err: EmberError) {
        warn!("activation callback failed, erroring subject: {}", err);
        if self.subject.error(err).is_err() {
            warn!("subject already terminated, callback failure dropped");
        }
    }
}

fn invoke<F>(hook: Hook, callback: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(EmberError::callback_error(hook, err.to_string())),
        Err(payload) => Err(EmberError::callback_error(hook, panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "callback panicked".to_string()
    }
}

impl<S: Multicast, H: ActivationHooks> Clone for RefCountSubject<S, H> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: Multicast, H: ActivationHooks> Multicast for RefCountSubject<S, H> {
    type Item = S::Item;

    fn subscribe_with_teardown(&self, teardown: Teardown) -> Subscription<S::Item> {
        self.shared.subscribe(teardown)
    }

    fn publish(&self, value: S::Item) -> std::result::Result<(), SubjectError> {
        self.shared.subject.publish(value)
    }

    fn complete(&self) {
        self.shared.subject.complete();
    }

    fn error(&self, err: EmberError) -> std::result::Result<(), SubjectError> {
        self.shared.subject.error(err)
    }

    fn observer_count(&self) -> usize {
        self.shared.subject.observer_count()
    }

    fn has_observers(&self) -> bool {
        self.shared.subject.has_observers()
    }

    fn has_error(&self) -> bool {
        self.shared.subject.has_error()
    }

    fn current_error(&self) -> Option<EmberError> {
        self.shared.subject.current_error()
    }

    fn has_completed(&self) -> bool {
        self.shared.subject.has_completed()
    }

    fn is_terminated(&self) -> bool {
        self.shared.subject.is_terminated()
    }
}
