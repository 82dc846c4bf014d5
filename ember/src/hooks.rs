// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ember_core::Result;
use std::sync::Arc;

/// Lifecycle callbacks fired by a [`RefCountSubject`](crate::RefCountSubject).
///
/// `on_active` runs when the first observer subscribes, `on_inactive` when the last
/// one detaches. For a given subject the two never run concurrently, but they may run
/// on different threads: whichever thread subscribed or tore down the subscription.
///
/// An `Err` (or a panic) from either callback is delivered to observers as the subject's
/// error, exactly as if the producer itself had failed.
///
/// Callbacks run while the subject's activation lock is held. They may publish to the
/// subject, but must not subscribe to it or drop one of its subscriptions.
///
/// ```
/// use ember::{ActivationHooks, Result};
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// struct Sensor {
///     powered: AtomicBool,
/// }
///
/// impl ActivationHooks for Sensor {
///     fn on_active(&self) -> Result<()> {
///         self.powered.store(true, Ordering::SeqCst);
///         Ok(())
///     }
///
///     fn on_inactive(&self) -> Result<()> {
///         self.powered.store(false, Ordering::SeqCst);
///         Ok(())
///     }
/// }
/// ```
pub trait ActivationHooks: Send + Sync + 'static {
    /// Called on the 0→1 observer transition.
    ///
    /// # Errors
    ///
    /// An error is redirected to the subject's error channel.
    fn on_active(&self) -> Result<()>;

    /// Called on the 1→0 observer transition.
    ///
    /// # Errors
    ///
    /// An error is redirected to the subject's error channel.
    fn on_inactive(&self) -> Result<()>;
}

impl<H: ActivationHooks> ActivationHooks for Arc<H> {
    fn on_active(&self) -> Result<()> {
        (**self).on_active()
    }

    fn on_inactive(&self) -> Result<()> {
        (**self).on_inactive()
    }
}

/// [`ActivationHooks`] built from two closures.
///
/// Usually created through [`RefCountSubject::with_callbacks`](crate::RefCountSubject::with_callbacks).
pub struct CallbackHooks<A, I> {
    on_active: A,
    on_inactive: I,
}

impl<A, I> CallbackHooks<A, I>
where
    A: Fn() -> Result<()> + Send + Sync + 'static,
    I: Fn() -> Result<()> + Send + Sync + 'static,
{
    pub fn new(on_active: A, on_inactive: I) -> Self {
        Self {
            on_active,
            on_inactive,
        }
    }
}

impl<A, I> ActivationHooks for CallbackHooks<A, I>
where
    A: Fn() -> Result<()> + Send + Sync + 'static,
    I: Fn() -> Result<()> + Send + Sync + 'static,
{
    fn on_active(&self) -> Result<()> {
        (self.on_active)()
    }

    fn on_inactive(&self) -> Result<()> {
        (self.on_inactive)()
    }
}
