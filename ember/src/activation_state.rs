// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Zero/one observer tracking for a [`RefCountSubject`](crate::RefCountSubject).
///
/// Lives behind the wrapper's lock; both transitions are decided while that lock is held
/// and the matching callback runs before it is released.
#[derive(Debug, Default)]
pub(crate) struct ActivationState {
    active: bool,
}

impl ActivationState {
    pub(crate) const fn new() -> Self {
        Self { active: false }
    }

    pub(crate) const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` if this subscription is the 0→1 transition and `on_active` must run.
    ///
    /// `torn_down` is set when the subscription cannot be installed because the subject
    /// already terminated; such a subscription never activates.
    ///
    /// The flag is sampled before installation. If the subject terminates on another
    /// thread in between, the subscription activates yet installs detached, and the state
    /// stays active until that subscription is dropped or polled to its end. Its finalizer
    /// still runs the matching 1→0 transition.
    pub(crate) fn note_subscribe(&mut self, torn_down: bool) -> bool {
        if self.active || torn_down {
            return false;
        }
        self.active = true;
        true
    }

    /// Undoes the 0→1 transition of a subscription whose `on_active` failed and which is
    /// therefore never installed as an attached observer.
    pub(crate) fn note_failed_activation(&mut self) {
        self.active = false;
    }

    /// Returns `true` if this teardown is the 1→0 transition and `on_inactive` must run.
    ///
    /// `live_observers` is the subject's count after the departing subscription was removed.
    pub(crate) fn note_unsubscribe(&mut self, live_observers: usize) -> bool {
        if !self.active || live_observers > 0 {
            return false;
        }
        self.active = false;
        true
    }
}
