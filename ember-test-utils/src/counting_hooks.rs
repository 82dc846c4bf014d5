// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ember::{ActivationHooks, EmberError, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Error returned by [`CountingHooks`] when failure injection is switched on.
#[derive(Debug, thiserror::Error)]
#[error("injected {0} failure")]
pub struct HookFailure(pub &'static str);

/// Activation hooks that record how often each callback ran.
///
/// Also records whether `on_active` and `on_inactive` ever executed at the same time,
/// which makes it usable as a probe in concurrency tests.
#[derive(Debug, Default)]
pub struct CountingHooks {
    active: AtomicUsize,
    inactive: AtomicUsize,
    in_callback: AtomicBool,
    overlapped: AtomicBool,
    out_of_order: AtomicBool,
    fail_active: AtomicBool,
    fail_inactive: AtomicBool,
    panic_active: AtomicBool,
    panic_inactive: AtomicBool,
    dwell: Option<Duration>,
}

impl CountingHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks that sleep inside every callback, widening race windows.
    #[must_use]
    pub fn with_dwell(dwell: Duration) -> Self {
        Self {
            dwell: Some(dwell),
            ..Self::default()
        }
    }

    /// `(on_active, on_inactive)` invocation counts.
    pub fn counts(&self) -> (usize, usize) {
        (
            self.active.load(Ordering::SeqCst),
            self.inactive.load(Ordering::SeqCst),
        )
    }

    pub fn fail_active(&self, fail: bool) {
        self.fail_active.store(fail, Ordering::SeqCst);
    }

    pub fn fail_inactive(&self, fail: bool) {
        self.fail_inactive.store(fail, Ordering::SeqCst);
    }

    pub fn panic_active(&self, panic: bool) {
        self.panic_active.store(panic, Ordering::SeqCst);
    }

    pub fn panic_inactive(&self, panic: bool) {
        self.panic_inactive.store(panic, Ordering::SeqCst);
    }

    /// Returns `true` if two callbacks were ever observed running at once.
    pub fn overlapped(&self) -> bool {
        self.overlapped.load(Ordering::SeqCst)
    }

    /// Returns `true` if `on_active` ever ran twice without an `on_inactive` in between,
    /// or `on_inactive` ran without a preceding `on_active`.
    pub fn out_of_order(&self) -> bool {
        self.out_of_order.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        if self.in_callback.swap(true, Ordering::SeqCst) {
            self.overlapped.store(true, Ordering::SeqCst);
        }
        if let Some(dwell) = self.dwell {
            thread::sleep(dwell);
        }
    }

    fn leave(&self) {
        self.in_callback.store(false, Ordering::SeqCst);
    }
}

impl ActivationHooks for CountingHooks {
    fn on_active(&self) -> Result<()> {
        self.enter();
        let (active, inactive) = self.counts();
        if active != inactive {
            self.out_of_order.store(true, Ordering::SeqCst);
        }
        self.active.fetch_add(1, Ordering::SeqCst);
        self.leave();

        if self.panic_active.load(Ordering::SeqCst) {
            panic!("on_active panicked");
        }
        if self.fail_active.load(Ordering::SeqCst) {
            return Err(EmberError::user_error(HookFailure("on_active")));
        }
        Ok(())
    }

    fn on_inactive(&self) -> Result<()> {
        self.enter();
        let (active, inactive) = self.counts();
        if active != inactive + 1 {
            self.out_of_order.store(true, Ordering::SeqCst);
        }
        self.inactive.fetch_add(1, Ordering::SeqCst);
        self.leave();

        if self.panic_inactive.load(Ordering::SeqCst) {
            panic!("on_inactive panicked");
        }
        if self.fail_inactive.load(Ordering::SeqCst) {
            return Err(EmberError::user_error(HookFailure("on_inactive")));
        }
        Ok(())
    }
}
