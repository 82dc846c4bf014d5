// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the Ember workspace.
//!
//! Designed for development and testing only, not for production code.
//!
//! # Key Types
//!
//! - [`CountingHooks`]: activation hooks that count their invocations, can be told to
//!   fail, and assert that the two callbacks never overlap.
//! - [`helpers`]: async assertions over subscriptions.
//!
//! ```rust
//! use ember::{Multicast, PublishSubject, RefCountSubject};
//! use ember_test_utils::CountingHooks;
//! use std::sync::Arc;
//!
//! let hooks = Arc::new(CountingHooks::new());
//! let subject = RefCountSubject::new(PublishSubject::<i32>::new(), hooks.clone());
//!
//! let observer = subject.subscribe();
//! assert_eq!(hooks.counts(), (1, 0));
//! drop(observer);
//! assert_eq!(hooks.counts(), (1, 1));
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod counting_hooks;
pub mod helpers;

pub use counting_hooks::{CountingHooks, HookFailure};
pub use helpers::{assert_no_element_emitted, expect_end, expect_error, expect_value};
