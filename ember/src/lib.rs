// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! # Ember
//!
//! Lazily activated multicast subjects.
//!
//! ## Overview
//!
//! A [`RefCountSubject`] wraps any [`Multicast`] subject and tells a producer when
//! somebody is listening. The first subscriber fires [`ActivationHooks::on_active`];
//! when the last subscription is dropped, or the subject completes or errors,
//! [`ActivationHooks::on_inactive`] fires. The wrapper is otherwise transparent: values,
//! completion, errors and replay behaviour are those of the wrapped subject.
//!
//! Two subjects ship with Ember (re-exported from `ember-core`):
//!
//! - [`PublishSubject`]: values published while nobody listens are lost.
//! - [`BehaviorSubject`]: the latest value is replayed to each new subscriber.
//!
//! ## Quick Start
//!
//! ```
//! use ember::{BehaviorSubject, Multicast, RefCountSubject, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = RefCountSubject::with_callbacks(
//!     BehaviorSubject::new(),
//!     || Ok(()), // start the upstream here
//!     || Ok(()), // and stop it here
//! );
//!
//! subject.publish("Item 1").unwrap();
//! assert!(!subject.is_active());
//!
//! let mut observer = subject.subscribe();
//! assert!(subject.is_active());
//! assert_eq!(observer.next().await, Some(StreamItem::Value("Item 1")));
//!
//! drop(observer);
//! assert!(!subject.is_active());
//! # }
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): activation transitions are logged at `debug`, callback failures
//!   at `warn`. Without it, warnings go to stderr and transitions are not logged.

mod activation_state;
pub mod hooks;
mod logging;
pub mod ref_count_subject;

pub use ember_core::{
    BehaviorSubject, EmberError, Hook, IntoEmberError, Multicast, PublishSubject, Result,
    ResultExt, StreamItem, SubjectError, Subscription, Teardown,
};

pub use self::hooks::{ActivationHooks, CallbackHooks};
pub use self::ref_count_subject::RefCountSubject;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ActivationHooks, Multicast, RefCountSubject, StreamItem};
    pub use ember_core::{BehaviorSubject, PublishSubject};
}
