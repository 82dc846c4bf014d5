// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core building blocks for Ember.
//!
//! This crate provides the multicast capability that the activation wrapper in
//! the `ember` crate is written against, plus two concrete subjects:
//!
//! - [`PublishSubject`]: hot, late subscribers only see items published after subscribing.
//! - [`BehaviorSubject`]: caches the latest value and replays it to every new subscriber.
//!
//! Every subscription is a [`Subscription`], a `Stream` of [`StreamItem<T>`] that ends
//! when the subject completes or errors. A [`Teardown`] attached at subscribe time runs
//! exactly once when the subscription finally goes away, whichever way that happens.

pub mod behavior_subject;
pub mod error;
pub mod multicast;
pub mod publish_subject;
pub mod stream_item;
pub mod subject_error;
pub mod subscription;
pub mod teardown;

mod subject_state;

pub use self::behavior_subject::BehaviorSubject;
pub use self::error::{EmberError, Hook, IntoEmberError, Result, ResultExt};
pub use self::multicast::Multicast;
pub use self::publish_subject::PublishSubject;
pub use self::stream_item::StreamItem;
pub use self::subject_error::SubjectError;
pub use self::subscription::Subscription;
pub use self::teardown::Teardown;
