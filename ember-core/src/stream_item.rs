// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{EmberError, Result};

/// What a [`Subscription`](crate::Subscription) yields: a published value, or the error
/// the subject terminated with.
///
/// Completion is not an item; the subscription simply ends.
#[derive(Debug, Clone)]
pub enum StreamItem<T> {
    Value(T),
    Error(EmberError),
}

// Two errors never compare equal, so `assert_eq!` on items only ever passes for values.
impl<T: PartialEq> PartialEq for StreamItem<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(lhs), Self::Value(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl<T> StreamItem<T> {
    /// The published value, if this item carries one.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    /// The terminal error, if this item carries one.
    pub fn error(&self) -> Option<&EmberError> {
        match self {
            Self::Value(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    /// Lets a consumer stop at the terminal error with `?`.
    ///
    /// # Errors
    ///
    /// Returns the carried error for [`StreamItem::Error`].
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Error(err) => Err(err),
        }
    }
}
