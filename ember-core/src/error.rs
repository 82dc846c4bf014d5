// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for Ember
//!
//! [`EmberError`] is the error carried by [`StreamItem::Error`](crate::StreamItem::Error)
//! and accepted by [`Multicast::error`](crate::Multicast::error). Lifecycle failures of
//! the subjects themselves are reported separately as [`SubjectError`](crate::SubjectError).
//!
//! # Examples
//!
//! ```
//! use ember_core::{EmberError, Hook, Result};
//!
//! fn start_sensor() -> Result<()> {
//!     Err(EmberError::stream_error("sensor offline"))
//! }
//!
//! let err = EmberError::callback_error(Hook::Active, "sensor offline");
//! assert_eq!(err.to_string(), "on_active callback failed: sensor offline");
//! # assert!(start_sensor().is_err());
//! ```

use core::fmt;

/// Identifies one of the two activation callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Fired when the first observer subscribes.
    Active,
    /// Fired when the last observer detaches.
    Inactive,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "on_active"),
            Self::Inactive => write!(f, "on_inactive"),
        }
    }
}

/// Root error type for all Ember operations
#[derive(Debug, thiserror::Error)]
pub enum EmberError {
    /// Stream processing encountered an error
    ///
    /// General error for producer failures that don't fit the other variants.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An activation callback failed
    ///
    /// Emitted on the subject's error channel when `on_active` or `on_inactive`
    /// returns an error or panics.
    #[error("{hook} callback failed: {context}")]
    CallbackError {
        /// Which callback failed
        hook: Hook,
        /// The failure as reported by the callback
        context: String,
    },
}

impl EmberError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Create a callback failure for the given hook
    pub fn callback_error(hook: Hook, context: impl Into<String>) -> Self {
        Self::CallbackError {
            hook,
            context: context.into(),
        }
    }

    /// Returns the failed hook if this error came from an activation callback.
    #[must_use]
    pub const fn hook(&self) -> Option<Hook> {
        match self {
            Self::CallbackError { hook, .. } => Some(*hook),
            _ => None,
        }
    }
}

/// Specialized Result type for Ember operations
pub type Result<T> = std::result::Result<T, EmberError>;

/// Extension trait for converting errors into `EmberError`
///
/// Implemented for all `std::error::Error + Send + Sync + 'static` types, so activation
/// callbacks can turn their own failures into an `EmberError` with `into_ember()`.
pub trait IntoEmberError {
    /// Convert this error into an `EmberError` with additional context
    fn into_ember_error(self, context: &str) -> EmberError;

    /// Convert this error into an `EmberError` without additional context
    fn into_ember(self) -> EmberError
    where
        Self: Sized,
    {
        self.into_ember_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoEmberError for E {
    fn into_ember_error(self, context: &str) -> EmberError {
        if context.is_empty() {
            EmberError::user_error(self)
        } else {
            EmberError::stream_error(format!("{context}: {self}"))
        }
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(EmberError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(EmberError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<EmberError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap_user_error(context.into(), e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap_user_error(f(), e.into()))
    }
}

fn wrap_user_error(context: String, error: EmberError) -> EmberError {
    match error {
        EmberError::UserError(inner) => EmberError::StreamProcessingError {
            context: format!("{context}: {inner}"),
        },
        other => other,
    }
}

impl Clone for EmberError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // The boxed source can't be cloned, keep its message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
            Self::CallbackError { hook, context } => Self::CallbackError {
                hook: *hook,
                context: context.clone(),
            },
        }
    }
}
