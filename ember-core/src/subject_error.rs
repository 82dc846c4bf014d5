// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::EmberError;
use core::fmt;

/// Errors specific to subject operations (lifecycle and broadcasting).
///
/// Distinct from [`EmberError`], which travels through subscriptions. Convert with
/// `EmberError::from` when a subject failure has to be propagated as a stream error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectError {
    /// The subject has completed or errored and cannot accept new items.
    Closed,
}

impl fmt::Display for SubjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Subject is closed"),
        }
    }
}

impl std::error::Error for SubjectError {}

impl From<SubjectError> for EmberError {
    fn from(err: SubjectError) -> Self {
        Self::stream_error(err.to_string())
    }
}
