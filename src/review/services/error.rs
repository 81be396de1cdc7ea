//! Service-level errors for review event handling.

use crate::review::{
    domain::{FileLocation, ManifestError, RepositoryName},
    ports::CodeHostError,
};
use std::fmt;
use thiserror::Error;

/// Errors raised while handling a review event.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// A host call failed.
    #[error(transparent)]
    Host(#[from] CodeHostError),

    /// A freeze manifest could not be fetched. Merging fails closed.
    #[error("failed to fetch freeze manifest {location}: {source}")]
    FreezeManifestFetch {
        /// Manifest location.
        location: FileLocation,
        /// Host failure.
        source: CodeHostError,
    },

    /// A freeze manifest could not be decoded. Merging fails closed.
    #[error("failed to decode freeze manifest {location}: {source}")]
    FreezeManifestDecode {
        /// Manifest location.
        location: FileLocation,
        /// Decode failure.
        source: ManifestError,
    },

    /// No configuration entry covers the repository.
    #[error("no review configuration for {0}")]
    MissingConfiguration(RepositoryName),
}

/// Result type for review service operations.
pub type ReviewResult<T> = Result<T, ReviewError>;

/// Failures collected from independent handlers of one event.
///
/// Handlers run in sequence; one failing does not stop the others.
#[derive(Debug, Default)]
pub struct HandlerErrors(Vec<ReviewError>);

impl HandlerErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Records the error from a handler outcome, if any.
    pub fn record(&mut self, outcome: ReviewResult<()>) {
        if let Err(err) = outcome {
            self.0.push(err);
        }
    }

    /// Returns the collected errors.
    #[must_use]
    pub fn errors(&self) -> &[ReviewError] {
        &self.0
    }

    /// Returns `Ok` when no handler failed.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ReviewError> for HandlerErrors {
    fn from(err: ReviewError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for HandlerErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{} review handler(s) failed: {}", self.0.len(), messages.join("; "))
    }
}

impl std::error::Error for HandlerErrors {}
