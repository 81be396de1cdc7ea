//! Error types for review domain validation.

use thiserror::Error;

/// Errors returned while constructing review domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewDomainError {
    /// The repository coordinates are malformed.
    #[error("invalid repository '{0}', expected organization/repository")]
    InvalidRepository(String),

    /// The pull request number is zero.
    #[error("invalid pull request number {0}, expected a positive integer")]
    InvalidPullRequestNumber(u64),

    /// The bot configuration is unusable.
    #[error("invalid review configuration: {0}")]
    InvalidConfiguration(String),
}
