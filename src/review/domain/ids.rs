//! Identifier types for repositories and pull requests on the code host.

use super::ReviewDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository coordinates in `organization/repository` form.
///
/// # Examples
///
///     use reviewbot::review::domain::RepositoryName;
///
///     let repo = RepositoryName::parse("openeuler/kernel").expect("valid");
///     assert_eq!(repo.organization(), "openeuler");
///     assert_eq!(repo.to_string(), "openeuler/kernel");
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepositoryName {
    organization: String,
    repository: String,
}

impl RepositoryName {
    /// Creates repository coordinates from trimmed, non-empty parts.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InvalidRepository`] when either part is
    /// empty, contains whitespace, or contains a slash.
    pub fn new(
        organization: impl Into<String>,
        repository: impl Into<String>,
    ) -> Result<Self, ReviewDomainError> {
        let org = organization.into();
        let repo = repository.into();
        if !is_valid_segment(&org) || !is_valid_segment(&repo) {
            return Err(ReviewDomainError::InvalidRepository(format!("{org}/{repo}")));
        }
        Ok(Self {
            organization: org,
            repository: repo,
        })
    }

    /// Parses `organization/repository`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InvalidRepository`] when the value does
    /// not contain exactly one slash-delimited pair of valid segments.
    pub fn parse(value: &str) -> Result<Self, ReviewDomainError> {
        let (org, repo) = value
            .trim()
            .split_once('/')
            .ok_or_else(|| ReviewDomainError::InvalidRepository(value.to_owned()))?;
        Self::new(org, repo).map_err(|_| ReviewDomainError::InvalidRepository(value.to_owned()))
    }

    /// Returns the owning organization.
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Returns the repository name within the organization.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains('/') && !segment.chars().any(char::is_whitespace)
}

/// Positive pull request number within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Creates a validated pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InvalidPullRequestNumber`] when the value
    /// is zero.
    pub const fn new(value: u64) -> Result<Self, ReviewDomainError> {
        if value == 0 {
            return Err(ReviewDomainError::InvalidPullRequestNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully qualified pull request reference, rendered as `org/repo#42`.
///
/// # Examples
///
///     use reviewbot::review::domain::PullRequestRef;
///
///     let pr = PullRequestRef::from_parts("openeuler", "community", 42)
///         .expect("valid PR ref");
///     assert_eq!(pr.to_string(), "openeuler/community#42");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestRef {
    repository: RepositoryName,
    number: PullRequestNumber,
}

impl PullRequestRef {
    /// Creates a reference from validated components.
    #[must_use]
    pub const fn new(repository: RepositoryName, number: PullRequestNumber) -> Self {
        Self { repository, number }
    }

    /// Creates a reference from raw host values.
    ///
    /// # Errors
    ///
    /// Returns a [`ReviewDomainError`] when any component is invalid.
    pub fn from_parts(
        organization: &str,
        repository: &str,
        number: u64,
    ) -> Result<Self, ReviewDomainError> {
        Ok(Self::new(
            RepositoryName::new(organization, repository)?,
            PullRequestNumber::new(number)?,
        ))
    }

    /// Returns the repository coordinates.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the owning organization.
    #[must_use]
    pub fn organization(&self) -> &str {
        self.repository.organization()
    }

    /// Returns the pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repository, self.number)
    }
}
