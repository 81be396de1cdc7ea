//! Code host port: every remote operation the review core consumes.

use crate::review::domain::{
    FileLocation, LabelSet, MergeMethod, OperationLogEntry, PullRequestComment, PullRequestRef,
    RepositoryName,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for code host operations.
pub type CodeHostResult<T> = Result<T, CodeHostError>;

/// Access level a login holds on a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryPermission {
    /// Full administrative access.
    Admin,
    /// Push access.
    Write,
    /// Read-only access.
    Read,
    /// No access.
    None,
}

impl RepositoryPermission {
    /// Parses the host's permission name. Unknown names map to `None`.
    #[must_use]
    pub fn from_host(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            "write" | "push" => Self::Write,
            "read" | "pull" => Self::Read,
            _ => Self::None,
        }
    }

    /// Returns `true` for admin or write access.
    #[must_use]
    pub const fn can_write(self) -> bool {
        matches!(self, Self::Admin | Self::Write)
    }
}

/// Remote repository host operations.
///
/// Calls block the event until they return; implementations do not retry.
#[async_trait]
pub trait CodeHost: Send + Sync {
    /// Attaches a label to a pull request.
    async fn add_label(&self, pr: &PullRequestRef, label: &str) -> CodeHostResult<()>;

    /// Detaches a label from a pull request.
    async fn remove_label(&self, pr: &PullRequestRef, label: &str) -> CodeHostResult<()>;

    /// Detaches several labels in one call.
    async fn remove_labels(&self, pr: &PullRequestRef, labels: &[String]) -> CodeHostResult<()>;

    /// Reads the pull request's current labels.
    async fn pull_request_labels(&self, pr: &PullRequestRef) -> CodeHostResult<LabelSet>;

    /// Creates the label on the repository unless it already exists.
    async fn ensure_repository_label(
        &self,
        repository: &RepositoryName,
        label: &str,
    ) -> CodeHostResult<()>;

    /// Posts a comment on a pull request.
    async fn create_comment(&self, pr: &PullRequestRef, body: &str) -> CodeHostResult<()>;

    /// Lists the pull request's discussion comments.
    async fn list_comments(&self, pr: &PullRequestRef) -> CodeHostResult<Vec<PullRequestComment>>;

    /// Queries a login's access to a repository.
    async fn repository_permission(
        &self,
        repository: &RepositoryName,
        login: &str,
    ) -> CodeHostResult<RepositoryPermission>;

    /// Fetches a file's content as the host's base64 payload.
    async fn file_content(&self, location: &FileLocation) -> CodeHostResult<String>;

    /// Lists the pull request's operation log.
    async fn operation_logs(&self, pr: &PullRequestRef) -> CodeHostResult<Vec<OperationLogEntry>>;

    /// Clears the pending-review and pending-test counters.
    async fn reset_pending_checks(&self, pr: &PullRequestRef) -> CodeHostResult<()>;

    /// Merges the pull request.
    async fn merge(
        &self,
        pr: &PullRequestRef,
        method: MergeMethod,
        description: &str,
    ) -> CodeHostResult<()>;
}

/// Errors returned by code host adapters.
#[derive(Debug, Clone, Error)]
pub enum CodeHostError {
    /// The addressed resource does not exist.
    #[error("not found on code host: {0}")]
    NotFound(String),

    /// The host refused the operation.
    #[error("code host rejected {operation}: {reason}")]
    Rejected {
        /// Operation name.
        operation: String,
        /// Host-supplied reason.
        reason: String,
    },

    /// Transport or protocol failure.
    #[error("code host transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl CodeHostError {
    /// Wraps a transport error from the adapter.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Builds a rejection for the named operation.
    #[must_use]
    pub fn rejected(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}
