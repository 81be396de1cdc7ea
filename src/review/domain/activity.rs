//! Host-side activity records: the operation log and the comment thread.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of action recorded in a pull request's operation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationAction {
    /// A label was attached.
    AddLabel,
    /// A label was detached.
    RemoveLabel,
    /// Any other recorded action.
    Other(String),
}

/// One entry of the host's append-only operation log.
///
/// `created_at` is kept as the raw host string; readers parse it as
/// RFC 3339 and skip entries that do not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationLogEntry {
    /// Recorded action.
    pub action: OperationAction,
    /// Free text describing the action; mentions the label name.
    pub content: String,
    /// Raw timestamp as reported by the host.
    pub created_at: String,
    /// Login of the acting identity, when the host recorded one.
    pub actor: Option<String>,
}

impl OperationLogEntry {
    /// Creates an add-label entry.
    #[must_use]
    pub fn label_added(
        label: &str,
        actor: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            action: OperationAction::AddLabel,
            content: format!("add label {label}"),
            created_at: created_at.into(),
            actor: Some(actor.into()),
        }
    }

    /// Parses the timestamp as RFC 3339.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the host timestamp is malformed.
    pub fn timestamp(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.created_at).map(|at| at.with_timezone(&Utc))
    }
}

/// A comment in a pull request's discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestComment {
    /// Login of the comment author.
    pub author: String,
    /// Comment text.
    pub body: String,
    /// Raw creation timestamp.
    pub created_at: String,
    /// Raw last-update timestamp.
    pub updated_at: String,
}

impl PullRequestComment {
    /// Creates a comment that was never edited.
    #[must_use]
    pub fn new(
        author: impl Into<String>,
        body: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        let created = created_at.into();
        Self {
            author: author.into(),
            body: body.into(),
            updated_at: created.clone(),
            created_at: created,
        }
    }

    /// Marks the comment as edited at the given time.
    #[must_use]
    pub fn edited_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = updated_at.into();
        self
    }

    /// Returns `true` when the comment was edited after creation.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.created_at != self.updated_at
    }
}
