//! Inbound host events the review core reacts to.

use super::PullRequest;
use serde::{Deserialize, Serialize};

/// What happened to a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestAction {
    /// The pull request was opened.
    Opened,
    /// New commits landed on the source branch.
    SourceBranchChanged,
    /// The label set changed through any path.
    LabelUpdated,
    /// The pull request was closed or merged.
    Closed,
    /// Any other host action, kept verbatim.
    Other(String),
}

/// Pull request lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    /// The action that fired the event.
    pub action: PullRequestAction,
    /// Snapshot of the pull request after the action.
    pub pull_request: PullRequest,
}

impl PullRequestEvent {
    /// Creates an event for the given action and snapshot.
    #[must_use]
    pub const fn new(action: PullRequestAction, pull_request: PullRequest) -> Self {
        Self {
            action,
            pull_request,
        }
    }
}

/// What happened to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteAction {
    /// A new comment was posted.
    Created,
    /// An existing comment was edited.
    Edited,
    /// A comment was deleted.
    Deleted,
}

/// Comment event on a pull request or another commentable target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// The comment action.
    pub action: NoteAction,
    /// Whether the comment targets a pull request.
    pub on_pull_request: bool,
    /// Whether the targeted pull request is open.
    pub pull_request_open: bool,
    /// Login of the comment author.
    pub commenter: String,
    /// Comment text.
    pub body: String,
    /// Snapshot of the pull request the comment belongs to.
    pub pull_request: PullRequest,
}

impl NoteEvent {
    /// Creates a freshly posted comment on an open pull request.
    #[must_use]
    pub fn comment_created(
        pull_request: PullRequest,
        commenter: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            action: NoteAction::Created,
            on_pull_request: true,
            pull_request_open: true,
            commenter: commenter.into(),
            body: body.into(),
            pull_request,
        }
    }

    /// Returns `true` when review commands in this comment should be acted
    /// on: a newly created comment on an open pull request.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.on_pull_request && self.pull_request_open && self.action == NoteAction::Created
    }
}
