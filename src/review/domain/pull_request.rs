//! Pull request snapshot carried by inbound events.

use super::{LabelSet, PullRequestRef};
use serde::{Deserialize, Serialize};

/// Point-in-time view of a pull request as delivered with an event.
///
/// The host owns the real state; the core reads one snapshot per event and
/// re-reads anything it must trust from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    reference: PullRequestRef,
    author: String,
    base_branch: String,
    labels: LabelSet,
    mergeable: bool,
    needs_review: bool,
    needs_test: bool,
    assignees: Vec<String>,
    body: String,
    html_url: String,
}

impl PullRequest {
    /// Creates an open, mergeable snapshot with no labels.
    #[must_use]
    pub fn new(
        reference: PullRequestRef,
        author: impl Into<String>,
        base_branch: impl Into<String>,
    ) -> Self {
        Self {
            reference,
            author: author.into(),
            base_branch: base_branch.into(),
            labels: LabelSet::new(),
            mergeable: true,
            needs_review: false,
            needs_test: false,
            assignees: Vec::new(),
            body: String::new(),
            html_url: String::new(),
        }
    }

    /// Sets the current labels.
    #[must_use]
    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Sets the mergeability flag reported by the host.
    #[must_use]
    pub const fn with_mergeable(mut self, mergeable: bool) -> Self {
        self.mergeable = mergeable;
        self
    }

    /// Sets the pending-review and pending-test flags.
    #[must_use]
    pub const fn with_pending_checks(mut self, needs_review: bool, needs_test: bool) -> Self {
        self.needs_review = needs_review;
        self.needs_test = needs_test;
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = String>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Sets the description body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the web link to the pull request.
    #[must_use]
    pub fn with_html_url(mut self, html_url: impl Into<String>) -> Self {
        self.html_url = html_url.into();
        self
    }

    /// Returns the host reference.
    #[must_use]
    pub const fn reference(&self) -> &PullRequestRef {
        &self.reference
    }

    /// Returns the author's login.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the target branch.
    #[must_use]
    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    /// Returns the labels in the snapshot.
    #[must_use]
    pub const fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Returns whether the host reports the pull request free of conflicts.
    #[must_use]
    pub const fn is_mergeable(&self) -> bool {
        self.mergeable
    }

    /// Returns `true` while review or test counters are still pending.
    #[must_use]
    pub const fn has_pending_checks(&self) -> bool {
        self.needs_review || self.needs_test
    }

    /// Returns the assignees.
    #[must_use]
    pub fn assignees(&self) -> &[String] {
        &self.assignees
    }

    /// Returns the description body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the web link.
    #[must_use]
    pub fn html_url(&self) -> &str {
        &self.html_url
    }
}
