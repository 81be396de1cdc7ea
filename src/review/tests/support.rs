//! Shared fixtures for review unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;
use mockall::mock;
use rstest::fixture;

use crate::review::{
    adapters::memory::InMemoryCodeHost,
    domain::{
        DEFAULT_TRUSTED_LABEL_ACTOR, FileLocation, LabelSet, MergeMethod, NoteEvent,
        OperationLogEntry, PullRequest, PullRequestComment, PullRequestRef, RepositoryName,
        ReviewConfig,
    },
    ports::{CodeHost, CodeHostResult, RepositoryPermission},
};

pub const AUTHOR: &str = "carol";

mock! {
    pub Host {}

    #[async_trait]
    impl CodeHost for Host {
        async fn add_label(&self, pr: &PullRequestRef, label: &str) -> CodeHostResult<()>;
        async fn remove_label(&self, pr: &PullRequestRef, label: &str) -> CodeHostResult<()>;
        async fn remove_labels(&self, pr: &PullRequestRef, labels: &[String]) -> CodeHostResult<()>;
        async fn pull_request_labels(&self, pr: &PullRequestRef) -> CodeHostResult<LabelSet>;
        async fn ensure_repository_label(
            &self,
            repository: &RepositoryName,
            label: &str,
        ) -> CodeHostResult<()>;
        async fn create_comment(&self, pr: &PullRequestRef, body: &str) -> CodeHostResult<()>;
        async fn list_comments(&self, pr: &PullRequestRef) -> CodeHostResult<Vec<PullRequestComment>>;
        async fn repository_permission(
            &self,
            repository: &RepositoryName,
            login: &str,
        ) -> CodeHostResult<RepositoryPermission>;
        async fn file_content(&self, location: &FileLocation) -> CodeHostResult<String>;
        async fn operation_logs(&self, pr: &PullRequestRef) -> CodeHostResult<Vec<OperationLogEntry>>;
        async fn reset_pending_checks(&self, pr: &PullRequestRef) -> CodeHostResult<()>;
        async fn merge(
            &self,
            pr: &PullRequestRef,
            method: MergeMethod,
            description: &str,
        ) -> CodeHostResult<()>;
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Noon on 1 May 2024, well before any wall-clock run of the suite.
pub fn fixed_instant() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// The fixture pull request's reference.
pub fn pr_ref() -> PullRequestRef {
    PullRequestRef::from_parts("openeuler", "community", 7).expect("valid pull request ref")
}

#[fixture]
pub fn host() -> Arc<InMemoryCodeHost> {
    Arc::new(InMemoryCodeHost::new())
}

#[fixture]
pub fn config() -> ReviewConfig {
    ReviewConfig::default()
}

/// A mergeable pull request by [`AUTHOR`] targeting `master`.
pub fn pull_request(labels: &[&str]) -> PullRequest {
    PullRequest::new(pr_ref(), AUTHOR, "master")
        .with_labels(labels.iter().copied())
        .with_body("Fix the widget")
        .with_html_url("https://gitee.com/openeuler/community/pulls/7")
}

/// A freshly created comment on the pull request.
pub fn note(pr: &PullRequest, commenter: &str, body: &str) -> NoteEvent {
    NoteEvent::comment_created(pr.clone(), commenter, body)
}

/// An add-label record by the automation identity, `minutes_ago` old.
pub fn trusted_entry(label: &str, minutes_ago: i64) -> OperationLogEntry {
    logged_entry(label, DEFAULT_TRUSTED_LABEL_ACTOR, minutes_ago)
}

/// An add-label record by `actor`, `minutes_ago` old.
pub fn logged_entry(label: &str, actor: &str, minutes_ago: i64) -> OperationLogEntry {
    let at = Utc::now() - Duration::minutes(minutes_ago);
    OperationLogEntry::label_added(label, actor, at.to_rfc3339())
}

/// Puts labels on the host as if the automation identity added them.
pub fn seed_trusted_labels(host: &InMemoryCodeHost, pr: &PullRequestRef, labels: &[&str]) {
    host.set_labels(pr, labels.iter().copied());
    for label in labels {
        host.push_operation_log(pr, trusted_entry(label, 30));
    }
}

/// Grants write access on the fixture repository.
pub fn grant_write(host: &InMemoryCodeHost, login: &str) {
    host.set_permission(pr_ref().repository(), login, RepositoryPermission::Write);
}
