//! Shared test helpers for in-memory review flow tests.

use std::sync::Arc;

use chrono::Duration;
use mockable::{Clock, DefaultClock};
use reviewbot::review::{
    adapters::memory::InMemoryCodeHost,
    domain::{
        BotConfiguration, DEFAULT_TRUSTED_LABEL_ACTOR, FileLocation, NoteEvent, PullRequest,
        PullRequestComment, PullRequestRef,
    },
    ports::RepositoryPermission,
    services::{HandlerErrors, ReviewBot},
};
use rstest::fixture;

/// Author of every fixture pull request.
pub const AUTHOR: &str = "carol";

/// Bot configuration shared by the flow tests.
///
/// `community` needs two reviewers and a green CI label; `kernel` needs one
/// reviewer, squashes, and honours the release freeze manifest.
pub const CONFIG: &str = r"
config_items:
  - repos: [openeuler]
    lgtm_counts_required: 2
    labels_for_merge: [ci_successful]
  - repos: [openeuler/kernel]
    merge_method: squash
    freeze_file:
      - {owner: openeuler, repo: release-management, branch: master, path: freeze.yaml}
";

/// Test bot over the in-memory host.
pub type TestBot = ReviewBot<InMemoryCodeHost, DefaultClock>;

/// Host plus the bot driving it, sharing one clock.
pub struct Harness {
    pub clock: Arc<DefaultClock>,
    pub host: Arc<InMemoryCodeHost>,
    pub bot: TestBot,
}

impl Harness {
    /// Posts a human comment to the thread and lets the bot react to it.
    ///
    /// # Errors
    ///
    /// Returns the handler failures reported by the bot.
    pub async fn comment(
        &self,
        pr: &PullRequest,
        commenter: &str,
        body: &str,
    ) -> Result<(), HandlerErrors> {
        let now = self.clock.utc().to_rfc3339();
        self.host.push_comment(
            pr.reference(),
            PullRequestComment::new(commenter, body, now),
        );
        self.bot
            .handle_note_event(&NoteEvent::comment_created(pr.clone(), commenter, body))
            .await
    }

    /// Grants write access on the pull request's repository.
    pub fn grant_write(&self, pr: &PullRequest, login: &str) {
        self.host
            .set_permission(pr.reference().repository(), login, RepositoryPermission::Write);
    }
}

/// Provides a bot configured from [`CONFIG`] over a fresh host.
///
/// # Errors
///
/// Returns an error if the configuration does not parse.
#[fixture]
pub fn harness() -> Result<Harness, eyre::Report> {
    let clock = Arc::new(DefaultClock);
    let host = Arc::new(InMemoryCodeHost::with_clock(
        DEFAULT_TRUSTED_LABEL_ACTOR,
        Arc::clone(&clock),
    ));
    let config = BotConfiguration::from_yaml_str(CONFIG)?;
    let bot = ReviewBot::new(Arc::clone(&host), Arc::clone(&clock), config);
    Ok(Harness { clock, host, bot })
}

/// Builds an open, mergeable pull request by [`AUTHOR`] against `master`.
///
/// # Errors
///
/// Returns an error if the reference is invalid.
pub fn pull_request(repository: &str, number: u64) -> Result<PullRequest, eyre::Report> {
    let reference = PullRequestRef::from_parts("openeuler", repository, number)?;
    Ok(PullRequest::new(reference, AUTHOR, "master")
        .with_body("Tighten the scheduler")
        .with_html_url(format!(
            "https://gitee.com/openeuler/{repository}/pulls/{number}"
        )))
}

/// Location of the release freeze manifest named in [`CONFIG`].
pub fn freeze_location() -> FileLocation {
    FileLocation::new("openeuler", "release-management", "master", "freeze.yaml")
}

/// Freezes `openeuler` `master` around the harness clock's current time,
/// owned by `owner`.
pub fn freeze_master(env: &Harness, owner: &str) {
    let now = env.clock.utc();
    let manifest = format!(
        "- organization: openeuler\n  branch: master\n  owners: [{owner}]\n  start: {}\n  end: {}\n",
        (now - Duration::hours(1)).to_rfc3339(),
        (now + Duration::hours(1)).to_rfc3339(),
    );
    env.host.put_file(&freeze_location(), &manifest);
}
