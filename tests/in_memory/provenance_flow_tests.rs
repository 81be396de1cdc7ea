//! In-memory integration tests for labels attached outside the bot.

use crate::in_memory::helpers::{Harness, freeze_location, harness, pull_request};
use mockable::Clock;
use reviewbot::review::{
    domain::{OperationLogEntry, PullRequestAction, PullRequestEvent, messages},
    ports::CodeHost,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hand_applied_label_blocks_merge_until_readded(
    harness: Result<Harness, eyre::Report>,
) -> Result<(), eyre::Report> {
    let env = harness?;
    let pr = pull_request("kernel", 31)?;
    env.host.put_file(&freeze_location(), "[]\n");
    env.host.set_labels(pr.reference(), ["approved"]);
    env.host.push_operation_log(
        pr.reference(),
        OperationLogEntry::label_added("approved", "mallory", env.clock.utc().to_rfc3339()),
    );
    env.host.add_label(pr.reference(), "lgtm").await?;

    env.comment(&pr, "alice", "/check-pr").await?;
    let comments = env.host.posted_comments(pr.reference());
    let expected = messages::label_added_by_other("mallory", "approved");
    eyre::ensure!(
        comments.last().is_some_and(|comment| comment.contains(&expected)),
        "expected a provenance complaint, got {comments:?}"
    );
    eyre::ensure!(env.host.merges().is_empty(), "pull request must not merge");

    env.host.add_label(pr.reference(), "approved").await?;
    env.bot
        .handle_pull_request_event(&PullRequestEvent::new(
            PullRequestAction::LabelUpdated,
            pr.clone().with_labels(["approved", "lgtm"]),
        ))
        .await?;

    eyre::ensure!(env.host.merges().len() == 1, "re-added label should merge");
    Ok(())
}
