//! In-memory integration tests for frozen target branches.

use crate::in_memory::helpers::{Harness, freeze_master, harness, pull_request};
use reviewbot::review::{
    domain::{MergeMethod, PullRequestAction, PullRequestEvent, messages},
    ports::CodeHost,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn frozen_branch_merges_only_for_its_owner(
    harness: Result<Harness, eyre::Report>,
) -> Result<(), eyre::Report> {
    let env = harness?;
    let pr = pull_request("kernel", 21)?;
    freeze_master(&env, "release-lead");
    env.grant_write(&pr, "alice");

    env.comment(&pr, "alice", "/approve").await?;
    env.comment(&pr, "alice", "/lgtm").await?;
    eyre::ensure!(env.host.merges().is_empty(), "frozen branch must not merge");

    env.comment(&pr, "alice", "/check-pr").await?;
    let refusal = messages::not_mergeable(
        "alice",
        &[messages::frozen_branch(&["release-lead".to_owned()])],
    );
    let comments = env.host.posted_comments(pr.reference());
    eyre::ensure!(
        comments.last() == Some(&refusal),
        "unexpected comments {comments:?}"
    );

    env.comment(&pr, "release-lead", "/check-pr").await?;
    let merges = env.host.merges();
    eyre::ensure!(merges.len() == 1, "owner should merge");
    eyre::ensure!(
        merges.iter().all(|merge| merge.method == MergeMethod::Squash),
        "kernel squashes"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn passive_label_update_stays_silent_on_frozen_branch(
    harness: Result<Harness, eyre::Report>,
) -> Result<(), eyre::Report> {
    let env = harness?;
    let pr = pull_request("kernel", 22)?;
    freeze_master(&env, "release-lead");
    env.host.add_label(pr.reference(), "approved").await?;
    env.host.add_label(pr.reference(), "lgtm").await?;
    let labelled = pr.clone().with_labels(["approved", "lgtm"]);

    env.bot
        .handle_pull_request_event(&PullRequestEvent::new(
            PullRequestAction::LabelUpdated,
            labelled,
        ))
        .await?;

    eyre::ensure!(env.host.merges().is_empty(), "frozen branch must not merge");
    eyre::ensure!(
        env.host.posted_comments(pr.reference()).is_empty(),
        "passive evaluation must not comment"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_freeze_manifest_surfaces_as_error(
    harness: Result<Harness, eyre::Report>,
) -> Result<(), eyre::Report> {
    let env = harness?;
    let pr = pull_request("kernel", 23)?;
    env.host.add_label(pr.reference(), "approved").await?;
    env.host.add_label(pr.reference(), "lgtm").await?;

    let outcome = env.comment(&pr, "alice", "/check-pr").await;

    eyre::ensure!(outcome.is_err(), "unreadable freeze manifest must fail");
    eyre::ensure!(env.host.merges().is_empty(), "nothing should merge");
    Ok(())
}
