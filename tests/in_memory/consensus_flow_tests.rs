//! In-memory integration tests for review consensus reaching a merge.

use crate::in_memory::helpers::{AUTHOR, Harness, harness, pull_request};
use reviewbot::review::{
    domain::{MergeMethod, PullRequestAction, PullRequestEvent, messages},
    ports::CodeHost,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn two_reviewers_sign_off_and_ci_merge_with_credits(
    harness: Result<Harness, eyre::Report>,
) -> Result<(), eyre::Report> {
    let env = harness?;
    let pr = pull_request("community", 11)?;
    for login in ["alice", "bob", "dave"] {
        env.grant_write(&pr, login);
    }
    env.host.add_label(pr.reference(), "ci_successful").await?;

    env.comment(&pr, "dave", "/approve").await?;
    env.comment(&pr, "alice", "Nice work.\n/lgtm").await?;
    eyre::ensure!(env.host.merges().is_empty(), "one reviewer must not merge");
    env.comment(&pr, "bob", "/lgtm").await?;

    let merges = env.host.merges();
    let merge = merges
        .first()
        .ok_or_else(|| eyre::eyre!("expected a merge"))?;
    eyre::ensure!(merges.len() == 1, "expected exactly one merge");
    eyre::ensure!(merge.method == MergeMethod::Merge, "unexpected method");
    eyre::ensure!(
        merge.description == "\nFrom: @carol \nReviewed-by: @alice, @bob \nSigned-off-by: @dave \n",
        "unexpected description {:?}",
        merge.description
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn check_pr_lists_every_outstanding_reason(
    harness: Result<Harness, eyre::Report>,
) -> Result<(), eyre::Report> {
    let env = harness?;
    let pr = pull_request("community", 12)?;
    env.grant_write(&pr, "alice");

    env.comment(&pr, "alice", "/lgtm").await?;
    env.comment(&pr, "alice", "/check-pr").await?;

    let expected = messages::not_mergeable(
        "alice",
        &[
            "PR needs 2 lgtm labels and now gets 1".to_owned(),
            "PR does not have these labels: approved, ci_successful".to_owned(),
        ],
    );
    let comments = env.host.posted_comments(pr.reference());
    eyre::ensure!(
        comments.last() == Some(&expected),
        "unexpected comments {comments:?}"
    );
    eyre::ensure!(env.host.merges().is_empty(), "pull request must not merge");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_commits_revoke_consensus(
    harness: Result<Harness, eyre::Report>,
) -> Result<(), eyre::Report> {
    let env = harness?;
    let pr = pull_request("community", 13)?;
    env.grant_write(&pr, "alice");
    env.comment(&pr, "alice", "/lgtm").await?;
    env.comment(&pr, "alice", "/approve").await?;
    let labelled = pr.clone().with_labels(env.host.labels(pr.reference()).iter());

    env.bot
        .handle_pull_request_event(&PullRequestEvent::new(
            PullRequestAction::SourceBranchChanged,
            labelled,
        ))
        .await?;

    eyre::ensure!(
        env.host.labels(pr.reference()).is_empty(),
        "consensus labels should be cleared"
    );
    let comments = env.host.posted_comments(pr.reference());
    eyre::ensure!(
        comments.last().map(String::as_str) == Some("/retest"),
        "expected a retest request, got {comments:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn author_cannot_review_own_change(
    harness: Result<Harness, eyre::Report>,
) -> Result<(), eyre::Report> {
    let env = harness?;
    let pr = pull_request("community", 14)?;
    env.grant_write(&pr, AUTHOR);

    env.comment(&pr, AUTHOR, "/lgtm").await?;

    eyre::ensure!(
        env.host.posted_comments(pr.reference()) == vec![messages::SELF_LGTM.to_owned()],
        "expected only the self-review refusal"
    );
    eyre::ensure!(
        env.host.labels(pr.reference()).is_empty(),
        "no label should be added"
    );
    Ok(())
}
