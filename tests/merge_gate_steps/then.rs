//! Then steps for merge gate BDD scenarios.

use super::world::MergeGateWorld;
use rstest_bdd_macros::then;

#[then("the pull request is merged")]
fn pull_request_merged(world: &MergeGateWorld) -> Result<(), eyre::Report> {
    let merges = world.host.merges().len();
    eyre::ensure!(merges == 1, "expected one merge, found {merges}");
    Ok(())
}

#[then("the pull request is not merged")]
fn pull_request_not_merged(world: &MergeGateWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.host.merges().is_empty(), "pull request was merged");
    Ok(())
}

#[then(r#"the bot comments "{text}""#)]
fn bot_comments(world: &MergeGateWorld, text: String) -> Result<(), eyre::Report> {
    let pr = world.pull_request()?;
    let comments = world.host.posted_comments(pr.reference());
    eyre::ensure!(
        comments.iter().any(|comment| comment.contains(&text)),
        "no bot comment contains {text:?}; comments: {comments:?}"
    );
    Ok(())
}

#[then(r#"the pull request has label "{label}""#)]
fn has_label(world: &MergeGateWorld, label: String) -> Result<(), eyre::Report> {
    let pr = world.pull_request()?;
    eyre::ensure!(
        world.host.labels(pr.reference()).contains(&label),
        "label {label} is missing"
    );
    Ok(())
}

#[then(r#"the pull request does not have label "{label}""#)]
fn lacks_label(world: &MergeGateWorld, label: String) -> Result<(), eyre::Report> {
    let pr = world.pull_request()?;
    eyre::ensure!(
        !world.host.labels(pr.reference()).contains(&label),
        "label {label} should be absent"
    );
    Ok(())
}
