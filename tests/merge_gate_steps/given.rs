//! Given steps for merge gate BDD scenarios.

use super::world::{AUTHOR, MergeGateWorld};
use chrono::Duration;
use mockable::Clock;
use reviewbot::review::{
    domain::{FileLocation, PullRequest, PullRequestRef, ReviewConfig},
    ports::RepositoryPermission,
};
use rstest_bdd_macros::given;

#[given("a repository requiring {count:u32} lgtm labels")]
fn repository_requiring(world: &mut MergeGateWorld, count: u32) -> Result<(), eyre::Report> {
    world.config = ReviewConfig {
        lgtm_counts_required: count,
        ..ReviewConfig::default()
    };
    let reference = PullRequestRef::from_parts("openeuler", "community", 101)?;
    world.pull_request = Some(
        PullRequest::new(reference, AUTHOR, "master")
            .with_body("Refresh the mirror list")
            .with_html_url("https://gitee.com/openeuler/community/pulls/101"),
    );
    Ok(())
}

#[given(r#""{login}" has write access"#)]
fn has_write_access(world: &mut MergeGateWorld, login: String) -> Result<(), eyre::Report> {
    let repository = world.pull_request()?.reference().repository().clone();
    world
        .host
        .set_permission(&repository, &login, RepositoryPermission::Write);
    Ok(())
}

#[given(r#"the base branch is frozen for "{owner}""#)]
fn base_branch_frozen(world: &mut MergeGateWorld, owner: String) {
    let location = FileLocation::new("openeuler", "release-management", "master", "freeze.yaml");
    let now = world.clock.utc();
    let manifest = format!(
        "- organization: openeuler\n  branch: master\n  owners: [{owner}]\n  start: {}\n  end: {}\n",
        (now - Duration::hours(1)).to_rfc3339(),
        (now + Duration::hours(1)).to_rfc3339(),
    );
    world.host.put_file(&location, &manifest);
    world.config.freeze_file.push(location);
}
