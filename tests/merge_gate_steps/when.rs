//! When steps for merge gate BDD scenarios.

use super::world::{MergeGateWorld, run_async};
use eyre::WrapErr;
use mockable::Clock;
use reviewbot::review::domain::{NoteEvent, PullRequestComment};
use rstest_bdd_macros::when;

#[when(r#""{commenter}" comments "{body}""#)]
fn commenter_comments(
    world: &mut MergeGateWorld,
    commenter: String,
    body: String,
) -> Result<(), eyre::Report> {
    let pr = world.pull_request()?.clone();
    world.host.push_comment(
        pr.reference(),
        PullRequestComment::new(
            commenter.as_str(),
            body.as_str(),
            world.clock.utc().to_rfc3339(),
        ),
    );
    let event = NoteEvent::comment_created(pr, commenter, body);
    run_async(world.bot().handle_note_event(&event))
        .wrap_err("handle review comment in scenario")?;
    Ok(())
}
