//! Review commands recognised in pull request comments.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Comment the bot posts to ask CI for a fresh run.
pub const RETEST_COMMAND: &str = "/retest";

static ADD_LGTM: LazyLock<Regex> = LazyLock::new(|| command_pattern("lgtm"));
static CANCEL_LGTM: LazyLock<Regex> = LazyLock::new(|| command_pattern("lgtm cancel"));
static ADD_APPROVE: LazyLock<Regex> = LazyLock::new(|| command_pattern("approve"));
static CANCEL_APPROVE: LazyLock<Regex> = LazyLock::new(|| command_pattern("approve cancel"));
static CHECK_PR: LazyLock<Regex> = LazyLock::new(|| command_pattern("check-pr"));

#[expect(
    clippy::expect_used,
    reason = "patterns are built from fixed literals and always compile"
)]
fn command_pattern(command: &str) -> Regex {
    Regex::new(&format!(r"(?mi)^/{}\s*$", regex::escape(command)))
        .expect("command pattern compiles")
}

/// A review command issued by a human in a pull request comment.
///
/// Each command must occupy a whole comment line. Matching ignores case and
/// tolerates trailing whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewCommand {
    /// `/lgtm`: add the commenter's reviewer label.
    AddLgtm,
    /// `/lgtm cancel`: withdraw reviewer labels.
    CancelLgtm,
    /// `/approve`: add the sign-off label.
    Approve,
    /// `/approve cancel`: remove the sign-off label.
    CancelApprove,
    /// `/check-pr`: re-run the merge decision and explain any denial.
    CheckPr,
}

impl ReviewCommand {
    /// Returns `true` when a line of `body` is exactly this command.
    #[must_use]
    pub fn matches(self, body: &str) -> bool {
        self.pattern().is_match(body)
    }

    /// Extracts the commands a comment issues.
    ///
    /// The lgtm and approve families each yield at most one command, with
    /// the adding form winning when both forms appear.
    ///
    /// # Examples
    ///
    ///     use reviewbot::review::domain::ReviewCommand;
    ///
    ///     let commands = ReviewCommand::detect("looks fine\n/LGTM  \n/check-pr");
    ///     assert_eq!(commands, vec![ReviewCommand::AddLgtm, ReviewCommand::CheckPr]);
    #[must_use]
    pub fn detect(body: &str) -> Vec<Self> {
        let families = [
            (Self::AddLgtm, Self::CancelLgtm),
            (Self::Approve, Self::CancelApprove),
        ];
        let mut commands: Vec<Self> = families
            .into_iter()
            .filter_map(|(add, cancel)| {
                if add.matches(body) {
                    Some(add)
                } else if cancel.matches(body) {
                    Some(cancel)
                } else {
                    None
                }
            })
            .collect();
        if Self::CheckPr.matches(body) {
            commands.push(Self::CheckPr);
        }
        commands
    }

    /// Returns the literal command text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddLgtm => "/lgtm",
            Self::CancelLgtm => "/lgtm cancel",
            Self::Approve => "/approve",
            Self::CancelApprove => "/approve cancel",
            Self::CheckPr => "/check-pr",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::AddLgtm => &ADD_LGTM,
            Self::CancelLgtm => &CANCEL_LGTM,
            Self::Approve => &ADD_APPROVE,
            Self::CancelApprove => &CANCEL_APPROVE,
            Self::CheckPr => &CHECK_PR,
        }
    }
}

impl fmt::Display for ReviewCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
