//! Comment and reason texts shown to pull request participants.

use super::LabelSet;

/// Reply to an author who tries to `/lgtm` their own pull request.
pub const SELF_LGTM: &str =
    "***lgtm*** can not be added in your self-own pull request. :astonished:";

/// Reason given when the host reports merge conflicts.
pub const CONFLICTS: &str = "PR conflicts to the target branch.";

/// Prefix of labels managed by the CLA check.
pub const CLA_LABEL_PREFIX: &str = "openeuler-cla/";

/// Thanks a reviewer who lacks permission to add lgtm labels.
#[must_use]
pub fn no_permission_for_lgtm(commenter: &str) -> String {
    format!(
        "Thanks for your review, ***{commenter}***, your opinion is very important to us.:wave:\n\
         The maintainers will consider your advice carefully."
    )
}

/// Tells a commenter they may not change a label.
#[must_use]
pub fn no_permission_for_label(commenter: &str, action: &str, label: &str) -> String {
    format!(
        "\n***@{commenter}*** has no permission to {action} ***{label}*** label in this pull request. :astonished:\n\
         Please contact to the collaborators in this repository."
    )
}

/// Credits a commenter for adding a label.
#[must_use]
pub fn label_added(label: &str, commenter: &str) -> String {
    format!(
        "***{label}*** was added to this pull request by: ***{commenter}***. :wave: \n\
         **NOTE:** If this pull request is not merged while all conditions are met, \
         comment \"/check-pr\" to try again. :smile: "
    )
}

/// Credits a commenter for removing a label.
#[must_use]
pub fn label_removed(label: &str, commenter: &str) -> String {
    format!("***{label}*** was removed in this pull request by: ***{commenter}***. :flushed: ")
}

/// Lists the labels cleared after new commits.
#[must_use]
pub fn labels_cleared(labels: &[String]) -> String {
    format!(
        "New code changes of pr are detected and remove these labels ***{}***. :flushed: ",
        labels.join(", ")
    )
}

/// Asks the author to pick a reviewer.
#[must_use]
pub fn reviewer_not_set(author: &str) -> String {
    format!(
        "**@{author}** Thank you for submitting a PullRequest. It is detected that you have \
         not set a reviewer, please set a one."
    )
}

/// Explains why a pull request cannot merge.
#[must_use]
pub fn not_mergeable(commenter: &str, reasons: &[String]) -> String {
    format!(
        "@{commenter} , this pr is not mergeable and the reasons are below:\n{}",
        reasons.join("\n")
    )
}

/// Reason listing required labels that are absent.
#[must_use]
pub fn missing_labels(labels: &LabelSet) -> String {
    format!("PR does not have these labels: {labels}")
}

/// Reason listing labels that must be removed.
#[must_use]
pub fn invalid_labels(labels: &LabelSet) -> String {
    format!("PR should remove these labels: {labels}")
}

/// Reason for too few reviewer approvals.
#[must_use]
pub fn not_enough_lgtm(required: u32, present: usize) -> String {
    format!("PR needs {required} lgtm labels and now gets {present}")
}

/// Reason naming who may merge into a frozen branch.
#[must_use]
pub fn frozen_branch(owners: &[String]) -> String {
    format!(
        "The target branch of PR has been frozen and it can be merge only by branch owners: {}",
        owners.join(", ")
    )
}

/// Provenance failure: no add-label record exists.
pub const OPERATION_LOG_MISSING: &str = "The corresponding operation log is missing. you should \
     delete the label and add it again by correct way";

/// Provenance failure: the label was attached by someone other than the
/// automation identity.
#[must_use]
pub fn label_added_by_other(actor: &str, label: &str) -> String {
    if label.starts_with(CLA_LABEL_PREFIX) {
        format!("{actor} You can't add {label} by yourself, please remove it and use /check-cla to add it")
    } else {
        format!("{actor} You can't add {label} by yourself, please contact the maintainers")
    }
}

/// Combines per-label provenance failures into one block.
#[must_use]
pub fn labels_not_ready(entries: &[String]) -> String {
    let noun = if entries.len() > 1 {
        "labels are"
    } else {
        "label is"
    };
    format!(
        "**The following {noun} not ready**.\n\n{}",
        entries.join("\n\n")
    )
}
