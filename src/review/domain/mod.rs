//! Domain model for review consensus and merge gating.
//!
//! Everything here is pure: label naming rules, command recognition,
//! manifest decoding, configuration, and the merge verdict. Host access
//! lives behind [`crate::review::ports`].

mod activity;
mod command;
mod config;
mod decision;
mod error;
mod event;
mod ids;
mod label;
mod manifest;
pub mod messages;
mod pull_request;

pub use activity::{OperationAction, OperationLogEntry, PullRequestComment};
pub use command::{RETEST_COMMAND, ReviewCommand};
pub use config::{
    AttributionStyle, BotConfiguration, DEFAULT_TRUSTED_LABEL_ACTOR, MergeDescriptionPolicy,
    MergeMethod, RepoReviewConfig, ReviewConfig,
};
pub use decision::MergeDecision;
pub use error::ReviewDomainError;
pub use event::{NoteAction, NoteEvent, PullRequestAction, PullRequestEvent};
pub use ids::{PullRequestNumber, PullRequestRef, RepositoryName};
pub use label::{
    APPROVED_LABEL, LABEL_LENGTH_LIMIT, LGTM_LABEL, LabelSet, is_lgtm_family, lgtm_label_for,
};
pub use manifest::{
    FileLocation, FreezeDeclaration, FreezeManifest, ManifestError, OWNERS_FILE, OwnersManifest,
    SigInfo, SigMember, SigRepository, decode_yaml,
};
pub use pull_request::PullRequest;
