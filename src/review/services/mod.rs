//! Application services for review consensus and merging.

mod bot;
mod coordinator;
mod decision;
mod error;
mod freeze;
mod labels;
mod merge;
mod permission;
mod provenance;

pub use bot::ReviewBot;
pub use coordinator::{DenialReport, MergeCoordinator};
pub use decision::{MergeDecisionEngine, label_reasons, required_labels};
pub use error::{HandlerErrors, ReviewError, ReviewResult};
pub use freeze::FreezeGate;
pub use labels::LabelStateManager;
pub use merge::{Attribution, MergeExecutor};
pub use permission::PermissionResolver;
pub use provenance::ProvenanceValidator;
