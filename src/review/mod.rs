//! Review consensus and merge gating for pull requests.
//!
//! This module turns review commands left in pull request comments into
//! consensus labels (`lgtm`, `lgtm-<reviewer>`, `approved`) and decides,
//! from the label set, the host's operation log, branch-freeze manifests,
//! and per-repository configuration, whether a pull request may merge. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! No state survives between events: every decision re-reads the host.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
