//! Reviewbot: review consensus and merge gating for hosted pull requests.
//!
//! This crate reacts to pull request and comment events from a code host.
//! Reviewers express consensus with `/lgtm` and `/approve` commands, which
//! the bot turns into labels; the bot then decides whether the pull request
//! may merge and merges it when every gate passes.
//!
//! # Architecture
//!
//! Reviewbot follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (an in-memory host)
//!
//! # Modules
//!
//! - [`review`]: Commands, label state, merge decisions, and merging

pub mod review;
