//! Port contracts for review automation.
//!
//! Ports define host-agnostic interfaces used by review services.

pub mod code_host;

pub use code_host::{CodeHost, CodeHostError, CodeHostResult, RepositoryPermission};
