//! In-memory adapters for tests and embedders without a real host.

mod code_host;

pub use code_host::{HostOperation, InMemoryCodeHost, MergeRecord};
