//! Adapter implementations for review ports.

pub mod memory;
