//! Step definitions for merge gate BDD scenarios.

pub mod world;

mod given;
mod then;
mod when;
