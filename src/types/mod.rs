// Shared type definitions for the group engine.
// Each submodule defines types used across the crate.

pub mod errors;
pub mod group;
pub mod options;
pub mod tab;
