//! Command implementations.

pub mod completions;
pub mod generate;
pub mod issue;
pub mod preset;
pub mod version;
