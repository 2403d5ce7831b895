//! Tooling & Integration Layer
//!
//! CLI argument handling and text rendering. Kept apart from the decoder so
//! the library can be used without any of it.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
