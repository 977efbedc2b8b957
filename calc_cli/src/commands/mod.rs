//! Subcommand implementations

pub mod calc;
pub mod catalog;
pub mod prompt;
