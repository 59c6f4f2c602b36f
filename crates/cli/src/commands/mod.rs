//! Subcommand implementations

pub mod agents;
pub mod classify;
pub mod config;
