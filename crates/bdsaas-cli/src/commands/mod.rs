//! Subcommand implementations.

pub mod api;
pub mod config;
