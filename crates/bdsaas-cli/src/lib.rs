//! Command-line front end for the bdsaas telephony API.
//!
//! This crate provides the `bdsaas` binary: list seats, place calls, look
//! up call records and download recordings from a terminal.

pub mod app_key;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use error::{CliError, CliResult};
