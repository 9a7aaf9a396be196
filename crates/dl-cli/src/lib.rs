//! Daily log CLI library.
//!
//! This crate provides the CLI interface for the daily activity log.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, RuleAction};
pub use config::Config;
