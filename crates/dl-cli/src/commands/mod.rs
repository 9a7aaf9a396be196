//! CLI subcommand implementations.

pub mod import;
pub mod review;
pub mod rule;
pub mod show;
pub mod status;
pub mod summary;
pub mod util;
