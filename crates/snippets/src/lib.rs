//! Snippets library crate
//!
//! Stores and retrieves short named text snippets in a PostgreSQL table.
//! The binary exposes two subcommands, `put` and `get`; each invocation
//! opens one database connection, performs one operation, and exits.

pub mod cli;

use anyhow::Result;
use std::process::ExitCode;

/// Main entry point for snippets.
///
/// Parses command line arguments and dispatches to the selected command.
pub async fn run() -> Result<ExitCode> {
    cli::run().await
}
