//! Command-line interface for snippets.
//!
//! Parses subcommands and flags, loads layered configuration (CLI flags
//! over an optional TOML config file), initializes file logging, and
//! drives the snippet store. Exit-code semantics live in `error`.

mod commands;
mod config;
mod error;
mod logging;

pub use config::CliConfig;
pub use error::{
    exit_code_for_error, format_store_error, EXIT_ERROR, EXIT_NOT_FOUND, EXIT_SUCCESS, EXIT_USAGE,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};

use snippets_storage::SnippetStore;

#[derive(Parser)]
#[command(name = "snippets")]
#[command(about = "Store and retrieve snippets of text", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database server hostname
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Database server port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Database user
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Full connection URL (replaces host, port, and user)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Log file path
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a snippet
    Put {
        /// Name of the database
        database: String,
        /// Name of the database table
        table: String,
        /// Name of the snippet
        name: String,
        /// Snippet text
        snippet: String,
    },
    /// Retrieve a snippet
    Get {
        /// Name of the database to be queried
        database: String,
        /// Name of the database table
        table: String,
        /// Name of the snippet
        name: String,
    },
    /// Show effective configuration
    Config,
}

pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match CliConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return Ok(ExitCode::from(EXIT_USAGE));
        }
    };

    // Handle the config command early (no connection, no log file)
    if matches!(cli.command, Commands::Config) {
        config.print();
        return Ok(ExitCode::SUCCESS);
    }

    // The guard must outlive the command or buffered log lines are lost
    let _log_guard = logging::init(&config.log_file, cli.verbose)?;

    let database = match &cli.command {
        Commands::Put { database, .. } | Commands::Get { database, .. } => database.clone(),
        Commands::Config => unreachable!(), // handled above
    };

    let store_config = config.store_config(&database);
    let mut store = match SnippetStore::connect(&store_config).await {
        Ok(s) => s,
        Err(e) => {
            error!(database = %database, error = %e, "connection failed");
            eprintln!("Could not connect to {database} ...exiting");
            return Ok(ExitCode::from(EXIT_ERROR));
        }
    };

    let result = match cli.command {
        Commands::Put {
            table,
            name,
            snippet,
            ..
        } => commands::put(&mut store, &table, &name, &snippet).await,
        Commands::Get { table, name, .. } => commands::get(&mut store, &table, &name).await,
        Commands::Config => unreachable!(), // handled above
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "operation failed");
            eprintln!("{}", format_store_error(&e));
            exit_code_for_error(&e)
        }
    };

    if let Err(e) = store.close().await {
        warn!(error = %e, "failed to close connection");
    }

    Ok(ExitCode::from(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_put() {
        let cli = Cli::try_parse_from([
            "snippets", "put", "snippets", "snippets", "greeting", "hello",
        ])
        .unwrap();

        match cli.command {
            Commands::Put {
                database,
                table,
                name,
                snippet,
            } => {
                assert_eq!(database, "snippets");
                assert_eq!(table, "snippets");
                assert_eq!(name, "greeting");
                assert_eq!(snippet, "hello");
            }
            _ => panic!("Expected Put command"),
        }
    }

    #[test]
    fn test_cli_parse_get() {
        let cli = Cli::try_parse_from(["snippets", "get", "prod", "notes", "greeting"]).unwrap();

        match cli.command {
            Commands::Get {
                database,
                table,
                name,
            } => {
                assert_eq!(database, "prod");
                assert_eq!(table, "notes");
                assert_eq!(name, "greeting");
            }
            _ => panic!("Expected Get command"),
        }
    }

    #[test]
    fn test_cli_parse_global_options() {
        let cli = Cli::try_parse_from([
            "snippets",
            "--host",
            "db.internal",
            "--port",
            "5433",
            "--log-file",
            "/tmp/snippets.log",
            "-v",
            "get",
            "prod",
            "notes",
            "greeting",
        ])
        .unwrap();

        assert_eq!(cli.host, Some("db.internal".to_string()));
        assert_eq!(cli.port, Some(5433));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/snippets.log")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_config_command() {
        let cli = Cli::try_parse_from(["snippets", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["snippets"]).is_err());
    }

    #[test]
    fn test_cli_put_requires_all_positionals() {
        assert!(Cli::try_parse_from(["snippets", "put", "snippets", "snippets", "greeting"])
            .is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["snippets", "delete", "prod", "notes", "greeting"]).is_err());
    }
}
