//! Layered CLI configuration.
//!
//! Precedence is CLI flags over config file. There is no environment
//! tier: the tool consults no environment variables of its own. The
//! config file is optional TOML, read from `--config` or the default
//! location under the user config directory.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::PathBuf;

use snippets_storage::StoreConfig;

use super::Cli;

const DEFAULT_LOG_FILE: &str = "snippets.log";

/// Effective configuration after merging CLI flags and the config file
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
    pub log_file: PathBuf,
}

/// Configuration file structure
#[derive(Debug, Deserialize)]
struct ConfigFile {
    connection: Option<ConnectionSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Deserialize)]
struct ConnectionSection {
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoggingSection {
    file: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration with precedence: CLI flags > config file
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = Self::load_from_file(cli.config.as_ref())?;
        let connection = file_config.as_ref().and_then(|f| f.connection.as_ref());
        let logging = file_config.as_ref().and_then(|f| f.logging.as_ref());

        Ok(Self {
            host: cli
                .host
                .clone()
                .or_else(|| connection.and_then(|c| c.host.clone())),
            port: cli.port.or_else(|| connection.and_then(|c| c.port)),
            user: cli
                .user
                .clone()
                .or_else(|| connection.and_then(|c| c.user.clone())),
            // The password never travels on the command line
            password: connection.and_then(|c| c.password.clone()),
            url: cli
                .url
                .clone()
                .or_else(|| connection.and_then(|c| c.url.clone())),
            log_file: cli
                .log_file
                .clone()
                .or_else(|| logging.and_then(|l| l.file.clone()))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        })
    }

    /// Build the store configuration for the database named on the
    /// command line.
    pub fn store_config(&self, database: &str) -> StoreConfig {
        let mut config = StoreConfig::new(database);
        config.host = self.host.clone();
        config.port = self.port;
        config.user = self.user.clone();
        config.password = self.password.clone();
        config.url = self.url.clone();
        config
    }

    /// Print the effective configuration without touching the database
    pub fn print(&self) {
        let or_default = |v: &Option<String>| match v {
            Some(v) => v.clone(),
            None => "(driver default)".to_string(),
        };
        println!("Host: {}", or_default(&self.host));
        println!(
            "Port: {}",
            self.port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "(driver default)".to_string())
        );
        println!("User: {}", or_default(&self.user));
        println!(
            "Password: {}",
            if self.password.is_some() {
                "(set)"
            } else {
                "(none)"
            }
        );
        println!("URL: {}", or_default(&self.url));
        println!("Log file: {}", self.log_file.display());
    }

    fn load_from_file(path: Option<&PathBuf>) -> Result<Option<ConfigFile>> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => {
                // Try default location
                let default = Self::default_config_path();
                if !default.exists() {
                    return Ok(None);
                }
                default
            }
        };

        if !config_path.exists() {
            // Explicitly specified path must exist
            return Err(anyhow!("Config file not found: {:?}", config_path));
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow!("Invalid config file {:?}: {}", config_path, e))?;
        Ok(Some(config))
    }

    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snippets")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_load_from_cli_args() {
        let cli = parse(&[
            "snippets",
            "--host",
            "db.internal",
            "--port",
            "5433",
            "--user",
            "alice",
            "get",
            "prod",
            "notes",
            "greeting",
        ]);

        let config = CliConfig::load(&cli).unwrap();
        assert_eq!(config.host, Some("db.internal".to_string()));
        assert_eq!(config.port, Some(5433));
        assert_eq!(config.user, Some("alice".to_string()));
        assert_eq!(config.password, None);
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_load_from_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[connection]
host = "db.internal"
port = 5433
user = "alice"
password = "hunter2"

[logging]
file = "/var/log/snippets.log"
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let cli = parse(&["snippets", "--config", path, "get", "prod", "notes", "greeting"]);

        let config = CliConfig::load(&cli).unwrap();
        assert_eq!(config.host, Some("db.internal".to_string()));
        assert_eq!(config.port, Some(5433));
        assert_eq!(config.user, Some("alice".to_string()));
        assert_eq!(config.password, Some("hunter2".to_string()));
        assert_eq!(config.log_file, PathBuf::from("/var/log/snippets.log"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[connection]
host = "file-host"
user = "file-user"
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let cli = parse(&[
            "snippets",
            "--config",
            path,
            "--host",
            "cli-host",
            "get",
            "prod",
            "notes",
            "greeting",
        ]);

        let config = CliConfig::load(&cli).unwrap();
        assert_eq!(config.host, Some("cli-host".to_string()));
        // Fields the CLI left alone still come from the file
        assert_eq!(config.user, Some("file-user".to_string()));
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let cli = parse(&[
            "snippets",
            "--config",
            "/nonexistent/snippets.toml",
            "get",
            "prod",
            "notes",
            "greeting",
        ]);

        let result = CliConfig::load(&cli);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Config file not found"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not [valid toml").unwrap();

        let path = file.path().to_str().unwrap();
        let cli = parse(&["snippets", "--config", path, "get", "prod", "notes", "greeting"]);

        let result = CliConfig::load(&cli);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid config file"));
    }

    #[test]
    fn test_store_config_mapping() {
        let cli = parse(&[
            "snippets",
            "--url",
            "postgres://db.example/ignored",
            "get",
            "prod",
            "notes",
            "greeting",
        ]);

        let config = CliConfig::load(&cli).unwrap();
        let store_config = config.store_config("prod");
        assert_eq!(store_config.database, "prod");
        assert_eq!(
            store_config.url,
            Some("postgres://db.example/ignored".to_string())
        );
    }
}
