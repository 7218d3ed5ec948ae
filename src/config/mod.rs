mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// Which `CatalogStore` adapter backs the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StorageBackend {
    /// In-memory vector; contents are lost on shutdown.
    #[default]
    Memory,
    /// Single JSON file under `db_dir`.
    Json,
    /// SQLite database under `db_dir`.
    Sqlite,
}

/// CLI arguments that participate in config resolution. Mirrors the
/// fields a TOML config file can override.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub storage: StorageBackend,
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file
    /// config. TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let storage = file
            .storage
            .as_deref()
            .map(parse_storage_backend)
            .transpose()?
            .unwrap_or(cli.storage);

        let db_dir = file.db_dir.map(PathBuf::from).or_else(|| cli.db_dir.clone());

        // File-backed stores need a directory to live in.
        if storage != StorageBackend::Memory {
            match &db_dir {
                None => bail!(
                    "db_dir must be specified via --db-dir or in the config file for the {:?} backend",
                    storage
                ),
                Some(dir) => {
                    if !dir.exists() {
                        bail!("Database directory does not exist: {:?}", dir);
                    }
                    if !dir.is_dir() {
                        bail!("db_dir is not a directory: {:?}", dir);
                    }
                }
            }
        }

        let port = file.port.unwrap_or(cli.port);
        let logging_level = file
            .logging_level
            .as_deref()
            .and_then(parse_logging_level)
            .unwrap_or_else(|| cli.logging_level.clone());
        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        Ok(AppConfig {
            storage,
            db_dir,
            port,
            logging_level,
            frontend_dir_path,
        })
    }

    pub fn sqlite_db_path(&self) -> Option<PathBuf> {
        self.db_dir.as_ref().map(|d| d.join("catalog.db"))
    }

    pub fn json_db_path(&self) -> Option<PathBuf> {
        self.db_dir.as_ref().map(|d| d.join("songs.json"))
    }
}

fn parse_storage_backend(s: &str) -> Result<StorageBackend> {
    StorageBackend::from_str(s, true)
        .map_err(|_| anyhow::anyhow!("Unknown storage backend in config file: {}", s))
}

/// Parses a logging level string using clap's ValueEnum trait.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
