use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use addis_catalog_server::catalog::seed::{seed_songs, seed_user};
use addis_catalog_server::catalog_store::{CatalogStore, JsonFileStore, MemoryStore, SqliteStore};
use addis_catalog_server::config::{AppConfig, CliConfig, FileConfig, StorageBackend};
use addis_catalog_server::server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Storage backend for the song catalog.
    #[clap(long, value_enum, default_value_t = StorageBackend::Memory)]
    pub storage: StorageBackend,

    /// Directory for file-backed storage. Required for the json and
    /// sqlite backends.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// Path to an optional TOML config file. File values override CLI
    /// arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };

    let cli_config = CliConfig {
        storage: cli_args.storage,
        db_dir: cli_args.db_dir,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        frontend_dir_path: cli_args.frontend_dir_path,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let store: Arc<dyn CatalogStore> = match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory song store");
            Arc::new(MemoryStore::new(Vec::new()))
        }
        StorageBackend::Json => {
            let path = config
                .json_db_path()
                .context("db_dir is not set for the json backend")?;
            info!("Opening JSON song store at {:?}...", path);
            Arc::new(JsonFileStore::open(&path)?)
        }
        StorageBackend::Sqlite => {
            let path = config
                .sqlite_db_path()
                .context("db_dir is not set for the sqlite backend")?;
            info!("Opening SQLite song store at {:?}...", path);
            Arc::new(SqliteStore::open(&path)?)
        }
    };

    if store.songs_count()? == 0 {
        info!("Empty catalog, installing seed data");
        store.replace_all(seed_songs())?;
    }

    info!("Ready to serve at port {}!", config.port);
    run_server(
        store,
        seed_user(),
        config.logging_level,
        config.port,
        config.frontend_dir_path,
    )
    .await
}
