//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own catalog store.

use super::constants::*;
use addis_catalog_server::catalog::seed::{seed_songs, seed_user};
use addis_catalog_server::catalog_store::{CatalogStore, JsonFileStore, MemoryStore, SqliteStore};
use addis_catalog_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with an isolated catalog store
///
/// When dropped, the server gracefully shuts down and temp resources are
/// cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    // Private fields - keep resources alive until drop
    _temp_dir: Option<TempDir>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server backed by a seeded in-memory store
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new(seed_songs()));
        Self::spawn_with(store, None).await
    }

    /// Spawns a server backed by an empty in-memory store
    pub async fn spawn_empty() -> Self {
        let store = Arc::new(MemoryStore::new(Vec::new()));
        Self::spawn_with(store, None).await
    }

    /// Spawns a server backed by a seeded JSON file store in a temp dir
    pub async fn spawn_json() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(
            JsonFileStore::open(temp_dir.path().join("songs.json"))
                .expect("Failed to open JSON store"),
        );
        store
            .replace_all(seed_songs())
            .expect("Failed to seed JSON store");
        Self::spawn_with(store, Some(temp_dir)).await
    }

    /// Spawns a server backed by a seeded SQLite store in a temp dir
    pub async fn spawn_sqlite() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(
            SqliteStore::open(temp_dir.path().join("catalog.db"))
                .expect("Failed to open SQLite store"),
        );
        store
            .replace_all(seed_songs())
            .expect("Failed to seed SQLite store");
        Self::spawn_with(store, Some(temp_dir)).await
    }

    async fn spawn_with(store: Arc<dyn CatalogStore>, temp_dir: Option<TempDir>) -> Self {
        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: None,
        };

        let app = make_app(config, store, seed_user());

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            _temp_dir: temp_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => {
                    return;
                }
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
        // TempDir will be cleaned up automatically
    }
}
