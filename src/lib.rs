//! AddisMusic Catalog Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod catalog_store;
pub mod config;
pub mod server;
pub mod user;

// Re-export commonly used types for convenience
pub use catalog::{CatalogError, CatalogService};
pub use catalog_store::{CatalogStore, JsonFileStore, MemoryStore, SqliteStore};
pub use server::{run_server, RequestsLoggingLevel};
