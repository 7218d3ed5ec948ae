mod json_store;
mod memory_store;
mod sqlite_store;
mod trait_def;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
pub use trait_def::{CatalogStore, StorageInfo};
