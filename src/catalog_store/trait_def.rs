//! CatalogStore trait definition.
//!
//! The resource layer is written once against this trait; adapters exist
//! for an in-memory vector, an on-disk JSON file and a SQLite database.
//! Implementations own their interior locking and keep songs in insertion
//! order, newest first, so head insertion matches the default
//! newest-first listing.

use anyhow::Result;
use serde::Serialize;

use crate::catalog::Song;

/// Trait for catalog storage backends.
pub trait CatalogStore: Send + Sync {
    /// Snapshot of every song, newest first.
    fn all_songs(&self) -> Result<Vec<Song>>;

    /// Exact id lookup.
    fn get_song(&self, id: &str) -> Result<Option<Song>>;

    /// Insert at the head of the collection.
    fn insert_song(&self, song: Song) -> Result<()>;

    /// Replace the stored record with the same id, keeping its position.
    /// Returns false if no record has that id.
    fn update_song(&self, song: &Song) -> Result<bool>;

    /// Remove a song, returning the deleted record if it existed.
    fn delete_song(&self, id: &str) -> Result<Option<Song>>;

    /// Bump a song's play count by one, returning the new value if the
    /// song exists.
    fn increment_play_count(&self, id: &str) -> Result<Option<u64>>;

    /// Drop the whole collection and install `songs` (newest first).
    fn replace_all(&self, songs: Vec<Song>) -> Result<()>;

    /// Number of songs currently stored.
    fn songs_count(&self) -> Result<usize>;

    /// Basic diagnostics for the admin storage-info endpoint.
    fn storage_info(&self) -> Result<StorageInfo>;
}

/// Storage diagnostics reported by `GET /api/admin/storage-info`.
#[derive(Debug, Clone, Serialize)]
pub struct StorageInfo {
    pub backend: &'static str,
    pub songs_in_storage: usize,
    pub path: Option<String>,
    pub size_bytes: Option<u64>,
}
