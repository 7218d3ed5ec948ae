//! The song catalog domain: entities, the query engine (filter, sort,
//! pagination), and the resource operations shared by every storage
//! backend.

mod filter;
mod page;
pub mod seed;
mod service;
mod song;
mod sort;

pub use filter::SongFilter;
pub use page::{paginate, PageMeta, PageParams, DEFAULT_LIMIT};
pub use service::{CatalogService, CatalogStats, GenreCount, PlayCountUpdate, SongListing};
pub use song::{Song, SongDraft};
pub use sort::{sort_songs, SortKey, SortOrder};

/// Error taxonomy for catalog operations. The server layer maps each
/// variant to an HTTP status and the uniform error envelope.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Missing or invalid required fields (400).
    #[error("{0}")]
    Validation(String),

    /// Unknown song id (404).
    #[error("{0}")]
    NotFound(String),

    /// Duplicate title+artist pair (409).
    #[error("{0}")]
    Conflict(String),

    /// Unexpected storage or runtime failure (500, sanitized).
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
