//! Handlers for the `/api/songs` resource.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::envelope::{created, success};
use super::state::{ServerState, SharedCatalog};
use crate::catalog::{CatalogError, PageParams, SongDraft, SongFilter, SortKey, SortOrder};

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list_songs).post(create_song))
        .route("/genres", get(get_genres))
        .route("/search", get(search_songs))
        .route(
            "/{id}",
            get(get_song).put(update_song).delete(delete_song),
        )
        .route("/{id}/play", post(increment_play_count))
}

#[derive(Debug, Deserialize)]
pub struct ListSongsQuery {
    genre: Option<String>,
    search: Option<String>,
    artist: Option<String>,
    year: Option<String>,
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    sort_order: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchSongsQuery {
    q: Option<String>,
    genre: Option<String>,
    artist: Option<String>,
    year: Option<String>,
}

/// Sort selection. An absent or unknown `sortBy` falls back to the
/// newest-first default; an explicit `sortBy` without `sortOrder` is
/// ascending.
fn parse_sort(sort_by: Option<&str>, sort_order: Option<&str>) -> (SortKey, SortOrder) {
    match sort_by.and_then(SortKey::parse) {
        Some(key) => {
            let order = sort_order
                .and_then(SortOrder::parse)
                .unwrap_or(SortOrder::Asc);
            (key, order)
        }
        None => (SortKey::DateAdded, SortOrder::Desc),
    }
}

/// Query parameters arrive as strings; anything non-numeric is treated
/// as absent rather than rejected.
fn parse_year(year: Option<&str>) -> Option<i32> {
    year.and_then(|y| y.trim().parse().ok())
}

async fn list_songs(
    State(catalog): State<SharedCatalog>,
    Query(query): Query<ListSongsQuery>,
) -> Result<Response, CatalogError> {
    let filter = SongFilter::new(
        query.genre.as_deref(),
        query.search.as_deref(),
        query.artist.as_deref(),
        parse_year(query.year.as_deref()),
    );
    let (key, order) = parse_sort(query.sort_by.as_deref(), query.sort_order.as_deref());
    let page = PageParams::from_query(query.limit.as_deref(), query.offset.as_deref());

    let listing = catalog.list(&filter, key, order, page)?;
    let message = format!("Retrieved {} songs", listing.songs.len());
    Ok(success(listing, message))
}

async fn search_songs(
    State(catalog): State<SharedCatalog>,
    Query(query): Query<SearchSongsQuery>,
) -> Result<Response, CatalogError> {
    let filter = SongFilter::new(
        query.genre.as_deref(),
        query.q.as_deref(),
        query.artist.as_deref(),
        parse_year(query.year.as_deref()),
    );
    let songs = catalog.search(&filter)?;
    let message = format!("Found {} songs matching search criteria", songs.len());
    Ok(success(songs, message))
}

async fn get_song(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> Result<Response, CatalogError> {
    let song = catalog.get(&id)?;
    let message = format!("Retrieved song: {}", song.title);
    Ok(success(song, message))
}

async fn create_song(
    State(catalog): State<SharedCatalog>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Response, CatalogError> {
    let draft = parse_draft(payload)?;
    let song = catalog.create(draft)?;
    let message = format!(
        "Song \"{}\" by {} created successfully",
        song.title, song.artist
    );
    Ok(created(song, message))
}

async fn update_song(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Response, CatalogError> {
    let draft = parse_draft(payload)?;
    let song = catalog.update(&id, draft)?;
    let message = format!("Song \"{}\" updated successfully", song.title);
    Ok(success(song, message))
}

async fn delete_song(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> Result<Response, CatalogError> {
    let song = catalog.delete(&id)?;
    let message = format!(
        "Song \"{}\" by {} deleted successfully",
        song.title, song.artist
    );
    Ok(success(json!({ "deleted_song_id": song.id }), message))
}

async fn increment_play_count(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> Result<Response, CatalogError> {
    let song = catalog.get(&id)?;
    let update = catalog.increment_play_count(&id)?;
    let message = format!("Play count updated for \"{}\"", song.title);
    Ok(success(update, message))
}

async fn get_genres(State(catalog): State<SharedCatalog>) -> Result<Response, CatalogError> {
    let genres = catalog.genres()?;
    Ok(success(genres, "Available genres retrieved successfully"))
}

/// Turns a loosely-typed JSON body into a draft, reporting type
/// mismatches through the error envelope instead of axum's default
/// rejection.
fn parse_draft(payload: serde_json::Value) -> Result<SongDraft, CatalogError> {
    serde_json::from_value(payload)
        .map_err(|err| CatalogError::Validation(format!("Invalid song payload: {}", err)))
}
