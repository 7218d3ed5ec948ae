//! Handlers for the `/api/admin` maintenance endpoints.

use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;

use super::envelope::success;
use super::state::{ServerState, SharedCatalog};
use crate::catalog::CatalogError;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/reset", post(reset))
        .route("/storage-info", get(storage_info))
}

async fn reset(State(catalog): State<SharedCatalog>) -> Result<Response, CatalogError> {
    let songs_count = catalog.reset()?;
    Ok(success(
        json!({
            "songs_count": songs_count,
            "message": "All data reset to initial state",
        }),
        "Database reset successfully",
    ))
}

async fn storage_info(State(catalog): State<SharedCatalog>) -> Result<Response, CatalogError> {
    let info = catalog.storage_info()?;
    Ok(success(info, "Storage information retrieved"))
}
