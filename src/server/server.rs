use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tower_http::services::ServeDir;
use tracing::info;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::envelope::{error_response, success};
use super::state::*;
use super::{admin_routes, log_requests, song_routes, RequestsLoggingLevel, ServerConfig};
use crate::catalog::{CatalogError, CatalogService};
use crate::catalog_store::CatalogStore;
use crate::user::UserProfile;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
    pub backend: &'static str,
    pub songs: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> Result<Json<ServerStats>, CatalogError> {
    let info = state.catalog.storage_info()?;
    Ok(Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
        backend: info.backend,
        songs: info.songs_in_storage,
    }))
}

async fn get_user_profile(State(user): State<SharedUserProfile>) -> Response {
    success(user.as_ref(), "User profile retrieved successfully")
}

async fn get_stats(State(state): State<ServerState>) -> Result<Response, CatalogError> {
    let stats = state.catalog.stats(&state.user)?;
    Ok(success(stats, "Statistics retrieved successfully"))
}

async fn route_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

pub fn make_app(
    config: ServerConfig,
    store: Arc<dyn CatalogStore>,
    user: UserProfile,
) -> Router {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        catalog: Arc::new(CatalogService::new(store)),
        user: Arc::new(user),
    };

    let api_routes: Router = Router::new()
        .nest("/songs", song_routes::routes())
        .nest("/admin", admin_routes::routes())
        .route("/user", get(get_user_profile))
        .route("/stats", get(get_stats))
        .fallback(route_not_found)
        .with_state(state.clone());

    let home_router: Router = match &config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    store: Arc<dyn CatalogStore>,
    user: UserProfile,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
    };
    let app = make_app(config, store, user);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on 127.0.0.1:{}", port);

    Ok(axum::serve(listener, app).await?)
}
