use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;
use crate::catalog::CatalogService;
use crate::user::UserProfile;

pub type SharedCatalog = Arc<CatalogService>;
pub type SharedUserProfile = Arc<UserProfile>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: SharedCatalog,
    pub user: SharedUserProfile,
}

impl FromRef<ServerState> for SharedCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for SharedUserProfile {
    fn from_ref(input: &ServerState) -> Self {
        input.user.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
