//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all catalog-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Sends the request and parses the JSON body, panicking on
    /// transport errors. Returns the status and the parsed body.
    pub async fn json_of(response: Response) -> (reqwest::StatusCode, serde_json::Value) {
        let status = response.status();
        let body = response.json().await.expect("Response body was not JSON");
        (status, body)
    }

    // ========================================================================
    // Song Endpoints
    // ========================================================================

    /// GET /api/songs with a raw query string (no leading '?')
    pub async fn get_songs(&self, query: &str) -> Response {
        let url = if query.is_empty() {
            format!("{}/api/songs", self.base_url)
        } else {
            format!("{}/api/songs?{}", self.base_url, query)
        };
        self.client
            .get(url)
            .send()
            .await
            .expect("Get songs request failed")
    }

    /// GET /api/songs/{id}
    pub async fn get_song(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/api/songs/{}", self.base_url, id))
            .send()
            .await
            .expect("Get song request failed")
    }

    /// POST /api/songs
    pub async fn create_song(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/api/songs", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Create song request failed")
    }

    /// PUT /api/songs/{id}
    pub async fn update_song(&self, id: &str, body: &serde_json::Value) -> Response {
        self.client
            .put(format!("{}/api/songs/{}", self.base_url, id))
            .json(body)
            .send()
            .await
            .expect("Update song request failed")
    }

    /// DELETE /api/songs/{id}
    pub async fn delete_song(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/api/songs/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete song request failed")
    }

    /// POST /api/songs/{id}/play
    pub async fn play_song(&self, id: &str) -> Response {
        self.client
            .post(format!("{}/api/songs/{}/play", self.base_url, id))
            .send()
            .await
            .expect("Play song request failed")
    }

    /// GET /api/songs/genres
    pub async fn get_genres(&self) -> Response {
        self.client
            .get(format!("{}/api/songs/genres", self.base_url))
            .send()
            .await
            .expect("Get genres request failed")
    }

    /// GET /api/songs/search with a raw query string (no leading '?')
    pub async fn search_songs(&self, query: &str) -> Response {
        self.client
            .get(format!("{}/api/songs/search?{}", self.base_url, query))
            .send()
            .await
            .expect("Search songs request failed")
    }

    // ========================================================================
    // User and Stats Endpoints
    // ========================================================================

    /// GET /api/user
    pub async fn get_user(&self) -> Response {
        self.client
            .get(format!("{}/api/user", self.base_url))
            .send()
            .await
            .expect("Get user request failed")
    }

    /// GET /api/stats
    pub async fn get_stats(&self) -> Response {
        self.client
            .get(format!("{}/api/stats", self.base_url))
            .send()
            .await
            .expect("Get stats request failed")
    }

    // ========================================================================
    // Admin Endpoints
    // ========================================================================

    /// POST /api/admin/reset
    pub async fn admin_reset(&self) -> Response {
        self.client
            .post(format!("{}/api/admin/reset", self.base_url))
            .send()
            .await
            .expect("Admin reset request failed")
    }

    /// GET /api/admin/storage-info
    pub async fn admin_storage_info(&self) -> Response {
        self.client
            .get(format!("{}/api/admin/storage-info", self.base_url))
            .send()
            .await
            .expect("Admin storage info request failed")
    }

    // ========================================================================
    // Health Check / System Endpoints
    // ========================================================================

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Get home request failed")
    }
}
