//! Singleton user profile served by `GET /api/user`.
//!
//! The profile is pre-seeded at startup and read-only through the public
//! API; its nested stats block is also embedded in the statistics view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
    pub bio: String,
    pub avatar: String,
    pub join_date: DateTime<Utc>,
    pub favorite_genres: Vec<String>,
    pub stats: UserStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_songs_added: u32,
    pub total_favorites: u32,
    pub total_plays: u64,
    pub member_since: String,
}
