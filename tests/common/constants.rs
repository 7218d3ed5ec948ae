//! Shared constants for end-to-end tests
//!
//! When the seed catalog changes, update only this file.

// ============================================================================
// Seed Catalog
// ============================================================================

/// Number of songs in the seed catalog
pub const SEED_SONGS_COUNT: usize = 12;

/// Id of the newest seed song
pub const SEED_SONG_1_ID: &str = "seed-1";

/// Title of the newest seed song
pub const SEED_SONG_1_TITLE: &str = "Tizita";

/// Artist of the newest seed song
pub const SEED_SONG_1_ARTIST: &str = "Mahmoud Ahmed";

/// Number of jazz songs in the seed catalog
pub const SEED_JAZZ_COUNT: usize = 3;

/// Sum of the seed catalog play counts
pub const SEED_TOTAL_PLAYS: u64 = 1430;

/// Name of the singleton user profile
pub const SEED_USER_NAME: &str = "Music Lover";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
