//! Deterministic seed data for fresh deployments and the admin reset
//! endpoint.
//!
//! The set is fixed so that tests and repeated resets always observe the
//! same catalog: 12 songs, newest first, ids `seed-1` through `seed-12`.

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::song::Song;
use crate::user::{UserProfile, UserStats};

const TITLES: [&str; 12] = [
    "Tizita",
    "Yene Konjo",
    "New Day",
    "Addis Groove",
    "Sheger",
    "Ethio Jazz Fusion",
    "Modern Habesha",
    "Digital Ethiopia",
    "Bahir Dar Blues",
    "Gondar Nights",
    "Song 11",
    "Song 12",
];

const ARTISTS: [&str; 12] = [
    "Mahmoud Ahmed",
    "Aster Aweke",
    "Teddy Afro",
    "Mulatu Astatke",
    "Gigi",
    "Tilahun Gessesse",
    "Ephrem Tamiru",
    "Betty G",
    "Dawit Tsige",
    "Neway Debebe",
    "Artist 11",
    "Artist 12",
];

const ALBUMS: [&str; 12] = [
    "Soul of Addis",
    "Hagere",
    "Hope",
    "Ethio Jazz",
    "Gold & Wax",
    "Classic Collection",
    "New Generation",
    "Digital Roots",
    "Lake Side Sessions",
    "Royal Sessions",
    "Album 11",
    "Album 12",
];

const GENRES: [&str; 12] = [
    "pop", "jazz", "pop", "jazz", "rock", "jazz", "hiphop", "pop", "electronic", "classical",
    "rock", "pop",
];

const YEARS: [i32; 12] = [
    1974, 1999, 2008, 1972, 2005, 2015, 2018, 2020, 1987, 1992, 2011, 2003,
];

const DURATIONS: [&str; 12] = [
    "4:12", "3:45", "3:58", "5:02", "4:30", "6:15", "3:21", "4:05", "5:47", "4:44", "3:33", "4:01",
];

const PLAY_COUNTS: [u64; 12] = [120, 45, 310, 80, 12, 540, 0, 23, 77, 9, 150, 64];

fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// The seed catalog, newest first.
pub fn seed_songs() -> Vec<Song> {
    (0..12)
        .map(|i| Song {
            id: format!("seed-{}", i + 1),
            title: TITLES[i].to_string(),
            artist: ARTISTS[i].to_string(),
            album: Some(ALBUMS[i].to_string()),
            genre: Some(GENRES[i].to_string()),
            year: Some(YEARS[i]),
            duration: Some(DURATIONS[i].to_string()),
            cover_image: Some(format!("https://picsum.photos/300/300?random={}", i + 1)),
            lyrics: None,
            audio_file: None,
            play_count: PLAY_COUNTS[i],
            date_added: base_date() - Duration::days(i as i64),
            updated_at: None,
        })
        .collect()
}

/// The singleton user profile served by `GET /api/user`.
pub fn seed_user() -> UserProfile {
    UserProfile {
        id: 1,
        name: "Music Lover".to_string(),
        email: "user@addismusic.com".to_string(),
        role: "Music Enthusiast".to_string(),
        location: "Addis Ababa, Ethiopia".to_string(),
        bio: "Passionate about Ethiopian music and discovering new artists".to_string(),
        avatar: "https://picsum.photos/150/150?random=user".to_string(),
        join_date: Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap(),
        favorite_genres: vec![
            "jazz".to_string(),
            "pop".to_string(),
            "traditional".to_string(),
        ],
        stats: UserStats {
            total_songs_added: 15,
            total_favorites: 8,
            total_plays: 1250,
            member_since: "2023-01-15".to_string(),
        },
    }
}
