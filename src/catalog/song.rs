//! Song entity and incoming request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CatalogError;

/// One track in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// UUID assigned at creation, immutable afterwards.
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    /// Display duration, e.g. "3:45".
    pub duration: Option<String>,
    pub cover_image: Option<String>,
    pub lyrics: Option<String>,
    pub audio_file: Option<String>,
    /// Mutated only by the play-increment operation.
    pub play_count: u64,
    /// Set once at creation, never mutated.
    pub date_added: DateTime<Utc>,
    /// Set on every update.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Incoming song fields for create and update requests.
///
/// Every field is optional at the serde level so that missing required
/// fields surface as a `Validation` error in the response envelope rather
/// than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SongDraft {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub duration: Option<String>,
    pub cover_image: Option<String>,
    pub lyrics: Option<String>,
    pub audio_file: Option<String>,
}

impl SongDraft {
    /// Validates the draft for creation: `title` and `artist` must be
    /// present and non-empty after trimming.
    pub fn require_title_and_artist(&self) -> Result<(String, String), CatalogError> {
        let title = self.title.as_deref().map(str::trim).unwrap_or_default();
        let artist = self.artist.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() || artist.is_empty() {
            return Err(CatalogError::Validation(
                "Title and artist are required".to_string(),
            ));
        }
        Ok((title.to_string(), artist.to_string()))
    }

    /// Builds a new catalog record from this draft.
    pub fn into_song(self, id: String, date_added: DateTime<Utc>) -> Result<Song, CatalogError> {
        let (title, artist) = self.require_title_and_artist()?;
        Ok(Song {
            id,
            title,
            artist,
            album: clean(self.album),
            genre: clean(self.genre),
            year: self.year,
            duration: clean(self.duration),
            cover_image: clean(self.cover_image),
            lyrics: clean(self.lyrics),
            audio_file: clean(self.audio_file),
            play_count: 0,
            date_added,
            updated_at: None,
        })
    }

    /// Merges the provided fields over `existing`, preserving `id`,
    /// `date_added` and `play_count`, and stamping `updated_at`.
    ///
    /// Required fields are validated only when present: an explicit empty
    /// title or artist is rejected, an absent one keeps the current value.
    pub fn apply_to(
        &self,
        existing: &Song,
        updated_at: DateTime<Utc>,
    ) -> Result<Song, CatalogError> {
        let mut song = existing.clone();
        if let Some(title) = &self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(CatalogError::Validation(
                    "Title and artist are required".to_string(),
                ));
            }
            song.title = title.to_string();
        }
        if let Some(artist) = &self.artist {
            let artist = artist.trim();
            if artist.is_empty() {
                return Err(CatalogError::Validation(
                    "Title and artist are required".to_string(),
                ));
            }
            song.artist = artist.to_string();
        }
        if self.album.is_some() {
            song.album = clean(self.album.clone());
        }
        if self.genre.is_some() {
            song.genre = clean(self.genre.clone());
        }
        if self.year.is_some() {
            song.year = self.year;
        }
        if self.duration.is_some() {
            song.duration = clean(self.duration.clone());
        }
        if self.cover_image.is_some() {
            song.cover_image = clean(self.cover_image.clone());
        }
        if self.lyrics.is_some() {
            song.lyrics = clean(self.lyrics.clone());
        }
        if self.audio_file.is_some() {
            song.audio_file = clean(self.audio_file.clone());
        }
        song.updated_at = Some(updated_at);
        Ok(song)
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
