//! Catalog resource operations, written once against the `CatalogStore`
//! trait so every storage backend shares the same filter, sort, pagination
//! and duplicate-detection behavior.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use super::filter::SongFilter;
use super::page::{paginate, PageMeta, PageParams};
use super::seed::seed_songs;
use super::song::{Song, SongDraft};
use super::sort::{sort_songs, SortKey, SortOrder};
use super::CatalogError;
use crate::catalog_store::{CatalogStore, StorageInfo};
use crate::user::{UserProfile, UserStats};

/// One page of the filtered, sorted catalog.
#[derive(Debug, Serialize)]
pub struct SongListing {
    pub songs: Vec<Song>,
    pub pagination: PageMeta,
}

/// Payload returned by the play-increment operation.
#[derive(Debug, Serialize)]
pub struct PlayCountUpdate {
    pub song_id: String,
    pub play_count: u64,
}

/// Aggregate view computed on demand; never persisted.
#[derive(Debug, Serialize)]
pub struct CatalogStats {
    pub total_songs: usize,
    pub total_artists: usize,
    pub popular_genres: Vec<GenreCount>,
    pub total_plays: u64,
    pub newest_song: Option<String>,
    pub user_stats: UserStats,
}

/// Histogram entry, sorted descending by count then by genre name.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        CatalogService { store }
    }

    /// Filter, sort and paginate the catalog.
    pub fn list(
        &self,
        filter: &SongFilter,
        key: SortKey,
        order: SortOrder,
        page: PageParams,
    ) -> Result<SongListing, CatalogError> {
        let mut songs: Vec<Song> = self
            .store
            .all_songs()?
            .into_iter()
            .filter(|s| filter.matches(s))
            .collect();
        sort_songs(&mut songs, key, order);
        let (songs, pagination) = paginate(songs, page);
        Ok(SongListing { songs, pagination })
    }

    /// Unpaginated advanced search, store order preserved.
    pub fn search(&self, filter: &SongFilter) -> Result<Vec<Song>, CatalogError> {
        Ok(self
            .store
            .all_songs()?
            .into_iter()
            .filter(|s| filter.matches(s))
            .collect())
    }

    pub fn get(&self, id: &str) -> Result<Song, CatalogError> {
        self.store
            .get_song(id)?
            .ok_or_else(|| CatalogError::NotFound("Song not found".to_string()))
    }

    /// Validates, rejects case-insensitive `(title, artist)` duplicates and
    /// inserts at the head so the newest song comes first.
    pub fn create(&self, draft: SongDraft) -> Result<Song, CatalogError> {
        let (title, artist) = draft.require_title_and_artist()?;
        if self.has_duplicate(&title, &artist, None)? {
            return Err(CatalogError::Conflict(
                "A song with this title and artist already exists".to_string(),
            ));
        }
        let song = draft.into_song(Uuid::new_v4().to_string(), Utc::now())?;
        self.store.insert_song(song.clone())?;
        Ok(song)
    }

    /// Merges the provided fields over the stored record, preserving `id`
    /// and `date_added` and stamping `updated_at`.
    pub fn update(&self, id: &str, draft: SongDraft) -> Result<Song, CatalogError> {
        let existing = self.get(id)?;
        let updated = draft.apply_to(&existing, Utc::now())?;
        if self.has_duplicate(&updated.title, &updated.artist, Some(id))? {
            return Err(CatalogError::Conflict(
                "A song with this title and artist already exists".to_string(),
            ));
        }
        if !self.store.update_song(&updated)? {
            return Err(CatalogError::NotFound("Song not found".to_string()));
        }
        Ok(updated)
    }

    /// Removes the song, returning the deleted record for the confirmation
    /// message.
    pub fn delete(&self, id: &str) -> Result<Song, CatalogError> {
        self.store
            .delete_song(id)?
            .ok_or_else(|| CatalogError::NotFound("Song not found".to_string()))
    }

    pub fn increment_play_count(&self, id: &str) -> Result<PlayCountUpdate, CatalogError> {
        let play_count = self
            .store
            .increment_play_count(id)?
            .ok_or_else(|| CatalogError::NotFound("Song not found".to_string()))?;
        Ok(PlayCountUpdate {
            song_id: id.to_string(),
            play_count,
        })
    }

    /// Distinct non-empty genres in the live data, sorted alphabetically.
    pub fn genres(&self) -> Result<Vec<String>, CatalogError> {
        let mut genres: Vec<String> = self
            .store
            .all_songs()?
            .into_iter()
            .filter_map(|s| s.genre)
            .map(|g| g.to_lowercase())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        genres.sort();
        Ok(genres)
    }

    /// Computes the aggregate view. Read-only; tolerates an empty catalog.
    pub fn stats(&self, user: &UserProfile) -> Result<CatalogStats, CatalogError> {
        let songs = self.store.all_songs()?;

        let artists: HashSet<&str> = songs.iter().map(|s| s.artist.as_str()).collect();
        let total_plays: u64 = songs.iter().map(|s| s.play_count).sum();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for genre in songs.iter().filter_map(|s| s.genre.as_deref()) {
            *counts.entry(genre).or_insert(0) += 1;
        }
        let mut popular_genres: Vec<GenreCount> = counts
            .into_iter()
            .map(|(genre, count)| GenreCount {
                genre: genre.to_string(),
                count,
            })
            .collect();
        popular_genres.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));

        let newest_song = songs
            .iter()
            .max_by_key(|s| s.date_added)
            .map(|s| s.title.clone());

        Ok(CatalogStats {
            total_songs: songs.len(),
            total_artists: artists.len(),
            popular_genres,
            total_plays,
            newest_song,
            user_stats: user.stats.clone(),
        })
    }

    /// Replaces the collection with the seed set; returns the new count.
    pub fn reset(&self) -> Result<usize, CatalogError> {
        let songs = seed_songs();
        let count = songs.len();
        self.store.replace_all(songs)?;
        Ok(count)
    }

    pub fn storage_info(&self) -> Result<StorageInfo, CatalogError> {
        Ok(self.store.storage_info()?)
    }

    /// Case-insensitive `(title, artist)` collision scan, optionally
    /// excluding the record being updated. O(n), acceptable at catalog
    /// scale.
    fn has_duplicate(
        &self,
        title: &str,
        artist: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, CatalogError> {
        let title = title.to_lowercase();
        let artist = artist.to_lowercase();
        Ok(self.store.all_songs()?.iter().any(|s| {
            exclude_id != Some(s.id.as_str())
                && s.title.to_lowercase() == title
                && s.artist.to_lowercase() == artist
        }))
    }
}
