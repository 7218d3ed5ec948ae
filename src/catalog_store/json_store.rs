//! JSON-file catalog store.
//!
//! The whole collection lives in one file, `{ "songs": [...] }`, rewritten
//! after every mutation. Reads are served from the in-memory copy loaded
//! at open time; the file is the durable source of truth across restarts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::trait_def::{CatalogStore, StorageInfo};
use crate::catalog::Song;

#[derive(Default, Deserialize)]
struct FileContents {
    songs: Vec<Song>,
}

#[derive(Serialize)]
struct FileContentsRef<'a> {
    songs: &'a [Song],
}

pub struct JsonFileStore {
    path: PathBuf,
    songs: Mutex<Vec<Song>>,
}

impl JsonFileStore {
    /// Opens the store, loading the existing file if present. A missing
    /// file starts an empty catalog and is created on the first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let songs = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read catalog file {:?}", path))?;
            serde_json::from_str::<FileContents>(&raw)
                .with_context(|| format!("Failed to parse catalog file {:?}", path))?
                .songs
        } else {
            Vec::new()
        };

        info!("Opened JSON catalog at {:?}: {} songs", path, songs.len());
        Ok(JsonFileStore {
            path,
            songs: Mutex::new(songs),
        })
    }

    /// Writes a sibling temp file then renames it over the store, so a
    /// crash mid-write never leaves a truncated catalog behind.
    fn persist(&self, songs: &[Song]) -> Result<()> {
        let contents = serde_json::to_vec_pretty(&FileContentsRef { songs })?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write catalog file {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace catalog file {:?}", self.path))?;
        Ok(())
    }
}

impl CatalogStore for JsonFileStore {
    fn all_songs(&self) -> Result<Vec<Song>> {
        Ok(self.songs.lock().unwrap().clone())
    }

    fn get_song(&self, id: &str) -> Result<Option<Song>> {
        Ok(self
            .songs
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    fn insert_song(&self, song: Song) -> Result<()> {
        let mut songs = self.songs.lock().unwrap();
        songs.insert(0, song);
        self.persist(&songs)
    }

    fn update_song(&self, song: &Song) -> Result<bool> {
        let mut songs = self.songs.lock().unwrap();
        match songs.iter_mut().find(|s| s.id == song.id) {
            Some(slot) => {
                *slot = song.clone();
                self.persist(&songs)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_song(&self, id: &str) -> Result<Option<Song>> {
        let mut songs = self.songs.lock().unwrap();
        match songs.iter().position(|s| s.id == id) {
            Some(index) => {
                let removed = songs.remove(index);
                self.persist(&songs)?;
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }

    fn increment_play_count(&self, id: &str) -> Result<Option<u64>> {
        let mut songs = self.songs.lock().unwrap();
        let count = match songs.iter_mut().find(|s| s.id == id) {
            Some(song) => {
                song.play_count += 1;
                song.play_count
            }
            None => return Ok(None),
        };
        self.persist(&songs)?;
        Ok(Some(count))
    }

    fn replace_all(&self, new_songs: Vec<Song>) -> Result<()> {
        let mut songs = self.songs.lock().unwrap();
        *songs = new_songs;
        self.persist(&songs)
    }

    fn songs_count(&self) -> Result<usize> {
        Ok(self.songs.lock().unwrap().len())
    }

    fn storage_info(&self) -> Result<StorageInfo> {
        let size_bytes = fs::metadata(&self.path).map(|m| m.len()).ok();
        Ok(StorageInfo {
            backend: "json",
            songs_in_storage: self.songs_count()?,
            path: Some(self.path.display().to_string()),
            size_bytes,
        })
    }
}
