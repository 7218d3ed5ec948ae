//! In-memory catalog store backed by a vector.

use std::sync::Mutex;

use anyhow::Result;

use super::trait_def::{CatalogStore, StorageInfo};
use crate::catalog::Song;

/// Volatile store; the collection lives for the process lifetime only.
/// The mutex serializes individual operations; multi-step sequences in
/// the service are not transactional.
pub struct MemoryStore {
    songs: Mutex<Vec<Song>>,
}

impl MemoryStore {
    pub fn new(songs: Vec<Song>) -> Self {
        MemoryStore {
            songs: Mutex::new(songs),
        }
    }
}

impl CatalogStore for MemoryStore {
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
        self.songs.lock().unwrap().insert(0, song);
        Ok(())
    }

    fn update_song(&self, song: &Song) -> Result<bool> {
        let mut songs = self.songs.lock().unwrap();
        match songs.iter_mut().find(|s| s.id == song.id) {
            Some(slot) => {
                *slot = song.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_song(&self, id: &str) -> Result<Option<Song>> {
        let mut songs = self.songs.lock().unwrap();
        match songs.iter().position(|s| s.id == id) {
            Some(index) => Ok(Some(songs.remove(index))),
            None => Ok(None),
        }
    }

    fn increment_play_count(&self, id: &str) -> Result<Option<u64>> {
        let mut songs = self.songs.lock().unwrap();
        Ok(songs.iter_mut().find(|s| s.id == id).map(|s| {
            s.play_count += 1;
            s.play_count
        }))
    }

    fn replace_all(&self, songs: Vec<Song>) -> Result<()> {
        *self.songs.lock().unwrap() = songs;
        Ok(())
    }

    fn songs_count(&self) -> Result<usize> {
        Ok(self.songs.lock().unwrap().len())
    }

    fn storage_info(&self) -> Result<StorageInfo> {
        Ok(StorageInfo {
            backend: "memory",
            songs_in_storage: self.songs_count()?,
            path: None,
            size_bytes: None,
        })
    }
}
