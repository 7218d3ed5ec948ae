//! SQLite-backed catalog store.
//!
//! Songs live in a single `songs` table; the stored order (newest rowid
//! first) mirrors the head-insertion order of the other backends. The
//! schema carries a `PRAGMA user_version` stamp so future migrations can
//! detect what they are upgrading from.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use super::trait_def::{CatalogStore, StorageInfo};
use crate::catalog::Song;

const SCHEMA_VERSION: i64 = 1;

const CREATE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS songs (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    artist      TEXT NOT NULL,
    album       TEXT,
    genre       TEXT,
    year        INTEGER,
    duration    TEXT,
    cover_image TEXT,
    lyrics      TEXT,
    audio_file  TEXT,
    play_count  INTEGER NOT NULL DEFAULT 0,
    date_added  TEXT NOT NULL,
    updated_at  TEXT
);
";

const SONG_COLUMNS: &str =
    "id, title, artist, album, genre, year, duration, cover_image, lyrics, audio_file, \
     play_count, date_added, updated_at";

pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

fn init_schema(conn: &Connection) -> Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }
    info!("Creating catalog db schema at version {}", SCHEMA_VERSION);
    conn.execute_batch(CREATE_SCHEMA)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

fn parse_timestamp(raw: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

fn song_from_row(row: &Row) -> rusqlite::Result<Song> {
    let date_added: String = row.get(11)?;
    let updated_at: Option<String> = row.get(12)?;
    Ok(Song {
        id: row.get(0)?,
        title: row.get(1)?,
        artist: row.get(2)?,
        album: row.get(3)?,
        genre: row.get(4)?,
        year: row.get(5)?,
        duration: row.get(6)?,
        cover_image: row.get(7)?,
        lyrics: row.get(8)?,
        audio_file: row.get(9)?,
        play_count: row.get::<_, i64>(10)?.max(0) as u64,
        date_added: parse_timestamp(&date_added, 11)?,
        updated_at: match updated_at {
            Some(raw) => Some(parse_timestamp(&raw, 12)?),
            None => None,
        },
    })
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open_with_flags(
            &path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open catalog database {:?}", path))?;

        init_schema(&conn)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM songs", [], |r| r.get(0))?;
        info!("Opened SQLite catalog at {:?}: {} songs", path, count);

        Ok(SqliteStore {
            conn: Mutex::new(conn),
            path,
        })
    }

    fn insert_row(conn: &Connection, song: &Song) -> Result<()> {
        conn.execute(
            "INSERT INTO songs (id, title, artist, album, genre, year, duration, cover_image, \
             lyrics, audio_file, play_count, date_added, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                song.id,
                song.title,
                song.artist,
                song.album,
                song.genre,
                song.year,
                song.duration,
                song.cover_image,
                song.lyrics,
                song.audio_file,
                song.play_count as i64,
                song.date_added.to_rfc3339(),
                song.updated_at.map(|t| t.to_rfc3339()),
            ],
        )
        .context("Failed to insert song")?;
        Ok(())
    }
}

impl CatalogStore for SqliteStore {
    fn all_songs(&self) -> Result<Vec<Song>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SONG_COLUMNS} FROM songs ORDER BY rowid DESC"
        ))?;
        let songs = stmt
            .query_map([], song_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(songs)
    }

    fn get_song(&self, id: &str) -> Result<Option<Song>> {
        let conn = self.conn.lock().unwrap();
        let song = conn
            .query_row(
                &format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?1"),
                params![id],
                song_from_row,
            )
            .optional()?;
        Ok(song)
    }

    fn insert_song(&self, song: Song) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        Self::insert_row(&conn, &song)
    }

    fn update_song(&self, song: &Song) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE songs SET title = ?2, artist = ?3, album = ?4, genre = ?5, year = ?6, \
             duration = ?7, cover_image = ?8, lyrics = ?9, audio_file = ?10, play_count = ?11, \
             date_added = ?12, updated_at = ?13 WHERE id = ?1",
            params![
                song.id,
                song.title,
                song.artist,
                song.album,
                song.genre,
                song.year,
                song.duration,
                song.cover_image,
                song.lyrics,
                song.audio_file,
                song.play_count as i64,
                song.date_added.to_rfc3339(),
                song.updated_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete_song(&self, id: &str) -> Result<Option<Song>> {
        let conn = self.conn.lock().unwrap();
        let song = conn
            .query_row(
                &format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?1"),
                params![id],
                song_from_row,
            )
            .optional()?;
        if song.is_some() {
            conn.execute("DELETE FROM songs WHERE id = ?1", params![id])?;
        }
        Ok(song)
    }

    fn increment_play_count(&self, id: &str) -> Result<Option<u64>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE songs SET play_count = play_count + 1 WHERE id = ?1",
            params![id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        let count: i64 = conn.query_row(
            "SELECT play_count FROM songs WHERE id = ?1",
            params![id],
            |r| r.get(0),
        )?;
        Ok(Some(count.max(0) as u64))
    }

    fn replace_all(&self, songs: Vec<Song>) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM songs", [])?;
        // Insert in reverse so the head of the slice ends up with the
        // highest rowid, i.e. first in the newest-first scan.
        for song in songs.iter().rev() {
            Self::insert_row(&tx, song)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn songs_count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM songs", [], |r| r.get(0))?;
        Ok(count.max(0) as usize)
    }

    fn storage_info(&self) -> Result<StorageInfo> {
        let size_bytes = std::fs::metadata(&self.path).map(|m| m.len()).ok();
        Ok(StorageInfo {
            backend: "sqlite",
            songs_in_storage: self.songs_count()?,
            path: Some(self.path.display().to_string()),
            size_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed::seed_songs;
    use tempfile::TempDir;

    fn open_seeded(dir: &TempDir) -> SqliteStore {
        let store = SqliteStore::open(dir.path().join("catalog.db")).unwrap();
        store.replace_all(seed_songs()).unwrap();
        store
    }

    #[test]
    fn schema_init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.db");
        {
            let _store = SqliteStore::open(&path).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.songs_count().unwrap(), 0);
    }

    #[test]
    fn replace_all_preserves_newest_first_order() {
        let dir = TempDir::new().unwrap();
        let store = open_seeded(&dir);
        let all = store.all_songs().unwrap();
        let expected: Vec<String> = seed_songs().iter().map(|s| s.id.clone()).collect();
        let actual: Vec<String> = all.iter().map(|s| s.id.clone()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn insert_appears_at_head() {
        let dir = TempDir::new().unwrap();
        let store = open_seeded(&dir);
        let mut song = seed_songs()[0].clone();
        song.id = "fresh".to_string();
        song.title = "Fresh".to_string();
        store.insert_song(song).unwrap();
        assert_eq!(store.all_songs().unwrap()[0].id, "fresh");
    }

    #[test]
    fn round_trips_timestamps_and_optionals() {
        let dir = TempDir::new().unwrap();
        let store = open_seeded(&dir);
        let mut song = store.get_song("seed-1").unwrap().unwrap();
        assert_eq!(song, seed_songs()[0]);

        song.album = None;
        song.updated_at = Some(Utc::now());
        assert!(store.update_song(&song).unwrap());
        let fetched = store.get_song("seed-1").unwrap().unwrap();
        assert_eq!(fetched.album, None);
        assert_eq!(
            fetched.updated_at.map(|t| t.timestamp()),
            song.updated_at.map(|t| t.timestamp())
        );
    }

    #[test]
    fn delete_and_increment_behave_like_memory_store() {
        let dir = TempDir::new().unwrap();
        let store = open_seeded(&dir);

        let deleted = store.delete_song("seed-2").unwrap().unwrap();
        assert_eq!(deleted.title, "Yene Konjo");
        assert!(store.delete_song("seed-2").unwrap().is_none());

        let before = seed_songs()[0].play_count;
        assert_eq!(
            store.increment_play_count("seed-1").unwrap(),
            Some(before + 1)
        );
        assert!(store.increment_play_count("missing").unwrap().is_none());
    }

    #[test]
    fn mutations_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.replace_all(seed_songs()).unwrap();
            store.delete_song("seed-12").unwrap();
        }
        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.songs_count().unwrap(), 11);
        assert!(reopened.get_song("seed-12").unwrap().is_none());
    }
}
