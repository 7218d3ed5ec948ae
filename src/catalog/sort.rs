//! Sort comparator for song lists.

use std::cmp::Ordering;

use super::song::Song;

/// Sortable song fields. String fields compare case-insensitively with
/// missing values treated as empty; numeric and date fields compare by
/// underlying value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Artist,
    Album,
    Genre,
    Year,
    Duration,
    PlayCount,
    DateAdded,
}

impl SortKey {
    pub fn parse(name: &str) -> Option<SortKey> {
        match name.trim().to_lowercase().as_str() {
            "title" => Some(SortKey::Title),
            "artist" => Some(SortKey::Artist),
            "album" => Some(SortKey::Album),
            "genre" => Some(SortKey::Genre),
            "year" => Some(SortKey::Year),
            "duration" => Some(SortKey::Duration),
            "play_count" | "playcount" => Some(SortKey::PlayCount),
            "date_added" | "dateadded" => Some(SortKey::DateAdded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(name: &str) -> Option<SortOrder> {
        match name.trim().to_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Sorts the slice in place. `sort_by` is stable, so equal keys keep their
/// input order and repeated list calls paginate deterministically.
pub fn sort_songs(songs: &mut [Song], key: SortKey, order: SortOrder) {
    songs.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by_key(a: &Song, b: &Song, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => cmp_str(&a.title, &b.title),
        SortKey::Artist => cmp_str(&a.artist, &b.artist),
        SortKey::Album => cmp_opt_str(a.album.as_deref(), b.album.as_deref()),
        SortKey::Genre => cmp_opt_str(a.genre.as_deref(), b.genre.as_deref()),
        SortKey::Year => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
        SortKey::Duration => cmp_opt_str(a.duration.as_deref(), b.duration.as_deref()),
        SortKey::PlayCount => a.play_count.cmp(&b.play_count),
        SortKey::DateAdded => a.date_added.cmp(&b.date_added),
    }
}

fn cmp_str(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn cmp_opt_str(a: Option<&str>, b: Option<&str>) -> Ordering {
    cmp_str(a.unwrap_or(""), b.unwrap_or(""))
}
