//! Filter predicate over song records.

use super::song::Song;

/// Filter constraints parsed from query parameters.
///
/// Constraints are ANDed together; within `search` the per-field matches
/// are ORed. Empty or whitespace-only values are treated as absent and do
/// not filter. Songs with a missing optional field never match on that
/// field.
#[derive(Debug, Clone, Default)]
pub struct SongFilter {
    genre: Option<String>,
    search: Option<String>,
    artist: Option<String>,
    year: Option<i32>,
}

impl SongFilter {
    pub fn new(
        genre: Option<&str>,
        search: Option<&str>,
        artist: Option<&str>,
        year: Option<i32>,
    ) -> Self {
        SongFilter {
            genre: normalize(genre),
            search: normalize(search),
            artist: normalize(artist),
            year,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.search.is_none() && self.artist.is_none() && self.year.is_none()
    }

    pub fn matches(&self, song: &Song) -> bool {
        if let Some(genre) = &self.genre {
            let hit = song
                .genre
                .as_deref()
                .is_some_and(|g| g.to_lowercase() == *genre);
            if !hit {
                return false;
            }
        }

        if let Some(term) = &self.search {
            let hit = contains(&song.title, term)
                || contains(&song.artist, term)
                || song.album.as_deref().is_some_and(|a| contains(a, term))
                || song.lyrics.as_deref().is_some_and(|l| contains(l, term));
            if !hit {
                return false;
            }
        }

        if let Some(artist) = &self.artist {
            if !contains(&song.artist, artist) {
                return false;
            }
        }

        if let Some(year) = self.year {
            if song.year != Some(year) {
                return false;
            }
        }

        true
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn contains(haystack: &str, needle_lowercase: &str) -> bool {
    haystack.to_lowercase().contains(needle_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn song(title: &str, artist: &str, album: Option<&str>, genre: Option<&str>) -> Song {
        Song {
            id: "s-1".to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.map(str::to_string),
            genre: genre.map(str::to_string),
            year: Some(2001),
            duration: None,
            cover_image: None,
            lyrics: None,
            audio_file: None,
            play_count: 0,
            date_added: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = SongFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&song("Tizita", "Mahmoud Ahmed", None, None)));
    }

    #[test]
    fn genre_is_exact_and_case_insensitive() {
        let filter = SongFilter::new(Some("Jazz"), None, None, None);
        assert!(filter.matches(&song("A", "X", None, Some("jazz"))));
        assert!(!filter.matches(&song("B", "Y", None, Some("jazz fusion"))));
        assert!(!filter.matches(&song("C", "Z", None, None)));
    }

    #[test]
    fn search_is_ored_across_fields() {
        let filter = SongFilter::new(None, Some("addis"), None, None);
        assert!(filter.matches(&song("Addis Groove", "X", None, None)));
        assert!(filter.matches(&song("A", "Addis Band", None, None)));
        assert!(filter.matches(&song("A", "X", Some("Soul of Addis"), None)));
        assert!(!filter.matches(&song("A", "X", Some("Hagere"), None)));
    }

    #[test]
    fn search_matches_lyrics() {
        let mut s = song("A", "X", None, None);
        s.lyrics = Some("konjo nesh".to_string());
        let filter = SongFilter::new(None, Some("KONJO"), None, None);
        assert!(filter.matches(&s));
    }

    #[test]
    fn missing_album_does_not_match_and_does_not_panic() {
        let filter = SongFilter::new(None, Some("hagere"), None, None);
        assert!(!filter.matches(&song("A", "X", None, None)));
    }

    #[test]
    fn artist_is_substring_match() {
        let filter = SongFilter::new(None, None, Some("aweke"), None);
        assert!(filter.matches(&song("A", "Aster Aweke", None, None)));
        assert!(!filter.matches(&song("A", "Gigi", None, None)));
    }

    #[test]
    fn year_is_exact_match() {
        let filter = SongFilter::new(None, None, None, Some(2001));
        assert!(filter.matches(&song("A", "X", None, None)));

        let other = SongFilter::new(None, None, None, Some(1999));
        assert!(!other.matches(&song("A", "X", None, None)));
    }

    #[test]
    fn constraints_are_anded() {
        let filter = SongFilter::new(Some("jazz"), Some("tizita"), None, None);
        assert!(filter.matches(&song("Tizita", "X", None, Some("jazz"))));
        assert!(!filter.matches(&song("Tizita", "X", None, Some("pop"))));
    }

    #[test]
    fn blank_values_are_noops() {
        let filter = SongFilter::new(Some("   "), Some(""), None, None);
        assert!(filter.is_empty());
        assert!(filter.matches(&song("A", "X", None, None)));
    }
}
