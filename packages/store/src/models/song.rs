//! Song catalog models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Song from the songs table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Song {
    /// Unique song identifier
    pub id: Uuid,

    /// Track title
    pub title: String,

    /// Performing artist
    pub artist: String,

    /// Album name, absent for singles
    pub album: Option<String>,

    /// Identifier on the upstream catalog provider (unique)
    pub external_id: String,

    /// Track length in milliseconds
    pub duration_ms: i32,
}

/// Input for adding a song to the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub external_id: String,
    pub duration_ms: i32,
}

/// Catalog-wide duration aggregates
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SongDurationStats {
    /// Number of songs in the catalog
    pub song_count: i64,

    /// Sum of all durations in milliseconds
    pub total_duration_ms: Option<i64>,

    /// Average duration in milliseconds
    pub avg_duration_ms: Option<f64>,

    /// Shortest song in milliseconds
    pub min_duration_ms: Option<i32>,

    /// Longest song in milliseconds
    pub max_duration_ms: Option<i32>,
}

/// Per-artist song tally
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistSongCount {
    pub artist: String,
    pub song_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_song_serde_round_trip() {
        let input = NewSong {
            title: "Windowpane".to_string(),
            artist: "Opeth".to_string(),
            album: Some("Damnation".to_string()),
            external_id: "spotify:track:abc".to_string(),
            duration_ms: 464_000,
        };
        let json = serde_json::to_string(&input).unwrap();
        let back: NewSong = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title, input.title);
        assert_eq!(back.external_id, input.external_id);
        assert_eq!(back.duration_ms, input.duration_ms);
    }
}
