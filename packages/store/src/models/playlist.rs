//! Playlist models
//!
//! A playlist is an ordered set of songs. Ordering lives in the
//! playlist_songs join table as a dense position column starting at 0,
//! maintained transactionally by the playlist song repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Playlist from the playlists table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: Uuid,

    /// Playlist name shown in the UI
    pub name: String,

    /// Whether the playlist is visible to other users
    pub is_public: bool,

    /// Owning user
    pub user_id: Uuid,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp, bumped by entry changes too
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlaylist {
    /// Playlist name
    pub name: String,

    /// Visibility, private by default
    #[serde(default)]
    pub is_public: bool,
}

/// Patch for updating a playlist
///
/// `None` fields leave the stored value unchanged; updated_at is bumped
/// either way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlaylist {
    pub name: Option<String>,
    pub is_public: Option<bool>,
}

/// Membership row from the playlist_songs table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistSong {
    /// Unique membership identifier
    pub id: Uuid,

    /// Playlist this entry belongs to
    pub playlist_id: Uuid,

    /// Song at this position
    pub song_id: Uuid,

    /// Zero-based position within the playlist
    pub position: i32,
}

/// Playlist entry joined with its song, ordered output for track listings
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistEntry {
    pub song_id: Uuid,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub external_id: String,
    pub duration_ms: i32,
    pub position: i32,
}

/// Size and runtime rollup for one playlist
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistStats {
    /// Number of songs in the playlist
    pub song_count: i64,

    /// Combined runtime in milliseconds, NULL when empty
    pub total_duration_ms: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_playlist_default_visibility() {
        let input: NewPlaylist = serde_json::from_str(r#"{"name": "Road Trip"}"#).unwrap();
        assert_eq!(input.name, "Road Trip");
        assert!(!input.is_public);
    }
}
