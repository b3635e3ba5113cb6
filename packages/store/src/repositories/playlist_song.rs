//! Playlist membership repository
//!
//! Maintains the ordered song list of each playlist. Positions are dense
//! and zero-based at all times; every mutation runs in a transaction that
//! first locks the parent playlist row, so concurrent edits to the same
//! playlist serialize instead of corrupting positions.
//!
//! Entry mutations also bump the playlist's updated_at so recency
//! ordering reflects content changes, not just renames.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::playlist::{PlaylistEntry, PlaylistSong};
use crate::repositories::utils::{clamp_page, PLAYLIST_SONG_COLUMNS};

/// Repository for playlist membership database operations
#[derive(Clone)]
pub struct PlaylistSongRepository {
    pool: PgPool,
}

impl PlaylistSongRepository {
    /// Create a new PlaylistSongRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a song to the end of a playlist
    ///
    /// # Returns
    /// * `Ok(PlaylistSong)` - The new entry with its assigned position
    /// * `Err(StoreError::NotFound)` - If the playlist does not exist
    /// * `Err(StoreError::UniqueViolation)` - If the song is already in the playlist
    /// * `Err(StoreError::ForeignKeyViolation)` - If the song does not exist
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, playlist_id: Uuid, song_id: Uuid) -> StoreResult<PlaylistSong> {
        let mut tx = self.pool.begin().await?;

        lock_playlist(&mut tx, playlist_id)
            .await?
            .ok_or_else(|| StoreError::not_found("playlist", playlist_id))?;

        let max_position: Option<i32> =
            sqlx::query_scalar("SELECT MAX(position) FROM playlist_songs WHERE playlist_id = $1")
                .bind(playlist_id)
                .fetch_one(&mut *tx)
                .await?;

        let entry = sqlx::query_as::<_, PlaylistSong>(&format!(
            r#"
            INSERT INTO playlist_songs (playlist_id, song_id, position)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            PLAYLIST_SONG_COLUMNS
        ))
        .bind(playlist_id)
        .bind(song_id)
        .bind(max_position.unwrap_or(-1) + 1)
        .fetch_one(&mut *tx)
        .await?;

        touch_playlist(&mut tx, playlist_id).await?;
        tx.commit().await?;

        Ok(entry)
    }

    /// All entries of a playlist, ordered by position
    pub async fn entries(&self, playlist_id: Uuid) -> StoreResult<Vec<PlaylistSong>> {
        let entries = sqlx::query_as::<_, PlaylistSong>(&format!(
            r#"
            SELECT {}
            FROM playlist_songs
            WHERE playlist_id = $1
            ORDER BY position ASC
            "#,
            PLAYLIST_SONG_COLUMNS
        ))
        .bind(playlist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Entries joined with their songs, the shape track listings render
    pub async fn entries_with_songs(
        &self,
        playlist_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<PlaylistEntry>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let entries = sqlx::query_as::<_, PlaylistEntry>(
            r#"
            SELECT
                ps.song_id,
                s.title, s.artist, s.album, s.external_id, s.duration_ms,
                ps.position
            FROM playlist_songs ps
            JOIN songs s ON s.id = ps.song_id
            WHERE ps.playlist_id = $1
            ORDER BY ps.position ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(playlist_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Move a song to a new position, shifting everything in between
    ///
    /// Targets beyond the end clamp to the last position. Moving a song
    /// onto its current position is a no-op that still returns the entry.
    ///
    /// # Returns
    /// * `Ok(PlaylistSong)` - The entry at its new position
    /// * `Err(StoreError::NotFound)` - If the playlist or the entry does not exist
    /// * `Err(StoreError::InvalidInput)` - If new_position is negative
    #[tracing::instrument(skip(self))]
    pub async fn move_entry(
        &self,
        playlist_id: Uuid,
        song_id: Uuid,
        new_position: i32,
    ) -> StoreResult<PlaylistSong> {
        if new_position < 0 {
            return Err(StoreError::InvalidInput(format!(
                "position must be non-negative, got {}",
                new_position
            )));
        }

        let mut tx = self.pool.begin().await?;

        lock_playlist(&mut tx, playlist_id)
            .await?
            .ok_or_else(|| StoreError::not_found("playlist", playlist_id))?;

        let entry = sqlx::query_as::<_, PlaylistSong>(&format!(
            r#"
            SELECT {}
            FROM playlist_songs
            WHERE playlist_id = $1 AND song_id = $2
            "#,
            PLAYLIST_SONG_COLUMNS
        ))
        .bind(playlist_id)
        .bind(song_id)
        .fetch_optional(&mut *tx)
        .await?;

        let mut entry = entry.ok_or_else(|| StoreError::not_found("playlist entry", song_id))?;

        let max_position: Option<i32> =
            sqlx::query_scalar("SELECT MAX(position) FROM playlist_songs WHERE playlist_id = $1")
                .bind(playlist_id)
                .fetch_one(&mut *tx)
                .await?;

        let from_position = entry.position;
        let to_position = new_position.min(max_position.unwrap_or(0));

        if from_position == to_position {
            tx.commit().await?;
            return Ok(entry);
        }

        if from_position < to_position {
            // Moving toward the end: everything in between shifts down
            sqlx::query(
                r#"
                UPDATE playlist_songs
                SET position = position - 1
                WHERE playlist_id = $1 AND position > $2 AND position <= $3
                "#,
            )
            .bind(playlist_id)
            .bind(from_position)
            .bind(to_position)
            .execute(&mut *tx)
            .await?;
        } else {
            // Moving toward the front: everything in between shifts up
            sqlx::query(
                r#"
                UPDATE playlist_songs
                SET position = position + 1
                WHERE playlist_id = $1 AND position >= $2 AND position < $3
                "#,
            )
            .bind(playlist_id)
            .bind(to_position)
            .bind(from_position)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE playlist_songs SET position = $2 WHERE id = $1")
            .bind(entry.id)
            .bind(to_position)
            .execute(&mut *tx)
            .await?;

        touch_playlist(&mut tx, playlist_id).await?;
        tx.commit().await?;

        entry.position = to_position;
        Ok(entry)
    }

    /// Remove a song from a playlist, closing the position gap
    ///
    /// # Returns
    /// * `Ok(true)` - If the song was in the playlist and was removed
    /// * `Ok(false)` - If the playlist or the entry does not exist
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, playlist_id: Uuid, song_id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        if lock_playlist(&mut tx, playlist_id).await?.is_none() {
            return Ok(false);
        }

        let removed_position: Option<i32> = sqlx::query_scalar(
            r#"
            DELETE FROM playlist_songs
            WHERE playlist_id = $1 AND song_id = $2
            RETURNING position
            "#,
        )
        .bind(playlist_id)
        .bind(song_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(position) = removed_position else {
            return Ok(false);
        };

        // Shift subsequent positions down to keep them dense
        sqlx::query(
            r#"
            UPDATE playlist_songs
            SET position = position - 1
            WHERE playlist_id = $1 AND position > $2
            "#,
        )
        .bind(playlist_id)
        .bind(position)
        .execute(&mut *tx)
        .await?;

        touch_playlist(&mut tx, playlist_id).await?;
        tx.commit().await?;

        Ok(true)
    }

    /// Check if a playlist already contains a song
    pub async fn contains(&self, playlist_id: Uuid, song_id: Uuid) -> StoreResult<bool> {
        let exists = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM playlist_songs WHERE playlist_id = $1 AND song_id = $2)"#,
        )
        .bind(playlist_id)
        .bind(song_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Number of songs in a playlist
    pub async fn count(&self, playlist_id: Uuid) -> StoreResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM playlist_songs WHERE playlist_id = $1")
            .bind(playlist_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Remove every entry from a playlist
    ///
    /// # Returns
    /// * `Ok(u64)` - The number of entries that were removed
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self, playlist_id: Uuid) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;

        if lock_playlist(&mut tx, playlist_id).await?.is_none() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = $1")
            .bind(playlist_id)
            .execute(&mut *tx)
            .await?;

        touch_playlist(&mut tx, playlist_id).await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }
}

/// Lock the playlist row so entry mutations on it serialize
///
/// Returns `None` when the playlist does not exist. Every mutation takes
/// this lock first, which also gives a single lock order.
async fn lock_playlist(
    tx: &mut Transaction<'_, Postgres>,
    playlist_id: Uuid,
) -> StoreResult<Option<Uuid>> {
    let id = sqlx::query_scalar("SELECT id FROM playlists WHERE id = $1 FOR UPDATE")
        .bind(playlist_id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(id)
}

/// Bump the playlist's updated_at inside the surrounding transaction
async fn touch_playlist(
    tx: &mut Transaction<'_, Postgres>,
    playlist_id: Uuid,
) -> StoreResult<()> {
    sqlx::query("UPDATE playlists SET updated_at = NOW() WHERE id = $1")
        .bind(playlist_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
