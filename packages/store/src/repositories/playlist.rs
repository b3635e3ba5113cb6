//! Playlist repository for centralized database operations
//!
//! This module provides all playlist-related database operations in a
//! single location, following the repository pattern. Membership and
//! ordering live in [`super::playlist_song`].

use sqlx::PgPool;
use uuid::Uuid;

use super::utils::{clamp_page, escape_ilike, PLAYLIST_COLUMNS};
use crate::error::{StoreError, StoreResult};
use crate::models::playlist::{NewPlaylist, Playlist, PlaylistStats, UpdatePlaylist};

/// Repository for playlist database operations
#[derive(Clone)]
pub struct PlaylistRepository {
    pool: PgPool,
}

impl PlaylistRepository {
    /// Create a new PlaylistRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a playlist owned by a user
    ///
    /// # Returns
    /// * `Ok(Playlist)` - The stored playlist
    /// * `Err(StoreError::InvalidInput)` - If the name is blank
    /// * `Err(StoreError::ForeignKeyViolation)` - If the user does not exist
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, user_id: Uuid, input: NewPlaylist) -> StoreResult<Playlist> {
        if input.name.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "playlist name must not be empty".to_string(),
            ));
        }

        let sql = format!(
            r#"
            INSERT INTO playlists (name, is_public, user_id)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            PLAYLIST_COLUMNS
        );
        let playlist = sqlx::query_as::<_, Playlist>(&sql)
            .bind(input.name.trim())
            .bind(input.is_public)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(playlist)
    }

    /// Find a playlist by its unique ID
    pub async fn find_by_id(&self, playlist_id: Uuid) -> StoreResult<Option<Playlist>> {
        let sql = format!("SELECT {} FROM playlists WHERE id = $1", PLAYLIST_COLUMNS);
        let playlist = sqlx::query_as::<_, Playlist>(&sql)
            .bind(playlist_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(playlist)
    }

    /// Find all playlists for a user, most recently touched first
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Playlist>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let sql = format!(
            "SELECT {} FROM playlists WHERE user_id = $1 ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
            PLAYLIST_COLUMNS
        );
        let playlists = sqlx::query_as::<_, Playlist>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(playlists)
    }

    /// Find public playlists with pagination
    pub async fn find_public(&self, limit: i64, offset: i64) -> StoreResult<Vec<Playlist>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let sql = format!(
            "SELECT {} FROM playlists WHERE is_public = true ORDER BY updated_at DESC LIMIT $1 OFFSET $2",
            PLAYLIST_COLUMNS
        );
        let playlists = sqlx::query_as::<_, Playlist>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(playlists)
    }

    /// Apply a patch to a playlist
    ///
    /// `None` fields keep their stored values; updated_at is bumped
    /// regardless so feeds sort edited playlists first.
    ///
    /// # Returns
    /// * `Ok(Playlist)` - The updated playlist
    /// * `Err(StoreError::NotFound)` - If the playlist does not exist
    #[tracing::instrument(skip(self, update))]
    pub async fn update(
        &self,
        playlist_id: Uuid,
        update: UpdatePlaylist,
    ) -> StoreResult<Playlist> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(StoreError::InvalidInput(
                    "playlist name must not be empty".to_string(),
                ));
            }
        }

        let sql = format!(
            r#"
            UPDATE playlists
            SET
                name = COALESCE($2, name),
                is_public = COALESCE($3, is_public),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PLAYLIST_COLUMNS
        );
        let playlist = sqlx::query_as::<_, Playlist>(&sql)
            .bind(playlist_id)
            .bind(update.name.as_deref().map(str::trim))
            .bind(update.is_public)
            .fetch_optional(&self.pool)
            .await?;

        playlist.ok_or_else(|| StoreError::not_found("playlist", playlist_id))
    }

    /// Delete a playlist, its entries, and its shared post if any
    ///
    /// # Returns
    /// * `Ok(true)` - If the playlist existed and was deleted
    /// * `Ok(false)` - If no playlist with the given ID exists
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, playlist_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(playlist_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if a user owns a playlist
    pub async fn is_owned_by(&self, playlist_id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let owned = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM playlists WHERE id = $1 AND user_id = $2)"#,
        )
        .bind(playlist_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(owned)
    }

    /// Check if a user can view a playlist (owner or public)
    pub async fn can_access(&self, playlist_id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let allowed = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM playlists
                WHERE id = $1
                    AND (is_public = true OR user_id = $2)
            )
            "#,
        )
        .bind(playlist_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(allowed)
    }

    /// Get count of playlists for a user
    pub async fn count_by_user(&self, user_id: Uuid) -> StoreResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM playlists WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Search public playlists by name, prefix matches first
    ///
    /// Escapes ILIKE special characters to prevent pattern injection.
    pub async fn search_public(&self, query: &str, limit: i64) -> StoreResult<Vec<Playlist>> {
        let (limit, _) = clamp_page(limit, 0)?;
        let escaped = escape_ilike(query.trim());

        let sql = format!(
            r#"SELECT {} FROM playlists
            WHERE is_public = true AND name ILIKE $1
            ORDER BY
                CASE WHEN name ILIKE $2 THEN 0 ELSE 1 END,
                updated_at DESC
            LIMIT $3"#,
            PLAYLIST_COLUMNS
        );
        let playlists = sqlx::query_as::<_, Playlist>(&sql)
            .bind(format!("%{}%", escaped))
            .bind(format!("{}%", escaped))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(playlists)
    }

    /// Size and runtime rollup for one playlist
    ///
    /// # Returns
    /// * `Ok(PlaylistStats)` - Entry count and combined duration
    /// * `Err(StoreError::NotFound)` - If the playlist does not exist
    pub async fn stats(&self, playlist_id: Uuid) -> StoreResult<PlaylistStats> {
        let stats = sqlx::query_as::<_, PlaylistStats>(
            r#"
            SELECT
                COUNT(ps.id) AS song_count,
                SUM(s.duration_ms) AS total_duration_ms
            FROM playlists p
            LEFT JOIN playlist_songs ps ON ps.playlist_id = p.id
            LEFT JOIN songs s ON s.id = ps.song_id
            WHERE p.id = $1
            GROUP BY p.id
            "#,
        )
        .bind(playlist_id)
        .fetch_optional(&self.pool)
        .await?;

        stats.ok_or_else(|| StoreError::not_found("playlist", playlist_id))
    }
}
