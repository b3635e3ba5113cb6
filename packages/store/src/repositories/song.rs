//! Song catalog repository
//!
//! The catalog is fed from an upstream provider keyed by external_id.
//! `import` is the upsert path refreshes go through; `create` is the
//! strict path that errors on duplicates.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::song::{ArtistSongCount, NewSong, Song, SongDurationStats};
use crate::repositories::utils::{clamp_page, escape_ilike, SONG_COLUMNS};

/// Repository for song database operations
#[derive(Clone)]
pub struct SongRepository {
    pool: PgPool,
}

impl SongRepository {
    /// Create a new SongRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a song to the catalog
    ///
    /// # Returns
    /// * `Ok(Song)` - The stored song
    /// * `Err(StoreError::UniqueViolation)` - If the external_id is already present
    #[tracing::instrument(skip(self, input), fields(external_id = %input.external_id))]
    pub async fn create(&self, input: NewSong) -> StoreResult<Song> {
        validate_song(&input)?;

        let song = sqlx::query_as::<_, Song>(&format!(
            r#"
            INSERT INTO songs (title, artist, album, external_id, duration_ms)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SONG_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.artist)
        .bind(&input.album)
        .bind(&input.external_id)
        .bind(input.duration_ms)
        .fetch_one(&self.pool)
        .await?;

        Ok(song)
    }

    /// Upsert a song from the upstream catalog
    ///
    /// Matches on external_id; existing rows get their metadata refreshed
    /// instead of erroring, so repeated imports are safe.
    #[tracing::instrument(skip(self, input), fields(external_id = %input.external_id))]
    pub async fn import(&self, input: NewSong) -> StoreResult<Song> {
        validate_song(&input)?;

        let song = sqlx::query_as::<_, Song>(&format!(
            r#"
            INSERT INTO songs (title, artist, album, external_id, duration_ms)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (external_id) DO UPDATE SET
                title = EXCLUDED.title,
                artist = EXCLUDED.artist,
                album = EXCLUDED.album,
                duration_ms = EXCLUDED.duration_ms
            RETURNING {}
            "#,
            SONG_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.artist)
        .bind(&input.album)
        .bind(&input.external_id)
        .bind(input.duration_ms)
        .fetch_one(&self.pool)
        .await?;

        Ok(song)
    }

    /// Find a song by its unique ID
    pub async fn find_by_id(&self, song_id: Uuid) -> StoreResult<Option<Song>> {
        let song = sqlx::query_as::<_, Song>(&format!(
            "SELECT {} FROM songs WHERE id = $1",
            SONG_COLUMNS
        ))
        .bind(song_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(song)
    }

    /// Find a song by its upstream identifier
    pub async fn find_by_external_id(&self, external_id: &str) -> StoreResult<Option<Song>> {
        let song = sqlx::query_as::<_, Song>(&format!(
            "SELECT {} FROM songs WHERE external_id = $1",
            SONG_COLUMNS
        ))
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(song)
    }

    /// List songs ordered by artist then title
    pub async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<Song>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let sql = format!(
            "SELECT {} FROM songs ORDER BY artist ASC, title ASC LIMIT $1 OFFSET $2",
            SONG_COLUMNS
        );
        let songs = sqlx::query_as::<_, Song>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(songs)
    }

    /// Search songs by title or artist
    ///
    /// Escapes ILIKE special characters to prevent pattern injection.
    /// Title prefix matches rank first.
    pub async fn search(&self, query: &str, limit: i64) -> StoreResult<Vec<Song>> {
        let (limit, _) = clamp_page(limit, 0)?;
        let escaped = escape_ilike(query.trim());

        let sql = format!(
            r#"SELECT {} FROM songs
            WHERE title ILIKE $1 OR artist ILIKE $1
            ORDER BY
                CASE WHEN title ILIKE $2 THEN 0 ELSE 1 END,
                artist ASC, title ASC
            LIMIT $3"#,
            SONG_COLUMNS
        );
        let songs = sqlx::query_as::<_, Song>(&sql)
            .bind(format!("%{}%", escaped))
            .bind(format!("{}%", escaped))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(songs)
    }

    /// Total number of songs in the catalog
    pub async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Catalog-wide duration aggregates
    ///
    /// Over an empty catalog everything but song_count comes back `None`.
    pub async fn duration_stats(&self) -> StoreResult<SongDurationStats> {
        let stats = sqlx::query_as::<_, SongDurationStats>(
            r#"
            SELECT
                COUNT(*) AS song_count,
                SUM(duration_ms) AS total_duration_ms,
                AVG(duration_ms)::DOUBLE PRECISION AS avg_duration_ms,
                MIN(duration_ms) AS min_duration_ms,
                MAX(duration_ms) AS max_duration_ms
            FROM songs
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Song totals per artist, biggest catalogs first
    pub async fn count_by_artist(&self, limit: i64) -> StoreResult<Vec<ArtistSongCount>> {
        let (limit, _) = clamp_page(limit, 0)?;

        let counts = sqlx::query_as::<_, ArtistSongCount>(
            r#"
            SELECT artist, COUNT(*) AS song_count
            FROM songs
            GROUP BY artist
            ORDER BY song_count DESC, artist ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Remove a song and, through cascades, its playlist entries and swipes
    ///
    /// # Returns
    /// * `Ok(true)` - If the song existed and was deleted
    /// * `Ok(false)` - If no song with the given ID exists
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, song_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(song_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Reject catalog rows that could never be displayed or re-imported
fn validate_song(input: &NewSong) -> StoreResult<()> {
    if input.external_id.trim().is_empty() {
        return Err(StoreError::InvalidInput(
            "song external_id must not be empty".to_string(),
        ));
    }
    if input.title.trim().is_empty() {
        return Err(StoreError::InvalidInput(
            "song title must not be empty".to_string(),
        ));
    }
    if input.duration_ms < 0 {
        return Err(StoreError::InvalidInput(format!(
            "song duration_ms must be non-negative, got {}",
            input.duration_ms
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample_song() -> NewSong {
        NewSong {
            title: "Windowpane".to_string(),
            artist: "Opeth".to_string(),
            album: Some("Damnation".to_string()),
            external_id: "spotify:track:abc".to_string(),
            duration_ms: 464_000,
        }
    }

    #[test]
    fn test_validate_song_accepts_complete_input() {
        assert!(validate_song(&sample_song()).is_ok());
    }

    #[test]
    fn test_validate_song_rejects_blank_external_id() {
        let mut input = sample_song();
        input.external_id = "   ".to_string();
        assert_matches!(validate_song(&input), Err(StoreError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_song_rejects_negative_duration() {
        let mut input = sample_song();
        input.duration_ms = -1;
        assert_matches!(validate_song(&input), Err(StoreError::InvalidInput(_)));
    }
}
