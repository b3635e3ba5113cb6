//! Shared utility functions for repositories
//!
//! This module provides common functions used across repositories.

use crate::error::{StoreError, StoreResult};

/// Largest page size a listing query will serve
pub const MAX_PAGE_SIZE: i64 = 100;

/// Escape special characters in ILIKE patterns to prevent pattern injection.
///
/// ILIKE uses `%` for any sequence and `_` for single character wildcards.
/// If user input contains these characters, they must be escaped to match literally.
///
/// # Example
/// ```
/// use tuneswipe_store::repositories::utils::escape_ilike;
///
/// let input = "100%";
/// let escaped = escape_ilike(input);
/// assert_eq!(escaped, r"100\%");
/// ```
pub fn escape_ilike(pattern: &str) -> String {
    pattern
        .replace('\\', r"\\")
        .replace('%', r"\%")
        .replace('_', r"\_")
}

/// Validate a limit/offset pair, clamping the limit to [`MAX_PAGE_SIZE`].
///
/// Negative values are caller bugs and are rejected rather than silently
/// corrected.
pub fn clamp_page(limit: i64, offset: i64) -> StoreResult<(i64, i64)> {
    if limit < 0 {
        return Err(StoreError::InvalidInput(format!(
            "limit must be non-negative, got {}",
            limit
        )));
    }
    if offset < 0 {
        return Err(StoreError::InvalidInput(format!(
            "offset must be non-negative, got {}",
            offset
        )));
    }
    Ok((limit.min(MAX_PAGE_SIZE), offset))
}

// ============================================================================
// SQL Column Constants
//
// These constants define the SELECT column lists for each entity type,
// reducing duplication and ensuring consistency across queries.
// ============================================================================

/// SQL columns for user queries
pub const USER_COLUMNS: &str = r#"
    id, name, email, email_verified, image
"#;

/// SQL columns for provider account queries
pub const ACCOUNT_COLUMNS: &str = r#"
    id, user_id, type, provider, provider_account_id,
    refresh_token, access_token, expires_at,
    token_type, scope, id_token, session_state
"#;

/// SQL columns for session queries
pub const SESSION_COLUMNS: &str = r#"
    id, session_token, user_id, expires_at
"#;

/// SQL columns for verification token queries
pub const VERIFICATION_TOKEN_COLUMNS: &str = r#"
    identifier, token, expires_at
"#;

/// SQL columns for song queries
pub const SONG_COLUMNS: &str = r#"
    id, title, artist, album, external_id, duration_ms
"#;

/// SQL columns for playlist queries
pub const PLAYLIST_COLUMNS: &str = r#"
    id, name, is_public, user_id, created_at, updated_at
"#;

/// SQL columns for playlist membership queries
pub const PLAYLIST_SONG_COLUMNS: &str = r#"
    id, playlist_id, song_id, position
"#;

/// SQL columns for swipe queries
pub const SWIPE_COLUMNS: &str = r#"
    id, action, user_id, song_id
"#;

/// SQL columns for social post queries
pub const SOCIAL_POST_COLUMNS: &str = r#"
    id, caption, user_id, playlist_id, created_at, updated_at
"#;

/// SQL columns for like queries
pub const LIKE_COLUMNS: &str = r#"
    id, user_id, social_post_id
"#;

/// SQL columns for comment queries
pub const COMMENT_COLUMNS: &str = r#"
    id, content, user_id, social_post_id, created_at, updated_at
"#;

/// SQL columns for follow queries
pub const FOLLOW_COLUMNS: &str = r#"
    id, follower_id, following_id
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_escape_ilike_no_special_chars() {
        assert_eq!(escape_ilike("hello world"), "hello world");
    }

    #[test]
    fn test_escape_ilike_percent() {
        assert_eq!(escape_ilike("100% complete"), r"100\% complete");
    }

    #[test]
    fn test_escape_ilike_underscore() {
        assert_eq!(escape_ilike("test_case"), r"test\_case");
    }

    #[test]
    fn test_escape_ilike_backslash() {
        assert_eq!(escape_ilike(r"path\to\file"), r"path\\to\\file");
    }

    #[test]
    fn test_escape_ilike_all_special() {
        assert_eq!(escape_ilike(r"100%_\test"), r"100\%\_\\test");
    }

    #[test]
    fn test_escape_ilike_empty() {
        assert_eq!(escape_ilike(""), "");
    }

    #[test]
    fn test_clamp_page_passes_small_values() {
        assert_eq!(clamp_page(20, 40).unwrap(), (20, 40));
    }

    #[test]
    fn test_clamp_page_caps_limit() {
        assert_eq!(clamp_page(10_000, 0).unwrap(), (MAX_PAGE_SIZE, 0));
    }

    #[test]
    fn test_clamp_page_rejects_negative_limit() {
        assert_matches!(clamp_page(-1, 0), Err(StoreError::InvalidInput(_)));
    }

    #[test]
    fn test_clamp_page_rejects_negative_offset() {
        assert_matches!(clamp_page(10, -5), Err(StoreError::InvalidInput(_)));
    }
}
