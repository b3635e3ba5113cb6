//! Post like models

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Like row from the likes table, unique per (user, post)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Like {
    /// Unique like identifier
    pub id: Uuid,

    /// User who liked the post
    pub user_id: Uuid,

    /// The liked post
    pub social_post_id: Uuid,
}

/// Bulk like tally keyed by post
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostLikeCount {
    pub social_post_id: Uuid,
    pub like_count: i64,
}
