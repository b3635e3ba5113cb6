//! Post comment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Comment from the comments table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: Uuid,

    /// Comment body
    pub content: String,

    /// Comment author
    pub user_id: Uuid,

    /// Post the comment belongs to
    pub social_post_id: Uuid,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last edit timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for commenting on a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub social_post_id: Uuid,
    pub content: String,
}

/// Bulk comment tally keyed by post
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostCommentCount {
    pub social_post_id: Uuid,
    pub comment_count: i64,
}
