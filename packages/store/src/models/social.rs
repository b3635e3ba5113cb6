//! Social post models
//!
//! A post shares one playlist to the feed. Each playlist can be shared
//! at most once; deleting the playlist removes the post with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Shared playlist post from the social_posts table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SocialPost {
    /// Unique post identifier
    pub id: Uuid,

    /// Optional caption written by the author
    pub caption: Option<String>,

    /// Post author
    pub user_id: Uuid,

    /// The playlist being shared (unique per playlist)
    pub playlist_id: Uuid,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last caption edit timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for sharing a playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSocialPost {
    pub playlist_id: Uuid,
    pub caption: Option<String>,
}

/// Caption patch for an existing post; bumps updated_at
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSocialPost {
    pub caption: Option<String>,
}

/// Feed row: post plus author, playlist, and engagement context
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedPost {
    pub id: Uuid,
    pub caption: Option<String>,
    pub user_id: Uuid,
    pub playlist_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Author display name
    pub author_name: Option<String>,

    /// Author avatar URL
    pub author_image: Option<String>,

    /// Name of the shared playlist
    pub playlist_name: String,

    /// Total likes on the post
    pub like_count: i64,

    /// Total comments on the post
    pub comment_count: i64,

    /// Whether the requesting viewer has liked the post
    pub viewer_has_liked: bool,
}

/// Like and comment totals for one post
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct PostEngagement {
    pub like_count: i64,
    pub comment_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_social_post_caption_optional() {
        let input: NewSocialPost = serde_json::from_str(
            r#"{"playlist_id": "6d1a0f76-3b56-4a3f-9b66-0573a01a2c1b"}"#,
        )
        .unwrap();
        assert!(input.caption.is_none());
    }

    #[test]
    fn test_post_engagement_default_is_zero() {
        let engagement = PostEngagement::default();
        assert_eq!(engagement.like_count, 0);
        assert_eq!(engagement.comment_count, 0);
    }
}
