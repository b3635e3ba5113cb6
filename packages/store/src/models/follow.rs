//! Follow graph models

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Directed follow edge from the follows table
///
/// Unique per (follower, following) pair; self-follows are rejected
/// before the insert and by a table check constraint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Follow {
    /// Unique follow identifier
    pub id: Uuid,

    /// The user doing the following
    pub follower_id: Uuid,

    /// The user being followed
    pub following_id: Uuid,
}

/// Follower and following totals for one user
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct FollowCounts {
    /// Users following this user
    pub followers: i64,

    /// Users this user follows
    pub following: i64,
}
