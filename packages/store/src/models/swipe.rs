//! Swipe models
//!
//! A swipe records one user's verdict on one song. The pair is unique;
//! swiping again replaces the stored direction.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Swipe verdict enum matching the PostgreSQL swipe_direction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "swipe_direction", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Liked,
    Disliked,
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Liked => write!(f, "liked"),
            Self::Disliked => write!(f, "disliked"),
        }
    }
}

/// Swipe record from the swipe_actions table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SwipeAction {
    /// Unique swipe identifier
    pub id: Uuid,

    /// The stored verdict
    pub action: SwipeDirection,

    /// User who swiped
    pub user_id: Uuid,

    /// Song that was swiped
    pub song_id: Uuid,
}

/// Input for recording a swipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSwipe {
    pub song_id: Uuid,
    pub action: SwipeDirection,
}

/// Per-user verdict tally, zero-filled for directions never used
#[derive(Debug, Clone, Default, Serialize)]
pub struct SwipeSummary {
    pub liked: i64,
    pub disliked: i64,
}

impl SwipeSummary {
    /// Total swipes recorded for the user
    pub fn total(&self) -> i64 {
        self.liked + self.disliked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_direction_serde() {
        assert_eq!(
            serde_json::to_string(&SwipeDirection::Liked).unwrap(),
            r#""liked""#
        );
        assert_eq!(
            serde_json::from_str::<SwipeDirection>(r#""disliked""#).unwrap(),
            SwipeDirection::Disliked
        );
    }

    #[test]
    fn test_swipe_direction_display() {
        assert_eq!(SwipeDirection::Liked.to_string(), "liked");
        assert_eq!(SwipeDirection::Disliked.to_string(), "disliked");
    }

    #[test]
    fn test_swipe_summary_total() {
        let summary = SwipeSummary {
            liked: 12,
            disliked: 30,
        };
        assert_eq!(summary.total(), 42);
        assert_eq!(SwipeSummary::default().total(), 0);
    }
}
