//! User account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User account from the users table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Display name, absent until the user picks one
    pub name: Option<String>,

    /// Email address (unique, stored lowercase)
    pub email: String,

    /// When the email was verified, if ever
    pub email_verified: Option<DateTime<Utc>>,

    /// URL to the user's avatar image
    pub image: Option<String>,
}

impl User {
    /// Whether the account has completed email verification
    pub fn is_verified(&self) -> bool {
        self.email_verified.is_some()
    }
}

/// Input for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
}

impl NewUser {
    /// Create an input with just an email, the minimum a signup needs
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
            image: None,
        }
    }
}

/// Patch for updating a user profile
///
/// `None` fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

impl UpdateUser {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.image.is_none()
    }
}

/// Cross-table activity counts for a profile page
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfileStats {
    /// Playlists the user owns
    pub playlist_count: i64,

    /// Playlists the user has shared to the feed
    pub post_count: i64,

    /// Users following this user
    pub follower_count: i64,

    /// Users this user follows
    pub following_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_verified() {
        let mut user = User {
            id: Uuid::new_v4(),
            name: Some("Test User".to_string()),
            email: "test@example.com".to_string(),
            email_verified: None,
            image: None,
        };
        assert!(!user.is_verified());

        user.email_verified = Some(Utc::now());
        assert!(user.is_verified());
    }

    #[test]
    fn test_new_user_with_email() {
        let input = NewUser::with_email("someone@example.com");
        assert_eq!(input.email, "someone@example.com");
        assert!(input.name.is_none());
        assert!(input.image.is_none());
    }

    #[test]
    fn test_update_user_is_empty() {
        assert!(UpdateUser::default().is_empty());

        let patch = UpdateUser {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
