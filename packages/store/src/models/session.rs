//! Session and verification token models

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Session record from the sessions table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    /// Unique session identifier
    pub id: Uuid,

    /// Opaque token presented by the client (unique)
    pub session_token: String,

    /// User who owns this session
    pub user_id: Uuid,

    /// Session expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Session joined with its owner, the shape session middleware wants
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionWithUser {
    pub id: Uuid,
    pub session_token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub user_name: Option<String>,
    pub user_email: String,
    pub user_image: Option<String>,
}

/// Email sign-in token from the verification_tokens table
///
/// There is no surrogate id; the (identifier, token) pair is the identity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VerificationToken {
    /// What the token verifies, usually an email address
    pub identifier: String,

    /// The token value itself
    pub token: String,

    /// Token expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Whether the token has passed its expiry
    ///
    /// Consuming an expired token still removes it; the caller decides
    /// whether to honor it.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_is_expired() {
        let mut session = Session {
            id: Uuid::new_v4(),
            session_token: "tok".to_string(),
            user_id: Uuid::new_v4(),
            expires_at: Utc::now() + Duration::hours(1),
        };
        assert!(!session.is_expired());

        session.expires_at = Utc::now() - Duration::seconds(1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_verification_token_is_expired() {
        let mut token = VerificationToken {
            identifier: "someone@example.com".to_string(),
            token: "abc123".to_string(),
            expires_at: Utc::now() + Duration::minutes(10),
        };
        assert!(!token.is_expired());

        token.expires_at = Utc::now() - Duration::minutes(10);
        assert!(token.is_expired());
    }
}
