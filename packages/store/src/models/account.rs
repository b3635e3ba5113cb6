//! OAuth provider account models
//!
//! One row per (provider, provider_account_id) pair. A user can link
//! several providers; sign-in resolves the provider pair to a user.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Linked provider account from the accounts table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    /// Unique account identifier
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Account category as the provider reports it ("oauth", "email")
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,

    /// Provider name (e.g. "spotify", "google")
    pub provider: String,

    /// User identifier on the provider's side
    pub provider_account_id: String,

    /// OAuth refresh token, when the provider issues one
    pub refresh_token: Option<String>,

    /// OAuth access token
    pub access_token: Option<String>,

    /// Access token expiry as Unix epoch seconds
    pub expires_at: Option<i64>,

    /// Token type reported by the provider (usually "Bearer")
    pub token_type: Option<String>,

    /// Granted OAuth scopes
    pub scope: Option<String>,

    /// OpenID Connect ID token
    pub id_token: Option<String>,

    /// Provider session state, used by some OAuth flows
    pub session_state: Option<String>,
}

/// Input for linking a provider account to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub provider: String,
    pub provider_account_id: String,
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
    pub expires_at: Option<i64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub id_token: Option<String>,
    pub session_state: Option<String>,
}

impl NewAccount {
    /// Minimal OAuth link input; token fields can be filled in afterwards
    pub fn oauth(
        user_id: Uuid,
        provider: impl Into<String>,
        provider_account_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind: "oauth".to_string(),
            provider: provider.into(),
            provider_account_id: provider_account_id.into(),
            refresh_token: None,
            access_token: None,
            expires_at: None,
            token_type: None,
            scope: None,
            id_token: None,
            session_state: None,
        }
    }
}

/// Token fields replaced wholesale on refresh
///
/// Refresh responses are authoritative, so absent fields clear the stored
/// value instead of keeping a stale one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountTokens {
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
    pub expires_at: Option<i64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub id_token: Option<String>,
    pub session_state: Option<String>,
}

/// Linked-account tally per provider
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProviderCount {
    pub provider: String,
    pub account_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_oauth() {
        let input = NewAccount::oauth(Uuid::new_v4(), "spotify", "spotify-user-1");
        assert_eq!(input.kind, "oauth");
        assert_eq!(input.provider, "spotify");
        assert!(input.access_token.is_none());
    }

    #[test]
    fn test_account_serializes_kind_as_type() {
        let input = NewAccount::oauth(Uuid::new_v4(), "google", "g-123");
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["type"], "oauth");
        assert!(json.get("kind").is_none());
    }
}
