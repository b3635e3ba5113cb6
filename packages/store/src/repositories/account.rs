//! Provider account repository
//!
//! OAuth sign-in resolves a (provider, provider_account_id) pair to a
//! user; everything here serves that flow plus token refresh.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::account::{Account, NewAccount, ProviderCount, UpdateAccountTokens};
use crate::repositories::utils::ACCOUNT_COLUMNS;

/// Repository for provider account database operations
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new AccountRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Link a provider account to a user
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account row
    /// * `Err(StoreError::UniqueViolation)` - If the provider pair is already linked
    /// * `Err(StoreError::ForeignKeyViolation)` - If the user does not exist
    #[tracing::instrument(skip(self, input), fields(provider = %input.provider))]
    pub async fn link(&self, input: NewAccount) -> StoreResult<Account> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (
                user_id, type, provider, provider_account_id,
                refresh_token, access_token, expires_at,
                token_type, scope, id_token, session_state
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(input.user_id)
        .bind(&input.kind)
        .bind(&input.provider)
        .bind(&input.provider_account_id)
        .bind(&input.refresh_token)
        .bind(&input.access_token)
        .bind(input.expires_at)
        .bind(&input.token_type)
        .bind(&input.scope)
        .bind(&input.id_token)
        .bind(&input.session_state)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    /// Resolve a provider pair to its linked account
    pub async fn find_by_provider_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> StoreResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            SELECT {}
            FROM accounts
            WHERE provider = $1 AND provider_account_id = $2
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(provider)
        .bind(provider_account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// All accounts linked to a user, ordered by provider name
    pub async fn find_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            r#"
            SELECT {}
            FROM accounts
            WHERE user_id = $1
            ORDER BY provider
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    /// Replace the stored tokens after a provider refresh
    ///
    /// Refresh responses are authoritative, so all token columns are
    /// overwritten, including ones the patch leaves as `None`.
    ///
    /// # Returns
    /// * `Ok(Account)` - The refreshed account row
    /// * `Err(StoreError::NotFound)` - If the account does not exist
    #[tracing::instrument(skip(self, tokens))]
    pub async fn update_tokens(
        &self,
        account_id: Uuid,
        tokens: UpdateAccountTokens,
    ) -> StoreResult<Account> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts
            SET
                refresh_token = $2,
                access_token = $3,
                expires_at = $4,
                token_type = $5,
                scope = $6,
                id_token = $7,
                session_state = $8
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(account_id)
        .bind(&tokens.refresh_token)
        .bind(&tokens.access_token)
        .bind(tokens.expires_at)
        .bind(&tokens.token_type)
        .bind(&tokens.scope)
        .bind(&tokens.id_token)
        .bind(&tokens.session_state)
        .fetch_optional(&self.pool)
        .await?;

        account.ok_or_else(|| StoreError::not_found("account", account_id))
    }

    /// Unlink a provider account
    ///
    /// # Returns
    /// * `Ok(true)` - If the account existed and was removed
    /// * `Ok(false)` - If no such provider pair is linked
    #[tracing::instrument(skip(self))]
    pub async fn unlink(&self, provider: &str, provider_account_id: &str) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM accounts WHERE provider = $1 AND provider_account_id = $2")
                .bind(provider)
                .bind(provider_account_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Linked-account totals per provider, most used first
    pub async fn count_by_provider(&self) -> StoreResult<Vec<ProviderCount>> {
        let counts = sqlx::query_as::<_, ProviderCount>(
            r#"
            SELECT provider, COUNT(*) AS account_count
            FROM accounts
            GROUP BY provider
            ORDER BY account_count DESC, provider
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}
