//! Store error types
//!
//! Every repository method returns [`StoreResult`]. Constraint failures
//! raised by PostgreSQL are classified by SQLSTATE into dedicated
//! variants carrying the constraint name, so callers can match on what
//! went wrong instead of parsing driver messages.

use thiserror::Error;
use tuneswipe_shared_config::ConfigError;

/// PostgreSQL SQLSTATE codes for integrity constraint violations (class 23)
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

/// Errors surfaced by the data store
#[derive(Error, Debug)]
pub enum StoreError {
    /// A row the operation requires does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// A unique constraint rejected the write
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A foreign key constraint rejected the write
    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// A check constraint rejected the write
    #[error("check constraint violated: {constraint}")]
    CheckViolation { constraint: String },

    /// Input rejected before reaching the database
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration rejected before connecting
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Any other database error
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Migration failure
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Build a [`StoreError::NotFound`] for the given entity and key
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// True when the error is a missing-row error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when the error is a unique constraint violation
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }

    /// True when the error is a foreign key violation
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ForeignKeyViolation { .. })
    }
}

/// Map a SQLSTATE code and constraint name to a classified variant
fn classify(code: &str, constraint: Option<&str>) -> Option<StoreError> {
    let constraint = constraint.unwrap_or("unknown").to_string();
    match code {
        UNIQUE_VIOLATION => Some(StoreError::UniqueViolation { constraint }),
        FOREIGN_KEY_VIOLATION => Some(StoreError::ForeignKeyViolation { constraint }),
        CHECK_VIOLATION => Some(StoreError::CheckViolation { constraint }),
        _ => None,
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(code) = db_err.code() {
                if let Some(classified) = classify(&code, db_err.constraint()) {
                    return classified;
                }
            }
        }
        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[rstest]
    #[case("users_email_key")]
    #[case("likes_user_id_social_post_id_key")]
    fn test_classify_unique_violation(#[case] name: &str) {
        let err = classify("23505", Some(name)).unwrap();
        assert_matches!(err, StoreError::UniqueViolation { ref constraint } if constraint == name);
        assert!(err.is_unique_violation());
    }

    #[test]
    fn test_classify_foreign_key_violation() {
        let err = classify("23503", Some("playlists_user_id_fkey")).unwrap();
        assert_matches!(err, StoreError::ForeignKeyViolation { ref constraint }
            if constraint == "playlists_user_id_fkey");
        assert!(err.is_foreign_key_violation());
    }

    #[test]
    fn test_classify_check_violation() {
        let err = classify("23514", Some("follows_no_self_follow")).unwrap();
        assert_matches!(err, StoreError::CheckViolation { ref constraint }
            if constraint == "follows_no_self_follow");
    }

    #[test]
    fn test_classify_missing_constraint_name() {
        let err = classify("23505", None).unwrap();
        assert_matches!(err, StoreError::UniqueViolation { ref constraint }
            if constraint == "unknown");
    }

    #[rstest]
    #[case("23502")]
    #[case("42P01")]
    #[case("08006")]
    fn test_classify_passes_through_other_codes(#[case] code: &str) {
        assert!(classify(code, None).is_none());
    }

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("playlist", "6d1a0f76-3b56-4a3f-9b66-0573a01a2c1b");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "playlist not found: 6d1a0f76-3b56-4a3f-9b66-0573a01a2c1b"
        );
    }

    #[test]
    fn test_row_not_found_stays_database_error() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert_matches!(err, StoreError::Database(_));
    }
}
