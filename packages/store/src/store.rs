//! Store handle: pool bootstrap, migrations, and repository access

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use tuneswipe_shared_config::DatabaseConfig;

use crate::error::StoreResult;
use crate::repositories::{
    AccountRepository, CommentRepository, FollowRepository, LikeRepository,
    PlaylistRepository, PlaylistSongRepository, SessionRepository, SocialPostRepository,
    SongRepository, SwipeRepository, UserRepository, VerificationTokenRepository,
};

/// Handle to the TuneSwipe database
///
/// Owns the connection pool. Repositories are thin façades over pool
/// clones, so accessors hand out owned values that are cheap to pass
/// around and keep alive independently of the store.
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Connect to PostgreSQL with the pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        config.validate()?;

        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await?;

        tracing::info!("database connection established");
        Ok(Self { pool })
    }

    /// Wrap an existing pool, leaving its configuration to the caller
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply embedded migrations, bringing the schema up to date
    pub async fn run_migrations(&self) -> StoreResult<()> {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("migrations completed");
        Ok(())
    }

    /// Reference to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all connections; pending acquires fail afterwards
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// User accounts
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Linked OAuth provider accounts
    pub fn accounts(&self) -> AccountRepository {
        AccountRepository::new(self.pool.clone())
    }

    /// Login sessions
    pub fn sessions(&self) -> SessionRepository {
        SessionRepository::new(self.pool.clone())
    }

    /// Email verification tokens
    pub fn verification_tokens(&self) -> VerificationTokenRepository {
        VerificationTokenRepository::new(self.pool.clone())
    }

    /// Song catalog
    pub fn songs(&self) -> SongRepository {
        SongRepository::new(self.pool.clone())
    }

    /// Playlists
    pub fn playlists(&self) -> PlaylistRepository {
        PlaylistRepository::new(self.pool.clone())
    }

    /// Ordered playlist membership
    pub fn playlist_songs(&self) -> PlaylistSongRepository {
        PlaylistSongRepository::new(self.pool.clone())
    }

    /// Swipe verdicts
    pub fn swipes(&self) -> SwipeRepository {
        SwipeRepository::new(self.pool.clone())
    }

    /// Shared playlist posts
    pub fn posts(&self) -> SocialPostRepository {
        SocialPostRepository::new(self.pool.clone())
    }

    /// Post likes
    pub fn likes(&self) -> LikeRepository {
        LikeRepository::new(self.pool.clone())
    }

    /// Post comments
    pub fn comments(&self) -> CommentRepository {
        CommentRepository::new(self.pool.clone())
    }

    /// Follow graph
    pub fn follows(&self) -> FollowRepository {
        FollowRepository::new(self.pool.clone())
    }
}
