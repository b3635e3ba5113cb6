//! Database repository layer for the TuneSwipe store
//!
//! This module provides the data access layer, centralizing all database
//! operations into reusable repositories. This pattern:
//! - Keeps SQL queries in one place per entity
//! - Makes the operation surface explicit and testable
//! - Lets callers hold exactly the repositories they need
//!
//! Every repository is a thin `Clone` façade over the shared pool and is
//! normally obtained through [`crate::Store`].

pub mod account;
pub mod comment;
pub mod follow;
pub mod like;
pub mod playlist;
pub mod playlist_song;
pub mod session;
pub mod social_post;
pub mod song;
pub mod swipe;
pub mod user;
pub mod utils;
pub mod verification_token;

pub use account::AccountRepository;
pub use comment::CommentRepository;
pub use follow::FollowRepository;
pub use like::LikeRepository;
pub use playlist::PlaylistRepository;
pub use playlist_song::PlaylistSongRepository;
pub use session::SessionRepository;
pub use social_post::SocialPostRepository;
pub use song::SongRepository;
pub use swipe::SwipeRepository;
pub use user::UserRepository;
pub use verification_token::VerificationTokenRepository;
