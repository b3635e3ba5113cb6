//! Database models for the TuneSwipe store
//!
//! One module per aggregate. Query-argument structs (`New*`, `Update*`)
//! live next to the entity they create or patch, and aggregate row types
//! (counts, stats) next to the queries that produce them.

pub mod account;
pub mod comment;
pub mod follow;
pub mod like;
pub mod playlist;
pub mod session;
pub mod social;
pub mod song;
pub mod swipe;
pub mod user;

pub use account::{Account, NewAccount, ProviderCount, UpdateAccountTokens};
pub use comment::{Comment, NewComment, PostCommentCount};
pub use follow::{Follow, FollowCounts};
pub use like::{Like, PostLikeCount};
pub use playlist::{
    NewPlaylist, Playlist, PlaylistEntry, PlaylistSong, PlaylistStats, UpdatePlaylist,
};
pub use session::{Session, SessionWithUser, VerificationToken};
pub use social::{FeedPost, NewSocialPost, PostEngagement, SocialPost, UpdateSocialPost};
pub use song::{ArtistSongCount, NewSong, Song, SongDurationStats};
pub use swipe::{NewSwipe, SwipeAction, SwipeDirection, SwipeSummary};
pub use user::{NewUser, UpdateUser, User, UserProfileStats};
