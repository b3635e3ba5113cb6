//! Test fixtures for store integration tests
//!
//! Provides reusable test data builders and seed helpers. Builders are
//! random by default so parallel tests never collide on unique columns.

#![allow(dead_code)]

use fake::faker::lorem::en::Words;
use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

use tuneswipe_store::models::{
    NewPlaylist, NewSocialPost, NewSong, NewUser, Playlist, SocialPost, Song, User,
};
use tuneswipe_store::Store;

/// Generate a unique email so tests never collide on the unique index
pub fn unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4())
}

/// A user with random name and unique email
pub fn random_user() -> NewUser {
    NewUser {
        name: Some(Name().fake()),
        email: unique_email(),
        image: None,
    }
}

/// A song with random metadata and a unique external id
pub fn random_song() -> NewSong {
    let title: Vec<String> = Words(2..4).fake();
    NewSong {
        title: title.join(" "),
        artist: Name().fake(),
        album: Some(Words(2..4).fake::<Vec<String>>().join(" ")),
        external_id: format!("spotify:track:{}", Uuid::new_v4()),
        duration_ms: (120_000..360_000).fake(),
    }
}

/// A song with known data, for assertions on exact values
pub fn known_song() -> NewSong {
    NewSong {
        title: "Bohemian Rhapsody".to_string(),
        artist: "Queen".to_string(),
        album: Some("A Night at the Opera".to_string()),
        external_id: format!("spotify:track:known_{}", Uuid::new_v4()),
        duration_ms: 355_000,
    }
}

/// A private playlist with a random name
pub fn random_playlist() -> NewPlaylist {
    NewPlaylist {
        name: Words(2..4).fake::<Vec<String>>().join(" "),
        is_public: false,
    }
}

// ========== Seed Helpers ==========
//
// Insert through the store so every fixture row goes through the same
// code paths production does.

pub async fn seed_user(store: &Store) -> User {
    store
        .users()
        .create(random_user())
        .await
        .expect("failed to seed user")
}

pub async fn seed_song(store: &Store) -> Song {
    store
        .songs()
        .import(random_song())
        .await
        .expect("failed to seed song")
}

pub async fn seed_playlist(store: &Store, owner_id: Uuid) -> Playlist {
    store
        .playlists()
        .create(owner_id, random_playlist())
        .await
        .expect("failed to seed playlist")
}

/// Seed a playlist and share it to the feed in one step
pub async fn seed_post(store: &Store, author_id: Uuid) -> SocialPost {
    let playlist = seed_playlist(store, author_id).await;
    store
        .posts()
        .share(
            author_id,
            NewSocialPost {
                playlist_id: playlist.id,
                caption: Some("check this out".to_string()),
            },
        )
        .await
        .expect("failed to seed post")
}
