use async_trait::async_trait;
use thiserror::Error;

pub mod client;
pub mod models;
pub mod moods;

pub use self::models::{Playlist, RawRecommendations, RawTrack, Track};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned HTTP {0}")]
    Status(u16),

    #[error("catalog error: {0}")]
    Api(String),
}

/// Everything the panel needs from the music catalog.
#[async_trait]
pub trait MusicService: Send + Sync {
    /// Whether requests can be attempted at all.
    fn is_configured(&self) -> bool;

    async fn get_emotion_based_recommendations(
        &self,
        emotion: &str,
    ) -> Result<RawRecommendations, ServiceError>;

    async fn search_tracks_by_query(&self, query: &str) -> Result<Vec<Track>, ServiceError>;

    /// Turns a catalog song into a [`Track`] tagged with `emotion`.
    fn convert_to_track(&self, raw: RawTrack, emotion: &str) -> Track;
}
