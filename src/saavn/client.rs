use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::Config;
use super::{
    models::{
        ApiResponse, Playlist, RawPlaylistDetail, RawPlaylistSummary, RawRecommendations,
        RawTrack, SearchPage, Track,
    },
    moods::MoodQuery,
    MusicService, ServiceError,
};

/// Client for the public JioSaavn JSON API.
pub struct SaavnClient {
    http: reqwest::Client,
    base_url: String,
    result_limit: u32,
    playlist_limit: u32,
}

impl SaavnClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("moodtunes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(SaavnClient {
            http,
            base_url: config.api_url.clone(),
            result_limit: config.result_limit,
            playlist_limit: config.playlist_limit,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, ServiceError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!("GET {url}");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        let body: ApiResponse<T> = resp.json().await?;
        body.into_data()
    }

    async fn search_songs(&self, query: &str) -> Result<Vec<RawTrack>, ServiceError> {
        let page: SearchPage<RawTrack> = self
            .get(&format!(
                "/api/search/songs?query={}&limit={}",
                urlencoding::encode(query),
                self.result_limit
            ))
            .await?;
        debug!("'{query}': {} of {} songs", page.results.len(), page.total);
        Ok(page.results)
    }

    async fn search_playlists(&self, query: &str) -> Result<Vec<RawPlaylistSummary>, ServiceError> {
        let page: SearchPage<RawPlaylistSummary> = self
            .get(&format!(
                "/api/search/playlists?query={}&limit={}",
                urlencoding::encode(query),
                self.playlist_limit
            ))
            .await?;
        Ok(page.results)
    }

    /// Falls back to the bare search summary (no tracks) if the detail
    /// request fails.
    async fn playlist_with_tracks(&self, summary: RawPlaylistSummary) -> Playlist {
        let path = format!(
            "/api/playlists?id={}&limit={}",
            urlencoding::encode(&summary.id),
            self.result_limit
        );
        match self.get::<RawPlaylistDetail>(&path).await {
            Ok(detail) => detail.into_playlist(),
            Err(e) => {
                warn!("Playlist {} details unavailable: {e}", summary.id);
                summary.into_playlist()
            }
        }
    }
}

#[async_trait]
impl MusicService for SaavnClient {
    fn is_configured(&self) -> bool {
        Url::parse(&self.base_url)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
            .unwrap_or(false)
    }

    async fn get_emotion_based_recommendations(
        &self,
        emotion: &str,
    ) -> Result<RawRecommendations, ServiceError> {
        let mood = MoodQuery::for_emotion(emotion);
        info!("Fetching recommendations for '{emotion}' ({})", mood.songs);

        let tracks = self.search_songs(&mood.songs).await?;
        let summaries = self.search_playlists(&mood.playlists).await?;
        let playlists = join_all(
            summaries
                .into_iter()
                .map(|summary| self.playlist_with_tracks(summary)),
        )
        .await;

        Ok(RawRecommendations { tracks, playlists })
    }

    async fn search_tracks_by_query(&self, query: &str) -> Result<Vec<Track>, ServiceError> {
        let songs = self.search_songs(query).await?;
        Ok(songs.into_iter().map(|s| s.into_track(None)).collect())
    }

    fn convert_to_track(&self, raw: RawTrack, emotion: &str) -> Track {
        raw.into_track(Some(emotion))
    }
}
