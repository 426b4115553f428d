use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    app::state::{PanelState, Recommendations, Tab},
    platform::Platform,
    saavn::{MusicService, ServiceError, Track},
};

pub const NOT_CONFIGURED_MSG: &str = "JioSaavn integration not configured properly.";
pub const RECOMMENDATIONS_FAILED_MSG: &str =
    "Unable to load JioSaavn recommendations. Please try again later.";
pub const SEARCH_FAILED_MSG: &str = "Search failed. Please try again.";

/// A service call the controller has decided to make.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Recommendations { emotion: String },
    Search { query: String },
}

/// The outcome of a [`Request`], fed back through [`PanelController::complete`].
#[derive(Debug)]
pub enum Response {
    Recommendations(Result<Recommendations, ServiceError>),
    Search(Result<Vec<Track>, ServiceError>),
}

/// Runs a request against the catalog. Free of controller state so it can
/// run on a spawned task.
pub async fn execute(service: &dyn MusicService, request: Request) -> Response {
    match request {
        Request::Recommendations { emotion } => {
            let result = service
                .get_emotion_based_recommendations(&emotion)
                .await
                .map(|raw| Recommendations {
                    tracks: raw
                        .tracks
                        .into_iter()
                        .map(|t| service.convert_to_track(t, &emotion))
                        .collect(),
                    playlists: raw.playlists,
                });
            Response::Recommendations(result)
        }
        Request::Search { query } => {
            Response::Search(service.search_tracks_by_query(&query).await)
        }
    }
}

/// `minutes:ss`. There is no hour field, so an hour-long track reads "61:01".
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub struct PanelController {
    state: PanelState,
    service: Arc<dyn MusicService>,
    platform: Arc<dyn Platform>,
}

impl PanelController {
    pub fn new(service: Arc<dyn MusicService>, platform: Arc<dyn Platform>) -> Self {
        PanelController {
            state: PanelState::default(),
            service,
            platform,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn service(&self) -> Arc<dyn MusicService> {
        self.service.clone()
    }

    // ── Inputs ───────────────────────────────────────────────────────────────

    /// A new emotion reloads recommendations when the panel is showing.
    /// Setting the same label again does nothing.
    pub fn set_emotion(&mut self, emotion: impl Into<String>) -> Option<Request> {
        let emotion = emotion.into();
        if emotion == self.state.emotion {
            return None;
        }
        self.state.emotion = emotion;
        if self.state.is_visible {
            self.begin_recommendations()
        } else {
            None
        }
    }

    pub fn set_visible(&mut self, visible: bool) -> Option<Request> {
        if visible == self.state.is_visible {
            return None;
        }
        self.state.is_visible = visible;
        if visible {
            self.begin_recommendations()
        } else {
            None
        }
    }

    /// Hides the panel and silences any preview it started.
    pub fn close(&mut self) {
        self.set_visible(false);
        self.platform.stop();
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.state.active_tab = tab;
    }

    #[cfg(test)]
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.state.search_query.push(c);
    }

    pub fn pop_query_char(&mut self) {
        self.state.search_query.pop();
    }

    // ── Request lifecycle ────────────────────────────────────────────────────

    /// Returns the request to run, or `None` when there is nothing to load:
    /// no emotion yet, or the service can't be used (which sets the error).
    pub fn begin_recommendations(&mut self) -> Option<Request> {
        if self.state.emotion.trim().is_empty() {
            return None;
        }
        if !self.service.is_configured() {
            warn!("Music service not configured, skipping recommendations");
            self.state.error = Some(NOT_CONFIGURED_MSG.to_string());
            return None;
        }

        self.state.is_loading = true;
        self.state.error = None;
        Some(Request::Recommendations {
            emotion: self.state.emotion.clone(),
        })
    }

    pub fn begin_search(&mut self) -> Option<Request> {
        if self.state.search_query.trim().is_empty() {
            return None;
        }
        self.state.is_searching = true;
        self.state.error = None;
        Some(Request::Search {
            query: self.state.search_query.clone(),
        })
    }

    /// Applies a finished request. Responses are taken in arrival order; a
    /// stale one can overwrite fresher results.
    pub fn complete(&mut self, response: Response) {
        match response {
            Response::Recommendations(result) => {
                self.state.is_loading = false;
                match result {
                    Ok(recs) => {
                        info!(
                            "Loaded {} tracks, {} playlists",
                            recs.tracks.len(),
                            recs.playlists.len()
                        );
                        self.state.recommendations = recs;
                    }
                    Err(e) => {
                        error!("Failed to load recommendations: {e}");
                        self.state.error = Some(RECOMMENDATIONS_FAILED_MSG.to_string());
                    }
                }
            }
            Response::Search(result) => {
                self.state.is_searching = false;
                match result {
                    Ok(tracks) => {
                        info!("Search returned {} tracks", tracks.len());
                        self.state.search_results = tracks;
                        self.state.active_tab = Tab::Search;
                    }
                    Err(e) => {
                        error!("Search failed: {e}");
                        self.state.error = Some(SEARCH_FAILED_MSG.to_string());
                    }
                }
            }
        }
    }

    pub async fn load_recommendations(&mut self) {
        if let Some(request) = self.begin_recommendations() {
            let response = execute(self.service.as_ref(), request).await;
            self.complete(response);
        }
    }

    pub async fn search(&mut self) {
        if let Some(request) = self.begin_search() {
            let response = execute(self.service.as_ref(), request).await;
            self.complete(response);
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────────

    pub fn play(&self, track: &Track) {
        match track.preview_url.as_deref() {
            Some(preview) if track.has_preview() => self.platform.play_preview(preview),
            _ => self.open_externally(&track.external_url),
        }
    }

    pub fn open_externally(&self, url: &str) {
        self.platform.open_external(url);
    }
}
