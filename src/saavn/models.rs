use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::ServiceError;

// ─── Domain types ────────────────────────────────────────────────────────────

/// A single playable catalog item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Length in whole seconds.
    pub duration: u32,
    pub image: String,
    pub url: String,
    pub preview_url: Option<String>,
    /// Link to the song page on jiosaavn.com
    pub external_url: String,
    pub emotion: Option<String>,
}

impl Track {
    /// Play streams the preview only when this holds; otherwise it opens the
    /// catalog page.
    pub fn has_preview(&self) -> bool {
        self.preview_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub tracks: Vec<Track>,
    pub external_url: String,
}

/// What the catalog hands back for an emotion, before the songs are
/// turned into [`Track`]s.
#[derive(Debug, Clone, Default)]
pub struct RawRecommendations {
    pub tracks: Vec<RawTrack>,
    pub playlists: Vec<Playlist>,
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> Result<T, ServiceError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(ServiceError::Api(
                self.message
                    .unwrap_or_else(|| "empty response from catalog".to_string()),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchPage<T> {
    #[serde(default)]
    pub total: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlbum {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtists {
    #[serde(default)]
    pub primary: Vec<RawArtist>,
}

/// A song record as the catalog returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrack {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration: u32,
    #[serde(default)]
    pub album: RawAlbum,
    #[serde(default)]
    pub artists: RawArtists,
    #[serde(default)]
    pub image: Vec<Link>,
    #[serde(default)]
    pub download_url: Vec<Link>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawTrack {
    /// Download links come ordered from lowest to highest bitrate: the best
    /// one is the playable stream, the smallest doubles as a preview.
    pub fn into_track(self, emotion: Option<&str>) -> Track {
        let artist = self
            .artists
            .primary
            .iter()
            .map(|a| decode_entities(&a.name))
            .collect::<Vec<_>>()
            .join(", ");

        Track {
            title: decode_entities(self.name.as_deref().unwrap_or_default()),
            artist,
            album: decode_entities(self.album.name.as_deref().unwrap_or_default()),
            duration: self.duration,
            image: best_link(&self.image),
            url: best_link(&self.download_url),
            preview_url: self.download_url.first().map(|l| l.url.clone()),
            external_url: self.url.unwrap_or_default(),
            emotion: emotion.map(str::to_string),
            id: self.id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlaylistSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Vec<Link>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub song_count: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
}

impl RawPlaylistSummary {
    pub fn into_playlist(self) -> Playlist {
        let description = match (self.song_count, self.language.as_deref()) {
            (Some(n), Some(lang)) if !lang.is_empty() => format!("{n} songs · {lang}"),
            (Some(n), _) => format!("{n} songs"),
            _ => String::new(),
        };
        Playlist {
            name: decode_entities(self.name.as_deref().unwrap_or_default()),
            description,
            image: best_link(&self.image),
            tracks: Vec::new(),
            external_url: self.url.unwrap_or_default(),
            id: self.id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlaylistDetail {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Vec<Link>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub songs: Vec<RawTrack>,
}

impl RawPlaylistDetail {
    pub fn into_playlist(self) -> Playlist {
        Playlist {
            name: decode_entities(self.name.as_deref().unwrap_or_default()),
            description: decode_entities(self.description.as_deref().unwrap_or_default()),
            image: best_link(&self.image),
            tracks: self.songs.into_iter().map(|s| s.into_track(None)).collect(),
            external_url: self.url.unwrap_or_default(),
            id: self.id,
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn best_link(links: &[Link]) -> String {
    links.last().map(|l| l.url.clone()).unwrap_or_default()
}

/// The catalog sends durations either as a number, a numeric string or null.
fn lenient_seconds<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0)
            .min(u32::MAX as u64) as u32,
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Song and album names arrive HTML-escaped.
pub fn decode_entities(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
