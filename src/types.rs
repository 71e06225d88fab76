use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The OAuth providers the dashboard keeps a session for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Spotify,
    Strava,
}

impl Provider {
    /// Lowercase identifier used in routes and redirect markers.
    pub fn slug(&self) -> &'static str {
        match self {
            Provider::Spotify => "spotify",
            Provider::Strava => "strava",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Spotify => "Spotify",
            Provider::Strava => "Strava",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spotify" => Ok(Provider::Spotify),
            "strava" => Ok(Provider::Strava),
            other => Err(format!("Unknown provider: {other}")),
        }
    }
}

/// An in-memory OAuth session token.
///
/// `scope`, `expires_in` and `obtained_at` are informational: refresh is
/// driven by 401 responses, not by expiry.
#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body of a successful `grant_type=authorization_code` or
/// `grant_type=refresh_token` response. Both providers share this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

// Spotify wire types

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlayingResponse {
    #[serde(default)]
    pub is_playing: bool,
    pub item: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    pub album: Option<SpotifyAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylist {
    pub name: String,
    pub tracks: PlaylistTracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracks {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<SpotifyTrack>,
}

// Strava wire types

#[derive(Debug, Clone, Deserialize)]
pub struct StravaActivity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub moving_time: u64,
    pub start_date: DateTime<Utc>,
}

// OpenWeatherMap wire types

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
    pub main: WeatherMain,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
}

// View projections served to the dashboard

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NowPlayingView {
    Playing {
        #[serde(rename = "currentTrack")]
        current_track: CurrentTrack,
    },
    Idle {
        #[serde(rename = "isPlaying")]
        is_playing: bool,
    },
}

impl NowPlayingView {
    pub fn idle() -> Self {
        NowPlayingView::Idle { is_playing: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTrack {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub album_art: Option<String>,
    pub is_playing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistView {
    pub name: String,
    pub tracks: Vec<PlaylistTrackView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrackView {
    pub name: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummaryView {
    pub recent_runs: Vec<RunView>,
    pub weekly_mileage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunView {
    pub name: String,
    pub distance: String,
    pub duration: String,
    pub pace: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherView {
    pub temp: i64,
    pub condition: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: &'static str,
    pub author: &'static str,
    pub progress: u8,
    pub cover_url: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shoe {
    pub brand: &'static str,
    pub model: &'static str,
    pub miles: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_miles: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoeRotation {
    pub current: Shoe,
    pub retired: Vec<Shoe>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub url: &'static str,
    pub caption: &'static str,
}

/// Everything the dashboard renders, fetched in one round trip.
///
/// Sections whose upstream call failed are `None` and carry a message under
/// the same key in `errors`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub now_playing: Option<NowPlayingView>,
    pub running_playlist: Option<PlaylistView>,
    pub activities: Option<ActivitySummaryView>,
    pub weather: Option<WeatherView>,
    pub book: Book,
    pub shoes: ShoeRotation,
    pub posts: Vec<Post>,
    pub errors: BTreeMap<&'static str, String>,
}
