use std::collections::BTreeMap;

use axum::{Extension, extract::Query, response::Json};
use serde::Deserialize;

use crate::{
    api::ApiError,
    error::Error,
    management::{current_book, recent_posts, shoe_rotation},
    server::AppState,
    types::{
        ActivitySummaryView, Book, DashboardView, NowPlayingView, PlaylistView, Post,
        ShoeRotation, WeatherView,
    },
};

const SPOTIFY_FAILED: &str = "Failed to fetch Spotify data";
const PLAYLIST_FAILED: &str = "Failed to fetch playlist";
const STRAVA_FAILED: &str = "Failed to fetch Strava data";
const WEATHER_FAILED: &str = "Failed to fetch weather data";

#[derive(Debug, Default, Deserialize)]
pub struct Coordinates {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl Coordinates {
    /// Both coordinates, if present and non-empty.
    fn pair(&self) -> Option<(&str, &str)> {
        let lat = self.lat.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let lon = self.lon.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((lat, lon))
    }
}

pub async fn now_playing(
    Extension(state): Extension<AppState>,
) -> Result<Json<NowPlayingView>, ApiError> {
    state
        .source
        .now_playing()
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(e, SPOTIFY_FAILED))
}

pub async fn running_playlist(
    Extension(state): Extension<AppState>,
) -> Result<Json<PlaylistView>, ApiError> {
    state
        .source
        .running_playlist()
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(e, PLAYLIST_FAILED))
}

pub async fn activities(
    Extension(state): Extension<AppState>,
) -> Result<Json<ActivitySummaryView>, ApiError> {
    state
        .source
        .activities()
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(e, STRAVA_FAILED))
}

/// `GET /api/weather?lat=&lon=`. Missing coordinates are rejected before any
/// outbound call.
pub async fn weather(
    Query(coordinates): Query<Coordinates>,
    Extension(state): Extension<AppState>,
) -> Result<Json<WeatherView>, ApiError> {
    let Some((lat, lon)) = coordinates.pair() else {
        return Err(ApiError::BadRequest(
            "Latitude and longitude required".to_string(),
        ));
    };

    state
        .source
        .weather(lat, lon)
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(e, WEATHER_FAILED))
}

pub async fn book() -> Json<Book> {
    Json(current_book())
}

pub async fn shoes() -> Json<ShoeRotation> {
    Json(shoe_rotation())
}

pub async fn posts() -> Json<Vec<Post>> {
    Json(recent_posts())
}

/// `GET /api/dashboard?lat=&lon=`: every section in one response.
///
/// The upstream fetches run concurrently. A failing section is `null` and its
/// message is listed under `errors`; the request itself still succeeds.
pub async fn dashboard(
    Query(coordinates): Query<Coordinates>,
    Extension(state): Extension<AppState>,
) -> Json<DashboardView> {
    let source = &state.source;
    let weather = async {
        match coordinates.pair() {
            Some((lat, lon)) => Some(source.weather(lat, lon).await),
            None => None,
        }
    };

    let (now_playing, running_playlist, activities, weather) = tokio::join!(
        source.now_playing(),
        source.running_playlist(),
        source.activities(),
        weather,
    );

    let mut errors = BTreeMap::new();
    let now_playing = section(now_playing, "nowPlaying", SPOTIFY_FAILED, &mut errors);
    let running_playlist = section(
        running_playlist,
        "runningPlaylist",
        PLAYLIST_FAILED,
        &mut errors,
    );
    let activities = section(activities, "activities", STRAVA_FAILED, &mut errors);
    let weather = weather.and_then(|w| section(w, "weather", WEATHER_FAILED, &mut errors));

    Json(DashboardView {
        now_playing,
        running_playlist,
        activities,
        weather,
        book: current_book(),
        shoes: shoe_rotation(),
        posts: recent_posts(),
        errors,
    })
}

fn section<T>(
    result: Result<T, Error>,
    key: &'static str,
    message: &str,
    errors: &mut BTreeMap<&'static str, String>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.insert(key, ApiError::upstream(e, message).message().to_string());
            None
        }
    }
}
