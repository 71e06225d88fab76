// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Duration, Utc};
use serde_json::json;

use lifedash::{
    config::{ProviderSettings, Settings, SourceKind},
    types::Token,
};

/// A fake Spotify/Strava/OpenWeatherMap living on one local port.
///
/// Token grants are told apart by their body: anything mentioning
/// `refresh_token` is a refresh, everything else a code exchange.
#[derive(Default)]
pub struct Upstream {
    pub exchange_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub api_calls: AtomicUsize,
    pub weather_calls: AtomicUsize,
    pub reject_exchange: AtomicBool,
    pub reject_refresh: AtomicBool,
    /// Refreshes also hand out a new refresh token.
    pub rotate_refresh: AtomicBool,
    /// Number of upcoming API calls answered with 401.
    pub unauthorized: AtomicUsize,
    /// API calls carrying this bearer token are answered with 401.
    pub rejected_bearer: Mutex<Option<String>>,
    /// Answer currently-playing with 204.
    pub idle: AtomicBool,
    pub basic_auth_seen: AtomicBool,
    pub bearers: Mutex<Vec<String>>,
    pub token_bodies: Mutex<Vec<String>>,
    pub queries: Mutex<Vec<String>>,
}

impl Upstream {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn bearers(&self) -> Vec<String> {
        self.bearers.lock().unwrap().clone()
    }

    pub fn token_bodies(&self) -> Vec<String> {
        self.token_bodies.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn reject_bearer(&self, token: &str) {
        *self.rejected_bearer.lock().unwrap() = Some(token.to_string());
    }

    fn authorize_api_call(&self, headers: &HeaderMap, query: Option<String>) -> Result<(), Response> {
        self.api_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.unwrap_or_default());

        let bearer = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or_default()
            .to_string();
        self.bearers.lock().unwrap().push(bearer.clone());

        let expired = self
            .unauthorized
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        let rejected = self.rejected_bearer.lock().unwrap().as_deref() == Some(bearer.as_str());

        if expired || rejected {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": { "status": 401, "message": "The access token expired" } })),
            )
                .into_response());
        }

        Ok(())
    }
}

async fn token_endpoint(State(up): State<Arc<Upstream>>, headers: HeaderMap, body: String) -> Response {
    up.token_bodies.lock().unwrap().push(body.clone());
    let basic = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Basic "));
    if basic {
        up.basic_auth_seen.store(true, Ordering::SeqCst);
    }

    let invalid_grant = || {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response()
    };

    if body.contains("refresh_token") {
        up.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if up.reject_refresh.load(Ordering::SeqCst) {
            return invalid_grant();
        }
        let mut body = json!({
            "access_token": "access-2",
            "token_type": "Bearer",
            "expires_in": 3600
        });
        if up.rotate_refresh.load(Ordering::SeqCst) {
            body["refresh_token"] = json!("refresh-2");
        }
        return Json(body).into_response();
    }

    up.exchange_calls.fetch_add(1, Ordering::SeqCst);
    if up.reject_exchange.load(Ordering::SeqCst) {
        return invalid_grant();
    }
    Json(json!({
        "access_token": "access-1",
        "refresh_token": "refresh-1",
        "token_type": "Bearer",
        "scope": "read",
        "expires_in": 3600
    }))
    .into_response()
}

async fn currently_playing(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(response) = up.authorize_api_call(&headers, query) {
        return response;
    }
    if up.idle.load(Ordering::SeqCst) {
        return StatusCode::NO_CONTENT.into_response();
    }

    Json(json!({
        "is_playing": true,
        "item": {
            "name": "Dreams",
            "artists": [{ "name": "Fleetwood Mac" }],
            "album": {
                "name": "Rumours",
                "images": [{ "url": "https://img/rumours-640" }, { "url": "https://img/rumours-64" }]
            }
        }
    }))
    .into_response()
}

async fn playlist(
    State(up): State<Arc<Upstream>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(response) = up.authorize_api_call(&headers, query) {
        return response;
    }
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "status": 404, "message": "Not found." } })),
        )
            .into_response();
    }

    let items: Vec<_> = (1..=7)
        .map(|i| {
            json!({ "track": {
                "name": format!("Song {i}"),
                "artists": [{ "name": "Band" }, { "name": "Guest" }]
            }})
        })
        .collect();

    Json(json!({ "name": "Tempo Run", "tracks": { "items": items } })).into_response()
}

async fn activities(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(response) = up.authorize_api_call(&headers, query) {
        return response;
    }

    let now = Utc::now();
    Json(json!([
        {
            "name": "Lunch Run", "type": "Run", "distance": 8046.72, "moving_time": 1800,
            "start_date": (now - Duration::hours(2)).to_rfc3339()
        },
        {
            "name": "Commute", "type": "Ride", "distance": 16093.4, "moving_time": 2700,
            "start_date": (now - Duration::hours(30)).to_rfc3339()
        },
        {
            "name": "Recovery", "type": "Run", "distance": 3218.68, "moving_time": 1200,
            "start_date": (now - Duration::days(3)).to_rfc3339()
        },
        {
            "name": "Long Run", "type": "Run", "distance": 16093.4, "moving_time": 5400,
            "start_date": (now - Duration::days(5)).to_rfc3339()
        },
        {
            "name": "Old Run", "type": "Run", "distance": 9656.04, "moving_time": 3000,
            "start_date": (now - Duration::days(10)).to_rfc3339()
        }
    ]))
    .into_response()
}

async fn weather(State(up): State<Arc<Upstream>>, RawQuery(query): RawQuery) -> Response {
    up.weather_calls.fetch_add(1, Ordering::SeqCst);
    let query = query.unwrap_or_default();
    up.queries.lock().unwrap().push(query.clone());

    if query.contains("appid=bad-key") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "cod": 401, "message": "Invalid API key." })),
        )
            .into_response();
    }

    Json(json!({
        "main": { "temp": 71.6, "feels_like": 70.2 },
        "weather": [{ "main": "Clear", "description": "clear sky" }],
        "name": "Brooklyn"
    }))
    .into_response()
}

/// Starts the fake upstream and returns it with its base URL.
pub async fn spawn_upstream() -> (Arc<Upstream>, String) {
    let upstream = Arc::new(Upstream::default());
    let app = Router::new()
        .route("/token", post(token_endpoint))
        .route("/v1/me/player/currently-playing", get(currently_playing))
        .route("/v1/playlists/{id}", get(playlist))
        .route("/api/v3/athlete/activities", get(activities))
        .route("/data/2.5/weather", get(weather))
        .with_state(Arc::clone(&upstream));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (upstream, format!("http://{addr}"))
}

pub fn provider_settings(base: &str, name: &str, api_path: &str) -> ProviderSettings {
    ProviderSettings {
        client_id: format!("{name}-client"),
        client_secret: format!("{name}-secret"),
        redirect_uri: format!("http://localhost:3001/auth/{name}/callback"),
        scope: "read".to_string(),
        authorize_url: format!("{base}/authorize"),
        token_url: format!("{base}/token"),
        api_url: format!("{base}{api_path}"),
    }
}

/// Settings pointing every upstream at `base`.
pub fn settings_for(base: &str, source: SourceKind) -> Settings {
    Settings {
        port: 0,
        frontend_url: "http://localhost:3000".to_string(),
        source,
        spotify: provider_settings(base, "spotify", "/v1"),
        spotify_playlist_id: "running".to_string(),
        strava: provider_settings(base, "strava", "/api/v3"),
        weather_api_url: format!("{base}/data/2.5"),
        weather_api_key: "weather-key".to_string(),
    }
}

pub fn token(access: &str, refresh: Option<&str>) -> Token {
    Token {
        access_token: access.to_string(),
        refresh_token: refresh.map(str::to_string),
        scope: None,
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
