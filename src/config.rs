//! Configuration management for the dashboard backend.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It covers the OAuth credentials of both providers,
//! the upstream endpoints, the weather API key and the server settings.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults
//!
//! Missing credentials are never a startup error. They default to empty strings
//! and surface later as a failed upstream authentication.

use std::{env, path::PathBuf, str::FromStr};

use crate::types::Provider;

/// Loads environment variables from `.env` files.
///
/// Looks in the working directory first and then in the platform-specific
/// local data directory under `lifedash/.env`. Variables that are already set
/// are never overwritten, so the first file to define a value wins. Missing
/// files are skipped.
///
/// # Directory Structure
///
/// The data directory file lives in:
/// - Linux: `~/.local/share/lifedash/.env`
/// - macOS: `~/Library/Application Support/lifedash/.env`
/// - Windows: `%LOCALAPPDATA%/lifedash/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or if an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lifedash/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Returns the port the HTTP server binds to (`PORT`, default 3001).
///
/// An unparsable value falls back to the default.
pub fn server_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(3001)
}

/// Returns the frontend URL OAuth callbacks redirect back to.
pub fn frontend_url() -> String {
    var_or("FRONTEND_URL", "http://localhost:3000")
}

/// Returns which data source backs the dashboard endpoints.
///
/// `DASHBOARD_SOURCE=fixture` serves the fixed fixture; anything else is live.
pub fn dashboard_source() -> SourceKind {
    SourceKind::from_str(&var_or("DASHBOARD_SOURCE", "live")).unwrap_or(SourceKind::Live)
}

/// Returns the Spotify client ID (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> String {
    var_or("SPOTIFY_CLIENT_ID", "")
}

/// Returns the Spotify client secret (`SPOTIFY_CLIENT_SECRET`).
///
/// The secret should be kept confidential and never exposed in logs.
pub fn spotify_client_secret() -> String {
    var_or("SPOTIFY_CLIENT_SECRET", "")
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application settings.
pub fn spotify_redirect_uri() -> String {
    var_or(
        "SPOTIFY_REDIRECT_URI",
        "http://localhost:3001/auth/spotify/callback",
    )
}

pub fn spotify_scope() -> String {
    var_or(
        "SPOTIFY_SCOPE",
        "user-read-currently-playing user-read-playback-state playlist-read-private",
    )
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_AUTH_URL", "https://accounts.spotify.com/authorize")
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_TOKEN_URL", "https://accounts.spotify.com/api/token")
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

/// Returns the ID of the playlist shown as the running playlist.
pub fn spotify_running_playlist_id() -> String {
    var_or("SPOTIFY_RUNNING_PLAYLIST_ID", "")
}

pub fn strava_client_id() -> String {
    var_or("STRAVA_CLIENT_ID", "")
}

pub fn strava_client_secret() -> String {
    var_or("STRAVA_CLIENT_SECRET", "")
}

pub fn strava_redirect_uri() -> String {
    var_or(
        "STRAVA_REDIRECT_URI",
        "http://localhost:3001/auth/strava/callback",
    )
}

/// Returns the Strava scope. Strava separates scopes with commas.
pub fn strava_scope() -> String {
    var_or("STRAVA_SCOPE", "read,activity:read")
}

pub fn strava_apiauth_url() -> String {
    var_or("STRAVA_AUTH_URL", "https://www.strava.com/oauth/authorize")
}

pub fn strava_apitoken_url() -> String {
    var_or("STRAVA_TOKEN_URL", "https://www.strava.com/oauth/token")
}

pub fn strava_apiurl() -> String {
    var_or("STRAVA_API_URL", "https://www.strava.com/api/v3")
}

/// Returns the OpenWeatherMap API key (`OPENWEATHER_API_KEY`).
pub fn openweather_api_key() -> String {
    var_or("OPENWEATHER_API_KEY", "")
}

pub fn openweather_apiurl() -> String {
    var_or(
        "OPENWEATHER_API_URL",
        "https://api.openweathermap.org/data/2.5",
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Live,
    Fixture,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(SourceKind::Live),
            "fixture" | "fixtures" => Ok(SourceKind::Fixture),
            other => Err(format!("Unknown dashboard source: {other}")),
        }
    }
}

/// OAuth client registration and endpoints of one provider.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub authorize_url: String,
    pub token_url: String,
    pub api_url: String,
}

/// A snapshot of the whole configuration, taken once at startup and injected
/// into the server.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub frontend_url: String,
    pub source: SourceKind,
    pub spotify: ProviderSettings,
    pub spotify_playlist_id: String,
    pub strava: ProviderSettings,
    pub weather_api_url: String,
    pub weather_api_key: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            port: server_port(),
            frontend_url: frontend_url(),
            source: dashboard_source(),
            spotify: ProviderSettings {
                client_id: spotify_client_id(),
                client_secret: spotify_client_secret(),
                redirect_uri: spotify_redirect_uri(),
                scope: spotify_scope(),
                authorize_url: spotify_apiauth_url(),
                token_url: spotify_apitoken_url(),
                api_url: spotify_apiurl(),
            },
            spotify_playlist_id: spotify_running_playlist_id(),
            strava: ProviderSettings {
                client_id: strava_client_id(),
                client_secret: strava_client_secret(),
                redirect_uri: strava_redirect_uri(),
                scope: strava_scope(),
                authorize_url: strava_apiauth_url(),
                token_url: strava_apitoken_url(),
                api_url: strava_apiurl(),
            },
            weather_api_url: openweather_apiurl(),
            weather_api_key: openweather_api_key(),
        }
    }

    pub fn provider(&self, provider: Provider) -> &ProviderSettings {
        match provider {
            Provider::Spotify => &self.spotify,
            Provider::Strava => &self.strava,
        }
    }
}
