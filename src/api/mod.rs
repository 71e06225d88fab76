//! # API Module
//!
//! HTTP handlers for the dashboard backend, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`authorize`] - `GET /auth/{provider}` redirects to the provider's consent page
//! - [`callback`] - `GET /auth/{provider}/callback` exchanges the code for tokens
//!
//! ### Dashboard Data
//!
//! - [`now_playing`] - `GET /api/spotify/now-playing`
//! - [`running_playlist`] - `GET /api/spotify/running-playlist`
//! - [`activities`] - `GET /api/strava/activities`
//! - [`weather`] - `GET /api/weather?lat=&lon=`
//! - [`book`], [`shoes`], [`posts`] - static profile data
//! - [`dashboard`] - all of the above in one response
//!
//! ### Monitoring
//!
//! - [`health`] - status, version and connected providers
//!
//! ## Errors
//!
//! Handlers answer failures with [`ApiError`], rendered as `{ "error": "..." }`:
//! 400 for missing input, 401 when the provider session is not connected,
//! 404 for unknown providers and 500 for any upstream failure.

mod auth;
mod dashboard;
mod error;
mod health;

pub use auth::{authorize, callback};
pub use dashboard::{
    Coordinates, activities, book, dashboard, now_playing, posts, running_playlist, shoes, weather,
};
pub use error::ApiError;
pub use health::health;
