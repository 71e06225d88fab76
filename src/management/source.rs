use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;

use crate::{
    config::Settings,
    error::Result,
    management::TokenSession,
    spotify, strava,
    types::{
        ActivitySummaryView, Book, CurrentTrack, NowPlayingView, PlaylistTrackView, PlaylistView,
        Post, RunView, Shoe, ShoeRotation, WeatherView,
    },
    weather,
};

/// Where the dashboard's dynamic sections come from.
///
/// The server holds one implementation behind an `Arc<dyn DashboardSource>`,
/// chosen at startup: [`LiveSource`] talks to the real APIs, [`FixtureSource`]
/// serves a fixed fixture without any network access.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn now_playing(&self) -> Result<NowPlayingView>;

    async fn running_playlist(&self) -> Result<PlaylistView>;

    async fn activities(&self) -> Result<ActivitySummaryView>;

    async fn weather(&self, lat: &str, lon: &str) -> Result<WeatherView>;
}

pub struct LiveSource {
    spotify: Arc<TokenSession>,
    strava: Arc<TokenSession>,
    client: Client,
    playlist_id: String,
    weather_api_url: String,
    weather_api_key: String,
}

impl LiveSource {
    pub fn new(
        spotify: Arc<TokenSession>,
        strava: Arc<TokenSession>,
        client: Client,
        settings: &Settings,
    ) -> Self {
        LiveSource {
            spotify,
            strava,
            client,
            playlist_id: settings.spotify_playlist_id.clone(),
            weather_api_url: settings.weather_api_url.clone(),
            weather_api_key: settings.weather_api_key.clone(),
        }
    }
}

#[async_trait]
impl DashboardSource for LiveSource {
    async fn now_playing(&self) -> Result<NowPlayingView> {
        spotify::now_playing(&self.spotify).await
    }

    async fn running_playlist(&self) -> Result<PlaylistView> {
        spotify::running_playlist(&self.spotify, &self.playlist_id).await
    }

    async fn activities(&self) -> Result<ActivitySummaryView> {
        strava::recent_activities(&self.strava, Utc::now()).await
    }

    async fn weather(&self, lat: &str, lon: &str) -> Result<WeatherView> {
        weather::current_weather(
            &self.client,
            &self.weather_api_url,
            &self.weather_api_key,
            lat,
            lon,
        )
        .await
    }
}

/// Serves the same dashboard on every call. Handy for frontend work without
/// connected accounts.
pub struct FixtureSource;

#[async_trait]
impl DashboardSource for FixtureSource {
    async fn now_playing(&self) -> Result<NowPlayingView> {
        Ok(NowPlayingView::Playing {
            current_track: CurrentTrack {
                name: "Running Up That Hill".to_string(),
                artist: "Kate Bush".to_string(),
                album: "Hounds of Love".to_string(),
                album_art: Some(
                    "https://i.scdn.co/image/ab67616d0000b273b2a2e7bb6b37c2f3f5ae908a".to_string(),
                ),
                is_playing: true,
            },
        })
    }

    async fn running_playlist(&self) -> Result<PlaylistView> {
        let tracks = [
            ("Blinding Lights", "The Weeknd"),
            ("Don't Stop Me Now", "Queen"),
            ("Eye of the Tiger", "Survivor"),
        ]
        .into_iter()
        .map(|(name, artist)| PlaylistTrackView {
            name: name.to_string(),
            artist: artist.to_string(),
        })
        .collect();

        Ok(PlaylistView {
            name: "Morning Run Mix".to_string(),
            tracks,
        })
    }

    async fn activities(&self) -> Result<ActivitySummaryView> {
        let run = |name: &str, distance: &str, duration: &str, pace: &str, date: &str| RunView {
            name: name.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            pace: pace.to_string(),
            date: date.to_string(),
        };

        Ok(ActivitySummaryView {
            recent_runs: vec![
                run("Morning Run", "5.2", "28:45", "5:32", "Today"),
                run("Evening Run", "8.1", "45:20", "5:36", "Yesterday"),
            ],
            weekly_mileage: "24.3".to_string(),
        })
    }

    async fn weather(&self, _lat: &str, _lon: &str) -> Result<WeatherView> {
        Ok(WeatherView {
            temp: 68,
            condition: "Partly Cloudy".to_string(),
            location: "Brooklyn, NY".to_string(),
        })
    }
}

/// The book currently being read.
pub fn current_book() -> Book {
    Book {
        title: "Project Hail Mary",
        author: "Andy Weir",
        progress: 67,
        cover_url: "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1597695864i/54493401.jpg",
    }
}

pub fn shoe_rotation() -> ShoeRotation {
    ShoeRotation {
        current: Shoe {
            brand: "Nike",
            model: "Pegasus 40",
            miles: 187,
            max_miles: Some(400),
        },
        retired: vec![
            Shoe {
                brand: "Hoka",
                model: "Clifton 8",
                miles: 423,
                max_miles: None,
            },
            Shoe {
                brand: "Brooks",
                model: "Ghost 14",
                miles: 456,
                max_miles: None,
            },
        ],
    }
}

pub fn recent_posts() -> Vec<Post> {
    vec![
        Post {
            url: "https://picsum.photos/seed/1/400/400",
            caption: "Brooklyn Bridge run",
        },
        Post {
            url: "https://picsum.photos/seed/2/400/400",
            caption: "Coffee fuel",
        },
        Post {
            url: "https://picsum.photos/seed/3/400/400",
            caption: "New kicks!",
        },
        Post {
            url: "https://picsum.photos/seed/4/400/400",
            caption: "Sunset run",
        },
    ]
}
