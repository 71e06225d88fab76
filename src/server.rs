use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use reqwest::Client;
use tower_http::cors::CorsLayer;

use crate::{
    Res, api,
    config::{Settings, SourceKind},
    info,
    management::{DashboardSource, FixtureSource, LiveSource, TokenSession},
    types::Provider,
};

/// Everything a handler can reach. Cloned per request; the sessions and the
/// source are shared.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub spotify: Arc<TokenSession>,
    pub strava: Arc<TokenSession>,
    pub source: Arc<dyn DashboardSource>,
}

impl AppState {
    /// Builds empty provider sessions and the source selected by `settings.source`.
    pub fn new(settings: Settings) -> Self {
        let client = Client::new();
        let session = |provider| {
            Arc::new(TokenSession::new(
                provider,
                settings.provider(provider).clone(),
                client.clone(),
            ))
        };
        let spotify = session(Provider::Spotify);
        let strava = session(Provider::Strava);

        let source: Arc<dyn DashboardSource> = match settings.source {
            SourceKind::Live => Arc::new(LiveSource::new(
                Arc::clone(&spotify),
                Arc::clone(&strava),
                client,
                &settings,
            )),
            SourceKind::Fixture => Arc::new(FixtureSource),
        };

        AppState {
            settings: Arc::new(settings),
            spotify,
            strava,
            source,
        }
    }

    pub fn session(&self, provider: Provider) -> &Arc<TokenSession> {
        match provider {
            Provider::Spotify => &self.spotify,
            Provider::Strava => &self.strava,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/auth/{provider}", get(api::authorize))
        .route("/auth/{provider}/callback", get(api::callback))
        .route("/api/spotify/now-playing", get(api::now_playing))
        .route("/api/spotify/running-playlist", get(api::running_playlist))
        .route("/api/strava/activities", get(api::activities))
        .route("/api/weather", get(api::weather))
        .route("/api/book", get(api::book))
        .route("/api/shoes", get(api::shoes))
        .route("/api/posts", get(api::posts))
        .route("/api/dashboard", get(api::dashboard))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}

pub async fn start_api_server(settings: Settings) -> Res<()> {
    let port = settings.port;
    if settings.source == SourceKind::Fixture {
        info!("Serving fixture data, upstream APIs will not be called");
    }

    let app = router(AppState::new(settings));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Backend server running on http://localhost:{}", port);
    info!("To connect your accounts:");
    info!("- Spotify: http://localhost:{}/auth/spotify", port);
    info!("- Strava: http://localhost:{}/auth/strava", port);

    axum::serve(listener, app).await?;
    Ok(())
}
