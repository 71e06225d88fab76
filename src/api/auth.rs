use std::collections::HashMap;

use axum::{
    Extension,
    extract::{Path, Query},
    response::Redirect,
};
use reqwest::Url;

use crate::{api::ApiError, server::AppState, types::Provider, warning};

fn parse_provider(provider: &str) -> Result<Provider, ApiError> {
    provider.parse().map_err(ApiError::NotFound)
}

/// `GET /auth/{provider}`: sends the browser to the provider's consent page.
pub async fn authorize(
    Path(provider): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Redirect, ApiError> {
    let provider = parse_provider(&provider)?;
    let session = state.session(provider);
    let settings = session.settings();

    let url = session
        .authorization_url(&settings.scope, &settings.redirect_uri)
        .map_err(|e| ApiError::upstream(e, "Failed to build authorization URL"))?;

    Ok(Redirect::to(url.as_str()))
}

/// `GET /auth/{provider}/callback?code=...`: completes the authorization-code
/// flow and sends the browser back to the dashboard with a
/// `?{provider}=connected` marker.
pub async fn callback(
    Path(provider): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Result<Redirect, ApiError> {
    let provider = parse_provider(&provider)?;

    let Some(code) = params.get("code").filter(|c| !c.is_empty()) else {
        if let Some(reason) = params.get("error") {
            warning!("{} authorization was declined: {}", provider, reason);
        }
        return Err(ApiError::BadRequest(
            "Missing authorization code".to_string(),
        ));
    };

    let session = state.session(provider);
    session
        .exchange_code(code, &session.settings().redirect_uri)
        .await
        .map_err(|e| {
            warning!("{} auth error: {}", provider, e);
            ApiError::Upstream(format!("Failed to authenticate with {provider}"))
        })?;

    Ok(Redirect::to(&connected_redirect(
        &state.settings.frontend_url,
        provider,
    )))
}

fn connected_redirect(frontend_url: &str, provider: Provider) -> String {
    match Url::parse(frontend_url) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .append_pair(provider.slug(), "connected");
            url.to_string()
        }
        Err(_) => format!("{frontend_url}?{}=connected", provider.slug()),
    }
}
