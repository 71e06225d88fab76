//! # CLI Module
//!
//! User-facing commands of the `lifedash` binary.
//!
//! - [`serve`] - runs the dashboard backend
//! - [`connect`] - opens a provider's OAuth flow in the browser
//!
//! Both read their defaults from [`Settings`]; command line flags win.

use crate::{
    config::{Settings, SourceKind},
    error, info, server,
    types::Provider,
    warning,
};

/// Runs the backend until the process is stopped.
///
/// `port` overrides `PORT`, `fixtures` forces the fixture source regardless of
/// `DASHBOARD_SOURCE`.
pub async fn serve(port: Option<u16>, fixtures: bool) {
    let mut settings = Settings::from_env();
    if let Some(port) = port {
        settings.port = port;
    }
    if fixtures {
        settings.source = SourceKind::Fixture;
    }

    if let Err(e) = server::start_api_server(settings).await {
        error!("Server stopped: {}", e);
    }
}

/// Opens the authorization flow of `provider` in the default browser.
///
/// The backend must be running: the browser is pointed at its
/// `/auth/{provider}` route, which redirects to the provider's consent page
/// and, once the user agrees, stores the tokens in the running server.
pub async fn connect(provider: Provider, port: Option<u16>) {
    let port = port.unwrap_or_else(|| Settings::from_env().port);
    let url = format!("http://localhost:{port}/auth/{}", provider.slug());

    if webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
        return;
    }

    info!("Opened {} authorization in your browser", provider);
}
