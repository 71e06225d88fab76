use chrono::Utc;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde_json::json;
use tokio::sync::Mutex;

use crate::{
    config::ProviderSettings,
    error::{Error, Result},
    success,
    types::{Provider, Token, TokenResponse},
    warning,
};

/// In-memory OAuth session for one provider.
///
/// Holds the access and refresh token obtained through the authorization-code
/// flow. The session starts empty, is populated by [`exchange_code`], and its
/// access token is replaced by [`refresh`]. Nothing is persisted; a restart
/// means reconnecting.
///
/// # Token Lifecycle
///
/// ```text
/// Unauthenticated --exchange_code--> Authenticated --refresh--> Authenticated
/// ```
///
/// There is no revoked state. A token that keeps failing makes every request
/// fail after one refresh attempt.
///
/// # Concurrency
///
/// Token state sits behind an async mutex and refreshes are serialized. When
/// several requests hit a 401 with the same stale token, only the first one
/// refreshes; the others retry with the token it obtained.
///
/// [`exchange_code`]: TokenSession::exchange_code
/// [`refresh`]: TokenSession::refresh
pub struct TokenSession {
    provider: Provider,
    settings: ProviderSettings,
    client: Client,
    token: Mutex<Option<Token>>,
    refresh_lock: Mutex<()>,
}

impl TokenSession {
    pub fn new(provider: Provider, settings: ProviderSettings, client: Client) -> Self {
        TokenSession {
            provider,
            settings,
            client,
            token: Mutex::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.lock().await.is_some()
    }

    pub async fn current_token(&self) -> Option<Token> {
        self.token.lock().await.clone()
    }

    /// Replaces the held token.
    pub async fn set_token(&self, token: Token) {
        *self.token.lock().await = Some(token);
    }

    async fn access_token(&self) -> Option<String> {
        self.token
            .lock()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Builds the provider's authorize URL for the given scopes and redirect URI.
    ///
    /// Pure: no request is made and no state changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the configured authorize endpoint is
    /// not a valid URL.
    pub fn authorization_url(&self, scope: &str, redirect_uri: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.settings.authorize_url,
            &[
                ("response_type", "code"),
                ("client_id", self.settings.client_id.as_str()),
                ("scope", scope),
                ("redirect_uri", redirect_uri),
            ],
        )
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.settings.authorize_url, e)))
    }

    /// Exchanges an authorization code for tokens and stores them.
    ///
    /// Spotify expects a form body with the client credentials in an HTTP
    /// Basic header. Strava expects a JSON body carrying the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`] with the provider's status and body on a
    /// non-2xx answer, or [`Error::Http`] on a transport failure. The held
    /// token is left untouched and nothing is retried.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<()> {
        let request = match self.provider {
            Provider::Spotify => self
                .client
                .post(&self.settings.token_url)
                .basic_auth(
                    &self.settings.client_id,
                    Some(&self.settings.client_secret),
                )
                .form(&[
                    ("grant_type", "authorization_code"),
                    ("code", code),
                    ("redirect_uri", redirect_uri),
                ]),
            Provider::Strava => self.client.post(&self.settings.token_url).json(&json!({
                "client_id": self.settings.client_id,
                "client_secret": self.settings.client_secret,
                "code": code,
                "grant_type": "authorization_code",
            })),
        };

        let response = self.check(request.send().await?).await?;
        let body: TokenResponse = response.json().await?;

        self.set_token(Token {
            expires_in: body.expires_in.unwrap_or(3600),
            access_token: body.access_token,
            refresh_token: body.refresh_token,
            scope: body.scope,
            obtained_at: Utc::now().timestamp() as u64,
        })
        .await;

        success!("Connected to {}", self.provider);
        Ok(())
    }

    /// Obtains a new access token with the held refresh token.
    ///
    /// Returns `false` without a request when no refresh token is held, and
    /// `false` when the provider rejects the refresh; in both cases the prior
    /// token state is left untouched. A refresh token in the response
    /// replaces the held one, otherwise the held one is kept.
    pub async fn refresh(&self) -> bool {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> bool {
        let Some(refresh_token) = self
            .token
            .lock()
            .await
            .as_ref()
            .and_then(|t| t.refresh_token.clone())
        else {
            return false;
        };

        match self.request_refresh(&refresh_token).await {
            Ok(body) => {
                let mut lock = self.token.lock().await;
                if let Some(token) = lock.as_mut() {
                    token.access_token = body.access_token;
                    if let Some(rotated) = body.refresh_token {
                        token.refresh_token = Some(rotated);
                    }
                    if body.scope.is_some() {
                        token.scope = body.scope;
                    }
                    token.expires_in = body.expires_in.unwrap_or(3600);
                    token.obtained_at = Utc::now().timestamp() as u64;
                }
                success!("Refreshed {} access token", self.provider);
                true
            }
            Err(e) => {
                warning!("{} token refresh error: {}", self.provider, e);
                false
            }
        }
    }

    async fn request_refresh(&self, refresh_token: &str) -> Result<TokenResponse> {
        let request = match self.provider {
            Provider::Spotify => self
                .client
                .post(&self.settings.token_url)
                .basic_auth(
                    &self.settings.client_id,
                    Some(&self.settings.client_secret),
                )
                .form(&[
                    ("grant_type", "refresh_token"),
                    ("refresh_token", refresh_token),
                ]),
            Provider::Strava => self.client.post(&self.settings.token_url).json(&json!({
                "client_id": self.settings.client_id,
                "client_secret": self.settings.client_secret,
                "grant_type": "refresh_token",
                "refresh_token": refresh_token,
            })),
        };

        let response = self.check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Refreshes unless another request already replaced `stale`.
    async fn refresh_after(&self, stale: &str) -> bool {
        let _guard = self.refresh_lock.lock().await;
        match self.access_token().await {
            Some(current) if current != stale => true,
            Some(_) => self.refresh_locked().await,
            None => false,
        }
    }

    /// Sends a bearer-authorized request to the provider's API.
    ///
    /// Fails with [`Error::Unauthenticated`] before any network call when no
    /// access token is held. On a 401 the session refreshes once and, if that
    /// succeeds, retries the request exactly once with the new token. A failed
    /// refresh surfaces the original 401; a second 401 is surfaced as is.
    ///
    /// # Returns
    ///
    /// The response of the last call if its status is 2xx (including 204).
    /// Any other status becomes [`Error::Upstream`].
    pub async fn authorized_request(
        &self,
        method: Method,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<Response> {
        let Some(token) = self.access_token().await else {
            return Err(Error::Unauthenticated(self.provider));
        };

        let response = self.send(method.clone(), url, params, &token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return self.check(response).await;
        }

        warning!("{} rejected the access token, refreshing", self.provider);
        if !self.refresh_after(&token).await {
            return self.check(response).await;
        }

        let Some(token) = self.access_token().await else {
            return Err(Error::Unauthenticated(self.provider));
        };
        let retry = self.send(method, url, params, &token).await?;
        self.check(retry).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        params: &[(&str, &str)],
        token: &str,
    ) -> Result<Response> {
        let mut request = self.client.request(method, url).bearer_auth(token);
        if !params.is_empty() {
            request = request.query(params);
        }
        Ok(request.send().await?)
    }

    async fn check(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Upstream {
            service: self.provider.name(),
            status,
            body,
        })
    }
}
