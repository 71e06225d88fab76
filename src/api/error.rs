use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{error::Error, warning};

/// Errors a handler answers with. Every variant renders as
/// `{ "error": "<message>" }`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthenticated(String),
    NotFound(String),
    Upstream(String),
}

impl ApiError {
    /// Maps an upstream failure to a response.
    ///
    /// A missing session becomes a 401. Anything else is logged with its
    /// details and collapsed into a 500 carrying only `message`.
    pub fn upstream(err: Error, message: &str) -> Self {
        match err {
            Error::Unauthenticated(provider) => {
                ApiError::Unauthenticated(format!("Not authenticated with {provider}"))
            }
            other => {
                warning!("{}: {}", message, other);
                ApiError::Upstream(message.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::Unauthenticated(m)
            | ApiError::NotFound(m)
            | ApiError::Upstream(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
