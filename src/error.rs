use reqwest::StatusCode;
use thiserror::Error;

use crate::types::Provider;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not authenticated with {0}")]
    Unauthenticated(Provider),

    #[error("{service} responded with {status}: {body}")]
    Upstream {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
