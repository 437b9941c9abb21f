use thiserror::Error;

use postharvest_core::error::CoreError;

#[derive(Debug, Error)]
pub enum RedditError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("access token rejected for {0}")]
    Unauthorized(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("api error: {0}")]
    Api(String),
    #[error("missing data: {0}")]
    MissingData(&'static str),
    #[error("{0}")]
    Core(#[from] CoreError),
}
