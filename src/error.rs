//! Fetch failures surfaced to the controller.
//!
//! Every variant renders to the single message string shown on
//! [`FetchState`](crate::controller::FetchState). The type is `Clone` because one
//! result can be handed to several waiters of a deduplicated request.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, or a body that could not be read
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("listing API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Body was not JSON, or not the JSON shape we expect
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Success status carrying an error body (item lookup)
    #[error("{0}")]
    Api(String),

    /// Continuation link present but without a readable `page` parameter
    #[error("malformed continuation link: {0}")]
    MalformedLink(String),

    /// Background fetch task is gone (shutdown in progress)
    #[error("fetcher stopped")]
    FetcherStopped,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
