//! Error handling and custom error types
//!
//! Provides unified error handling across the pipeline using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image rendering error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Content blocked by safety filter: {0}")]
    ContentBlocked(String),

    #[error("Malformed content payload: {0}")]
    MalformedContent(String),

    #[error("Incomplete content payload: {0}")]
    IncompleteContent(String),

    #[error("Generated content has an empty main text")]
    EmptyContent,

    #[error("Weather error: {0}")]
    Weather(String),

    #[error("Photo search error: {0}")]
    PhotoSearch(String),

    #[error("Image hosting error: {0}")]
    ImageHost(String),

    #[error("Broadcast error: {0}")]
    Broadcast(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl Error {
    /// Map a transport failure, keeping timeouts distinguishable from other
    /// network errors.
    pub fn from_request(err: reqwest::Error, what: &str) -> Self {
        if err.is_timeout() {
            Error::Timeout(format!("{}: {}", what, err))
        } else {
            Error::Http(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
