//! Local acceptance checks applied to every downloaded photo.

use crate::ai::mime;
use crate::models::ImageCandidate;
use thiserror::Error;

/// Largest payload the vision check will accept.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// Raw result of downloading a candidate URL.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub content_type: String,
    /// The fetcher stops reading shortly after exceeding `MAX_IMAGE_BYTES`.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error, PartialEq)]
pub enum Rejection {
    #[error("content-type '{0}' is not an image")]
    NotAnImage(String),

    #[error("payload exceeds the 4 MiB limit (read {0} bytes)")]
    TooLarge(usize),

    #[error("format '{0}' is not supported by the vision check")]
    Unsupported(String),
}

impl ImageCandidate {
    /// Accept a download or say why it was rejected.
    pub fn from_download(url: String, fetched: FetchedImage) -> Result<Self, Rejection> {
        let content_type = fetched.content_type.trim().to_ascii_lowercase();
        if !content_type.starts_with("image/") {
            return Err(Rejection::NotAnImage(fetched.content_type));
        }

        let size = fetched.bytes.len();
        if size > MAX_IMAGE_BYTES {
            return Err(Rejection::TooLarge(size));
        }

        let mime_type = mime::vision_mime(&fetched.bytes, &content_type);
        if mime::is_vision_unsupported(&content_type) || mime::is_vision_unsupported(mime_type) {
            return Err(Rejection::Unsupported(mime_type.to_string()));
        }

        Ok(ImageCandidate {
            url,
            mime_type: mime_type.to_string(),
            size,
            bytes: fetched.bytes,
        })
    }
}
