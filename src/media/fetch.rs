use super::candidate::{FetchedImage, MAX_IMAGE_BYTES};
use super::ImageFetcher;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Downloads candidate photos, reading at most one byte past the size limit.
pub struct HttpImageFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self::new_with_client(Client::new())
    }

    pub fn new_with_client(client: Client) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(15),
        }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        let mut response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::from_request(e, "image download"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::PhotoSearch(format!(
                "image download {} returned status {}",
                url, status
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::from_request(e, "image body"))?
        {
            bytes.extend_from_slice(&chunk);
            if bytes.len() > MAX_IMAGE_BYTES {
                tracing::debug!("Stopped reading {} past the size limit", url);
                break;
            }
        }

        Ok(FetchedImage {
            content_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_bytes_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/photo.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "image/jpeg")
                    .set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]),
            )
            .mount(&server)
            .await;

        let fetched = HttpImageFetcher::new()
            .fetch(&format!("{}/photo.jpg", server.uri()))
            .await
            .unwrap();
        assert_eq!(fetched.content_type, "image/jpeg");
        assert_eq!(fetched.bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[tokio::test]
    async fn test_fetch_stops_after_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "image/jpeg")
                    .set_body_bytes(vec![7u8; MAX_IMAGE_BYTES + 4096]),
            )
            .mount(&server)
            .await;

        let fetched = HttpImageFetcher::new()
            .fetch(&format!("{}/huge.jpg", server.uri()))
            .await
            .unwrap();
        assert!(fetched.bytes.len() > MAX_IMAGE_BYTES);
        assert!(fetched.bytes.len() <= MAX_IMAGE_BYTES + 4096);
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = HttpImageFetcher::new()
            .fetch(&format!("{}/missing.jpg", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PhotoSearch(_)));
    }
}
