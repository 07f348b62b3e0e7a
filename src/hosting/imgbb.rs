use super::ImageHost;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.imgbb.com";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: Option<String>,
}

pub struct ImgbbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ImgbbClient {
    pub fn new(api_key: String) -> Self {
        Self::new_with_client(api_key, Client::new())
    }

    pub fn new_with_client(api_key: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl ImageHost for ImgbbClient {
    async fn upload(&self, data: &[u8], name: &str) -> Result<String> {
        let encoded = BASE64.encode(data);

        let response = self
            .client
            .post(format!("{}/1/upload", self.base_url))
            .timeout(Duration::from_secs(30))
            .query(&[("key", self.api_key.as_str())])
            .form(&[("image", encoded.as_str()), ("name", name)])
            .send()
            .await
            .map_err(|e| Error::from_request(e, "imgbb upload"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ImageHost(format!(
                "imgbb upload failed (status {}): {}",
                status, body
            )));
        }

        let body: UploadResponse = response.json().await?;
        match body.data.and_then(|d| d.url) {
            Some(url) if body.success => Ok(url),
            _ => Err(Error::ImageHost(
                "imgbb response did not contain a URL".to_string(),
            )),
        }
    }
}
