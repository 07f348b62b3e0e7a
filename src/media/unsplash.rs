use super::{PhotoHit, PhotoSearchService};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: Option<String>,
    urls: Option<UnsplashUrls>,
    alt_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: Option<String>,
}

pub struct UnsplashClient {
    client: Client,
    access_key: String,
    base_url: String,
}

impl UnsplashClient {
    pub fn new(access_key: String) -> Self {
        Self::new_with_client(access_key, Client::new())
    }

    pub fn new_with_client(access_key: String, client: Client) -> Self {
        Self {
            client,
            access_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl PhotoSearchService for UnsplashClient {
    fn name(&self) -> &str {
        "unsplash"
    }

    async fn search(&self, query: &str, per_page: u32) -> Result<Vec<PhotoHit>> {
        let response = self
            .client
            .get(format!("{}/search/photos", self.base_url))
            .timeout(Duration::from_secs(20))
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .query(&[
                ("query", query.to_string()),
                ("page", "1".to_string()),
                ("per_page", per_page.to_string()),
                ("orientation", "squarish".to_string()),
                ("content_filter", "high".to_string()),
                ("order_by", "relevant".to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::from_request(e, "Unsplash search"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::PhotoSearch(format!(
                "Unsplash search failed (status {}): {}",
                status, body
            )));
        }

        let data: SearchResponse = response.json().await?;
        Ok(data
            .results
            .into_iter()
            .filter_map(|photo| {
                let id = photo.id.unwrap_or_else(|| "N/A".to_string());
                match photo.urls.and_then(|u| u.regular) {
                    Some(url) => Some(PhotoHit {
                        id,
                        url,
                        alt: photo.alt_description,
                    }),
                    None => {
                        tracing::warn!("Unsplash photo {} has no regular URL", id);
                        None
                    }
                }
            })
            .collect())
    }
}
