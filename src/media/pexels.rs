use super::{PhotoHit, PhotoSearchService};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.pexels.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    src: Option<PexelsSources>,
    alt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PexelsSources {
    large: Option<String>,
}

pub struct PexelsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PexelsClient {
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
impl PhotoSearchService for PexelsClient {
    fn name(&self) -> &str {
        "pexels"
    }

    async fn search(&self, query: &str, per_page: u32) -> Result<Vec<PhotoHit>> {
        let response = self
            .client
            .get(format!("{}/v1/search", self.base_url))
            .timeout(Duration::from_secs(20))
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query.to_string()),
                ("page", "1".to_string()),
                ("per_page", per_page.to_string()),
                ("orientation", "square".to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::from_request(e, "Pexels search"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::PhotoSearch(format!(
                "Pexels search failed (status {}): {}",
                status, body
            )));
        }

        let data: SearchResponse = response.json().await?;
        Ok(data
            .photos
            .into_iter()
            .filter_map(|photo| {
                let url = photo.src.and_then(|s| s.large)?;
                Some(PhotoHit {
                    id: photo.id.to_string(),
                    url,
                    alt: photo.alt.filter(|a| !a.is_empty()),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_maps_photos() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(header("Authorization", "pexels-key"))
            .and(query_param("query", "strawberry cake food closeup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photos": [
                    {"id": 101, "src": {"large": "https://pexels.test/101.jpeg"}, "alt": "cake"},
                    {"id": 102, "src": {}, "alt": ""}
                ]
            })))
            .mount(&server)
            .await;

        let hits = PexelsClient::new("pexels-key".to_string())
            .with_base_url(server.uri())
            .search("strawberry cake food closeup", 3)
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "101");
        assert_eq!(hits[0].url, "https://pexels.test/101.jpeg");
    }

    #[tokio::test]
    async fn test_empty_result_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"photos": []})))
            .mount(&server)
            .await;

        let hits = PexelsClient::new("k".to_string())
            .with_base_url(server.uri())
            .search("tea", 3)
            .await
            .unwrap();
        assert!(hits.is_empty());
    }
}
