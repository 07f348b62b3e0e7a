//! Media resolver: find one photo that matches the day's theme keyword.
//!
//! Providers are searched in priority order. Each hit is downloaded, checked
//! locally, and then submitted to the vision relevance check; the first
//! approved URL wins. Nothing in here is fatal. Every failure is logged and
//! the resolver moves on, ending with `None` when nothing qualifies.

pub mod candidate;
pub mod fetch;
pub mod mock;
pub mod pexels;
pub mod unsplash;

pub use candidate::{FetchedImage, Rejection, MAX_IMAGE_BYTES};
pub use fetch::HttpImageFetcher;
pub use mock::{MockImageFetcher, MockPhotoSearch};
pub use pexels::PexelsClient;
pub use unsplash::UnsplashClient;

use crate::ai::RelevanceService;
use crate::models::ImageCandidate;
use crate::Result;
use async_trait::async_trait;

/// Appended to every search so results lean towards plated food.
pub const DEFAULT_QUERY_SUFFIX: &str = "food closeup";

/// One search result with a directly downloadable URL.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoHit {
    pub id: String,
    pub url: String,
    pub alt: Option<String>,
}

#[async_trait]
pub trait PhotoSearchService: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    async fn search(&self, query: &str, per_page: u32) -> Result<Vec<PhotoHit>>;
}

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage>;
}

/// Per-provider search limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaLimits {
    /// Vision checks allowed per provider.
    pub max_candidates: usize,
    pub per_page: u32,
}

impl Default for MediaLimits {
    fn default() -> Self {
        Self {
            max_candidates: 2,
            per_page: 3,
        }
    }
}

pub struct MediaResolver {
    providers: Vec<Box<dyn PhotoSearchService>>,
    fetcher: Box<dyn ImageFetcher>,
    relevance: Box<dyn RelevanceService>,
    limits: MediaLimits,
    query_suffix: String,
}

impl MediaResolver {
    pub fn new(
        providers: Vec<Box<dyn PhotoSearchService>>,
        fetcher: Box<dyn ImageFetcher>,
        relevance: Box<dyn RelevanceService>,
        limits: MediaLimits,
    ) -> Self {
        Self {
            providers,
            fetcher,
            relevance,
            limits,
            query_suffix: DEFAULT_QUERY_SUFFIX.to_string(),
        }
    }

    pub fn with_query_suffix(mut self, suffix: &str) -> Self {
        self.query_suffix = suffix.trim().to_string();
        self
    }

    /// False when no photo provider is configured.
    pub fn is_enabled(&self) -> bool {
        !self.providers.is_empty()
    }

    fn query_for(&self, keyword: &str) -> String {
        if self.query_suffix.is_empty() {
            keyword.to_string()
        } else {
            format!("{} {}", keyword, self.query_suffix)
        }
    }

    /// Return the first approved image URL for `keyword`, or `None`.
    pub async fn resolve(&self, keyword: &str) -> Option<String> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            tracing::warn!("Empty theme keyword; skipping media resolution");
            return None;
        }

        let words = keyword.split_whitespace().count();
        if words > 3 {
            tracing::warn!(
                "Theme keyword '{}' has {} words; searching with it anyway",
                keyword,
                words
            );
        }

        let query = self.query_for(keyword);
        for provider in &self.providers {
            if let Some(url) = self.search_provider(provider.as_ref(), &query, keyword).await {
                return Some(url);
            }
        }

        tracing::warn!("No relevant image found for '{}' from any provider", keyword);
        None
    }

    async fn search_provider(
        &self,
        provider: &dyn PhotoSearchService,
        query: &str,
        theme: &str,
    ) -> Option<String> {
        let hits = match provider.search(query, self.limits.per_page).await {
            Ok(hits) if hits.is_empty() => {
                tracing::warn!("{} returned no results for '{}'", provider.name(), query);
                return None;
            }
            Ok(hits) => hits,
            Err(e) => {
                tracing::error!("{} search for '{}' failed: {}", provider.name(), query, e);
                return None;
            }
        };

        let mut checked = 0;
        for hit in &hits {
            if checked >= self.limits.max_candidates {
                tracing::info!(
                    "Reached the {} vision check limit for '{}' on {}",
                    self.limits.max_candidates,
                    theme,
                    provider.name()
                );
                break;
            }

            tracing::info!(
                "Checking {} candidate {} ({})",
                provider.name(),
                hit.url,
                hit.alt.as_deref().unwrap_or("N/A")
            );

            let fetched = match self.fetcher.fetch(&hit.url).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    tracing::error!("Failed to download {}: {}", hit.url, e);
                    continue;
                }
            };

            let candidate = match ImageCandidate::from_download(hit.url.clone(), fetched) {
                Ok(candidate) => candidate,
                Err(rejection) => {
                    tracing::warn!("Skipping {}: {}", hit.url, rejection);
                    continue;
                }
            };

            checked += 1;
            match self.relevance.is_relevant(&candidate, theme).await {
                Ok(true) => {
                    tracing::info!("Image {} approved for '{}'", hit.url, theme);
                    return Some(hit.url.clone());
                }
                Ok(false) => tracing::info!("Image {} rejected for '{}'", hit.url, theme),
                Err(e) => tracing::error!("Relevance check for {} failed: {}", hit.url, e),
            }
        }

        tracing::warn!(
            "{}: checked {} of {} results for '{}' without a match",
            provider.name(),
            checked,
            hits.len(),
            theme
        );
        None
    }
}
