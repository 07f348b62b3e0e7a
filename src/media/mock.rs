use super::{FetchedImage, ImageFetcher, PhotoHit, PhotoSearchService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockPhotoSearch {
    name: String,
    hits: Vec<PhotoHit>,
    fail: bool,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockPhotoSearch {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            hits: Vec::new(),
            fail: false,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_hits(mut self, hits: Vec<PhotoHit>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn get_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotoSearchService for MockPhotoSearch {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, per_page: u32) -> Result<Vec<PhotoHit>> {
        self.queries.lock().unwrap().push(query.to_string());

        if self.fail {
            return Err(Error::PhotoSearch(format!("{} mock failure", self.name)));
        }

        Ok(self.hits.iter().take(per_page as usize).cloned().collect())
    }
}

/// Serves a small JPEG for every URL unless told otherwise.
#[derive(Clone)]
pub struct MockImageFetcher {
    images: Arc<Mutex<HashMap<String, FetchedImage>>>,
    failures: Arc<Mutex<HashSet<String>>>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MockImageFetcher {
    pub fn new() -> Self {
        Self {
            images: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
            fetched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image(self, url: &str, image: FetchedImage) -> Self {
        self.images.lock().unwrap().insert(url.to_string(), image);
        self
    }

    pub fn with_failure(self, url: &str) -> Self {
        self.failures.lock().unwrap().insert(url.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }

    pub fn get_fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl Default for MockImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        self.fetched.lock().unwrap().push(url.to_string());

        if self.failures.lock().unwrap().contains(url) {
            return Err(Error::Timeout(format!("mock download of {}", url)));
        }

        Ok(self
            .images
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| FetchedImage {
                content_type: "image/jpeg".to_string(),
                bytes: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10],
            }))
    }
}
