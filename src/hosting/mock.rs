use super::ImageHost;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Fails the first `failures` uploads, then returns `https://img.mock/<name>`.
#[derive(Clone)]
pub struct MockImageHost {
    failures: usize,
    uploads: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockImageHost {
    pub fn new() -> Self {
        Self {
            failures: 0,
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failures(mut self, failures: usize) -> Self {
        self.failures = failures;
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    /// `(name, byte length)` per upload attempt.
    pub fn get_uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Default for MockImageHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageHost for MockImageHost {
    async fn upload(&self, data: &[u8], name: &str) -> Result<String> {
        let attempt = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push((name.to_string(), data.len()));
            uploads.len()
        };

        if attempt <= self.failures {
            return Err(Error::ImageHost(format!("mock upload failure #{}", attempt)));
        }

        Ok(format!("https://img.mock/{}", name))
    }
}
