use super::{ContentService, RelevanceService};
use crate::models::{GenerationRequest, GenerationResult, ImageCandidate};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted failure for [`MockContentClient`].
#[derive(Debug, Clone)]
pub enum MockFailure {
    Timeout,
    Status(u16),
    Blocked(String),
    Malformed,
    Incomplete,
    Empty,
}

impl MockFailure {
    fn to_error(&self) -> Error {
        match self {
            MockFailure::Timeout => Error::Timeout("mock timeout".to_string()),
            MockFailure::Status(status) => {
                Error::AiProvider(format!("Gemini API error (status {}): mock", status))
            }
            MockFailure::Blocked(reason) => Error::ContentBlocked(reason.clone()),
            MockFailure::Malformed => Error::MalformedContent("mock garbage".to_string()),
            MockFailure::Incomplete => {
                Error::IncompleteContent("missing main_text_content".to_string())
            }
            MockFailure::Empty => Error::EmptyContent,
        }
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Ok(GenerationResult),
    Err(MockFailure),
}

/// Replies are consumed in order; the last one repeats once the script runs out.
#[derive(Clone)]
pub struct MockContentClient {
    replies: Arc<Mutex<Vec<Reply>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockContentClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_result(self, result: GenerationResult) -> Self {
        self.replies.lock().unwrap().push(Reply::Ok(result));
        self
    }

    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.replies.lock().unwrap().push(Reply::Err(failure));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockContentClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentService for MockContentClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        let replies = self.replies.lock().unwrap();
        let reply = match replies.len() {
            0 => Reply::Ok(GenerationResult {
                main_text: "小雲的晨報 (mock)".to_string(),
                image_keyword: Some("apple pie".to_string()),
                follow_up: None,
            }),
            len => replies[(count - 1).min(len - 1)].clone(),
        };

        match reply {
            Reply::Ok(result) => Ok(result),
            Reply::Err(failure) => Err(failure.to_error()),
        }
    }
}

/// Verdicts keyed by image URL, with a default for unknown URLs.
#[derive(Clone)]
pub struct MockRelevanceClient {
    verdicts: Arc<Mutex<HashMap<String, bool>>>,
    default_verdict: bool,
    fail: bool,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockRelevanceClient {
    pub fn new() -> Self {
        Self {
            verdicts: Arc::new(Mutex::new(HashMap::new())),
            default_verdict: false,
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_verdict(self, url: &str, relevant: bool) -> Self {
        self.verdicts
            .lock()
            .unwrap()
            .insert(url.to_string(), relevant);
        self
    }

    pub fn with_default_verdict(mut self, relevant: bool) -> Self {
        self.default_verdict = relevant;
        self
    }

    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(url, theme)` pairs in call order.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockRelevanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelevanceService for MockRelevanceClient {
    async fn is_relevant(&self, candidate: &ImageCandidate, theme: &str) -> Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push((candidate.url.clone(), theme.to_string()));

        if self.fail {
            return Err(Error::AiProvider("mock vision failure".to_string()));
        }

        Ok(self
            .verdicts
            .lock()
            .unwrap()
            .get(&candidate.url)
            .copied()
            .unwrap_or(self.default_verdict))
    }
}
