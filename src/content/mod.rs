//! Content requester: obtains the day's structured message with bounded
//! retries and never fails past its boundary.

pub mod payload;
pub mod placeholder;

pub use payload::ResponsePayload;

use crate::ai::ContentService;
use crate::models::{FollowUp, GenerationRequest, GenerationResult};
use crate::retry::{Delay, RetryPolicy, RetryState};
use crate::Error;

/// What the requester hands downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentOutcome {
    Generated(GenerationResult),
    /// Retries ran out; carries the user-facing substitute text.
    Placeholder(String),
}

impl ContentOutcome {
    pub fn text(&self) -> &str {
        match self {
            ContentOutcome::Generated(result) => &result.main_text,
            ContentOutcome::Placeholder(text) => text,
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        match self {
            ContentOutcome::Generated(result) => result.image_keyword.as_deref(),
            ContentOutcome::Placeholder(_) => None,
        }
    }

    pub fn follow_up(&self) -> Option<&FollowUp> {
        match self {
            ContentOutcome::Generated(result) => result.follow_up.as_ref(),
            ContentOutcome::Placeholder(_) => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ContentOutcome::Placeholder(_))
    }
}

pub struct ContentRequester {
    service: Box<dyn ContentService>,
    policy: RetryPolicy,
    delay: Box<dyn Delay>,
}

impl ContentRequester {
    pub fn new(service: Box<dyn ContentService>, policy: RetryPolicy, delay: Box<dyn Delay>) -> Self {
        Self {
            service,
            policy,
            delay,
        }
    }

    /// Run the request to success or exhaustion.
    ///
    /// Every failure kind (timeout, upstream status, safety block, undecodable
    /// or incomplete payload, blank text) is retried the same way; once the
    /// policy is exhausted the last failure picks the placeholder.
    pub async fn request(&self, request: &GenerationRequest) -> ContentOutcome {
        let total = self.policy.total_attempts();
        let mut state = RetryState::Pending;
        let mut generated: Option<GenerationResult> = None;
        let mut last_error: Option<Error> = None;

        loop {
            let attempt = match state {
                RetryState::Pending => 0,
                RetryState::Retrying { attempt, delay } => {
                    tracing::info!(
                        "Waiting {:?} before content attempt {}/{}",
                        delay,
                        attempt + 1,
                        total
                    );
                    self.delay.wait(delay).await;
                    attempt
                }
                RetryState::Succeeded | RetryState::Exhausted => break,
            };

            tracing::info!("Content attempt {}/{}", attempt + 1, total);
            match self.service.generate(request).await {
                Ok(result) => {
                    tracing::info!(
                        "Content generated on attempt {} (image keyword: {:?})",
                        attempt + 1,
                        result.image_keyword
                    );
                    generated = Some(result);
                    state = RetryState::Succeeded;
                }
                Err(err) => {
                    match &err {
                        Error::ContentBlocked(reason) => tracing::error!(
                            "Attempt {}/{}: content blocked by safety filter ({})",
                            attempt + 1,
                            total,
                            reason
                        ),
                        other => tracing::warn!(
                            "Attempt {}/{}: content generation failed: {}",
                            attempt + 1,
                            total,
                            other
                        ),
                    }
                    last_error = Some(err);
                    state = self.policy.after_failure(attempt);
                }
            }
        }

        match (generated, last_error) {
            (Some(result), _) => ContentOutcome::Generated(result),
            (None, Some(err)) => {
                tracing::error!(
                    "Content generation exhausted {} attempts; last failure: {}",
                    total,
                    err
                );
                ContentOutcome::Placeholder(placeholder::for_error(&err))
            }
            (None, None) => ContentOutcome::Placeholder(placeholder::UNKNOWN.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockContentClient, MockFailure};
    use crate::retry::RecordingDelay;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn result(text: &str, keyword: Option<&str>) -> GenerationResult {
        GenerationResult {
            main_text: text.to_string(),
            image_keyword: keyword.map(str::to_string),
            follow_up: None,
        }
    }

    fn requester(client: MockContentClient, delay: RecordingDelay) -> ContentRequester {
        ContentRequester::new(
            Box::new(client),
            RetryPolicy::new(3, Duration::from_secs(10)),
            Box::new(delay),
        )
    }

    #[tokio::test]
    async fn test_first_success_needs_no_wait() {
        let client = MockContentClient::new().with_result(result("早安", Some("apple pie")));
        let probe = client.clone();
        let delay = RecordingDelay::new();

        let outcome = requester(client, delay.clone())
            .request(&GenerationRequest::daily("go".to_string()))
            .await;

        assert_eq!(outcome.text(), "早安");
        assert_eq!(outcome.keyword(), Some("apple pie"));
        assert_eq!(probe.get_call_count(), 1);
        assert!(delay.waits().is_empty());
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures_with_backoff() {
        let client = MockContentClient::new()
            .with_failure(MockFailure::Status(503))
            .with_failure(MockFailure::Malformed)
            .with_result(result("終於", None));
        let probe = client.clone();
        let delay = RecordingDelay::new();

        let outcome = requester(client, delay.clone())
            .request(&GenerationRequest::daily("go".to_string()))
            .await;

        assert!(!outcome.is_degraded());
        assert_eq!(outcome.text(), "終於");
        assert_eq!(probe.get_call_count(), 3);
        assert_eq!(
            delay.waits(),
            vec![Duration::from_secs(10), Duration::from_secs(20)]
        );
    }

    #[tokio::test]
    async fn test_timeouts_exhaust_into_timeout_placeholder() {
        let client = MockContentClient::new().with_failure(MockFailure::Timeout);
        let probe = client.clone();
        let delay = RecordingDelay::new();

        let outcome = requester(client, delay.clone())
            .request(&GenerationRequest::daily("go".to_string()))
            .await;

        assert_eq!(outcome, ContentOutcome::Placeholder(placeholder::TIMEOUT.to_string()));
        assert_eq!(outcome.keyword(), None);
        assert_eq!(probe.get_call_count(), 4);
        assert_eq!(
            delay.waits(),
            vec![
                Duration::from_secs(10),
                Duration::from_secs(20),
                Duration::from_secs(40)
            ]
        );
    }

    #[tokio::test]
    async fn test_every_malformed_kind_yields_non_empty_placeholder() {
        for failure in [
            MockFailure::Malformed,
            MockFailure::Incomplete,
            MockFailure::Empty,
            MockFailure::Blocked("SAFETY".to_string()),
            MockFailure::Status(500),
        ] {
            let client = MockContentClient::new().with_failure(failure.clone());
            let probe = client.clone();

            let outcome = requester(client, RecordingDelay::new())
                .request(&GenerationRequest::daily("go".to_string()))
                .await;

            assert!(outcome.is_degraded(), "{:?}", failure);
            assert!(!outcome.text().trim().is_empty());
            assert!(outcome.keyword().is_none());
            assert_eq!(probe.get_call_count(), 4);
        }
    }

    #[tokio::test]
    async fn test_last_failure_selects_placeholder() {
        let client = MockContentClient::new()
            .with_failure(MockFailure::Timeout)
            .with_failure(MockFailure::Empty);

        let outcome = ContentRequester::new(
            Box::new(client),
            RetryPolicy::new(1, Duration::from_millis(1)),
            Box::new(RecordingDelay::new()),
        )
        .request(&GenerationRequest::daily("go".to_string()))
        .await;

        assert_eq!(outcome.text(), placeholder::EMPTY);
    }
}
