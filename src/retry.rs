//! Bounded exponential-backoff retry bookkeeping.
//!
//! The retry loop is an explicit state machine so callers and tests can see
//! which attempt is running and how long the next wait will be. Waiting itself
//! goes through [`Delay`], letting tests record delays instead of sleeping.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Where a retrying request currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// No attempt made yet.
    Pending,
    /// `attempt` (zero-based) will run after waiting `delay`.
    Retrying { attempt: u32, delay: Duration },
    Succeeded,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts = `max_retries + 1`.
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
        }
    }

    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait applied after the zero-based `attempt` failed.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Next state once the zero-based `attempt` has failed.
    pub fn after_failure(&self, attempt: u32) -> RetryState {
        if attempt < self.max_retries {
            RetryState::Retrying {
                attempt: attempt.saturating_add(1),
                delay: self.delay_after(attempt),
            }
        } else {
            RetryState::Exhausted
        }
    }
}

#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Real wall-clock waiting.
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records requested delays and returns immediately.
#[derive(Clone, Default)]
pub struct RecordingDelay {
    waits: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_per_attempt() {
        let policy = RetryPolicy::new(3, Duration::from_secs(10));
        assert_eq!(policy.delay_after(0), Duration::from_secs(10));
        assert_eq!(policy.delay_after(1), Duration::from_secs(20));
        assert_eq!(policy.delay_after(2), Duration::from_secs(40));
    }

    #[test]
    fn test_after_failure_transitions() {
        let policy = RetryPolicy::new(2, Duration::from_millis(5));
        assert_eq!(
            policy.after_failure(0),
            RetryState::Retrying {
                attempt: 1,
                delay: Duration::from_millis(5)
            }
        );
        assert_eq!(
            policy.after_failure(1),
            RetryState::Retrying {
                attempt: 2,
                delay: Duration::from_millis(10)
            }
        );
        assert_eq!(policy.after_failure(2), RetryState::Exhausted);
        assert_eq!(policy.total_attempts(), 3);
    }

    #[test]
    fn test_zero_retries_exhausts_immediately() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.after_failure(0), RetryState::Exhausted);
    }

    #[test]
    fn test_huge_attempt_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(100, Duration::from_secs(10));
        assert_eq!(
            policy.delay_after(64),
            Duration::from_secs(10).saturating_mul(u32::MAX)
        );
    }

    #[test]
    fn test_max_retries_at_limit_does_not_overflow() {
        let policy = RetryPolicy::new(u32::MAX, Duration::from_secs(1));
        assert_eq!(policy.total_attempts(), u32::MAX);
        assert_eq!(policy.after_failure(u32::MAX), RetryState::Exhausted);
        assert!(matches!(
            policy.after_failure(u32::MAX - 1),
            RetryState::Retrying { attempt, .. } if attempt == u32::MAX
        ));
    }

    #[tokio::test]
    async fn test_recording_delay_does_not_sleep() {
        let delay = RecordingDelay::new();
        delay.wait(Duration::from_secs(3600)).await;
        assert_eq!(delay.waits(), vec![Duration::from_secs(3600)]);
    }
}
