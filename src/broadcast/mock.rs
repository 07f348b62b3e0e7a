use super::BroadcastService;
use crate::models::OutboundMessage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockBroadcaster {
    fail: bool,
    sent: Arc<Mutex<Vec<Vec<OutboundMessage>>>>,
}

impl MockBroadcaster {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Messages from the most recent broadcast.
    pub fn last_messages(&self) -> Option<Vec<OutboundMessage>> {
        self.sent.lock().unwrap().last().cloned()
    }
}

impl Default for MockBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BroadcastService for MockBroadcaster {
    async fn broadcast(&self, messages: &[OutboundMessage]) -> Result<()> {
        self.sent.lock().unwrap().push(messages.to_vec());

        if self.fail {
            return Err(Error::Broadcast("mock broadcast failure".to_string()));
        }
        Ok(())
    }
}
