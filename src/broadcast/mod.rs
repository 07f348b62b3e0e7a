//! Broadcast transport
//!
//! Sends the assembled messages to every subscriber in a single call. A
//! failure here is the one error the run reports as unsuccessful; nothing
//! retries it.

pub mod console;
pub mod line;
pub mod mock;

pub use console::ConsoleBroadcaster;
pub use line::LineBroadcastClient;
pub use mock::MockBroadcaster;

use crate::models::OutboundMessage;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait BroadcastService: Send + Sync {
    async fn broadcast(&self, messages: &[OutboundMessage]) -> Result<()>;
}
