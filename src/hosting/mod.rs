//! Public image hosting for locally rendered images
//!
//! The chat platform only accepts image messages by URL, so the calendar
//! card is uploaded before it can be broadcast.

pub mod imgbb;
pub mod mock;

pub use imgbb::ImgbbClient;
pub use mock::MockImageHost;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload `data` and return its public URL.
    async fn upload(&self, data: &[u8], name: &str) -> Result<String>;
}
