//! Generative-model integration
//!
//! Two capabilities are used per run: structured text generation for the
//! daily message, and a vision check that approves or rejects a candidate
//! photo for a theme. Both are backed by Gemini's `generateContent` endpoint.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiContentClient, GeminiRelevanceClient};
pub use mock::{MockContentClient, MockFailure, MockRelevanceClient};

use crate::models::{GenerationRequest, GenerationResult, ImageCandidate};
use crate::Result;
use async_trait::async_trait;

/// Single-attempt structured content generation.
///
/// Implementations return a validated [`GenerationResult`] or a typed error
/// describing why this attempt is unusable; retrying is the caller's job.
#[async_trait]
pub trait ContentService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;
}

/// Vision-relevance check for one image against one theme.
#[async_trait]
pub trait RelevanceService: Send + Sync {
    async fn is_relevant(&self, candidate: &ImageCandidate, theme: &str) -> Result<bool>;
}
