use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use crate::ai::RelevanceService;
use crate::models::ImageCandidate;
use crate::{prompts, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Parse the model's free-text verdict; only an explicit `YES` token counts.
pub fn parse_verdict(answer: &str) -> bool {
    answer
        .split(|c: char| !c.is_ascii_alphabetic())
        .any(|token| token.eq_ignore_ascii_case("yes"))
}

/// Vision-relevance check through Gemini.
pub struct GeminiRelevanceClient {
    http: GeminiHttpClient,
}

impl GeminiRelevanceClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, Duration::from_secs(45), client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl RelevanceService for GeminiRelevanceClient {
    async fn is_relevant(&self, candidate: &ImageCandidate, theme: &str) -> Result<bool> {
        tracing::debug!(
            "Checking relevance of {} ({} bytes, {}) for theme '{}'",
            candidate.url,
            candidate.size,
            candidate.mime_type,
            theme
        );

        use base64::Engine as _;
        let data = base64::engine::general_purpose::STANDARD.encode(&candidate.bytes);

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::Text {
                        text: prompts::image_relevance(theme),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: candidate.mime_type.clone(),
                            data,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: Some(0.0),
                max_output_tokens: Some(10),
                response_mime_type: None,
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let answer = match response.first_part() {
            Some(Part::Text { text }) => text.trim().to_string(),
            _ => {
                tracing::error!(
                    "Vision check returned no verdict for theme '{}' (block reason: {:?}, finish reason: {:?})",
                    theme,
                    response.block_reason(),
                    response.finish_reason()
                );
                return Ok(false);
            }
        };

        let relevant = parse_verdict(&answer);
        tracing::info!(
            "Vision verdict for theme '{}': '{}' -> {}",
            theme,
            answer,
            relevant
        );
        Ok(relevant)
    }
}
