use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::ai::ContentService;
use crate::content::ResponsePayload;
use crate::models::{GenerationRequest, GenerationResult};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Structured daily-message generation through Gemini.
pub struct GeminiContentClient {
    http: GeminiHttpClient,
}

impl GeminiContentClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// Classify the first part of the reply into one of the payload shapes.
    fn payload_from(response: GenerateContentResponse) -> Result<ResponsePayload> {
        let block_reason = response.block_reason().map(str::to_string);
        let finish_reason = response.finish_reason().map(str::to_string);

        let part = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next());

        match part {
            Some(Part::Text { text }) => Ok(ResponsePayload::Encoded(text)),
            Some(Part::Structured(map)) => Ok(ResponsePayload::Direct(map)),
            Some(Part::InlineData { .. }) => Err(Error::MalformedContent(
                "expected text, got inline media".to_string(),
            )),
            None => match block_reason {
                Some(reason) => Err(Error::ContentBlocked(reason)),
                None => {
                    tracing::error!(
                        "Content response has no usable part (finish reason: {:?})",
                        finish_reason
                    );
                    Err(Error::MalformedContent(match finish_reason {
                        Some(reason) => format!("response has no content (finish reason {})", reason),
                        None => "response has no candidates".to_string(),
                    }))
                }
            },
        }
    }
}

#[async_trait]
impl ContentService for GeminiContentClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        tracing::debug!(
            "Requesting content from {} ({} instruction chars)",
            self.http.model(),
            request.instruction.chars().count()
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::Text {
                    text: request.instruction.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: Some(request.temperature),
                max_output_tokens: Some(request.max_output_tokens),
                response_mime_type: Some(request.response_mime_type.clone()),
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&body).await?;
        Self::payload_from(response)?.decode()
    }
}
