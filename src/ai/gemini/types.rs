//! Shared Gemini payload types used by the content and vision clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding: anything that is
/// neither text nor inline media lands in `Structured`, which is how an
/// already-decoded JSON object shows up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Structured(Map<String, Value>),
}

/// Base64 inline payload used for vision requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// First part of the first candidate, if the model produced anything.
    pub fn first_part(&self) -> Option<&Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
    }

    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }

    /// Why the first candidate stopped, e.g. `MAX_TOKENS` or `SAFETY`.
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
    }
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Extract `promptFeedback.blockReason` from an arbitrary error body.
pub fn block_reason_in_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_part_decodes_as_text() {
        let part: Part = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert!(matches!(part, Part::Text { text } if text == "hello"));
    }

    #[test]
    fn test_object_part_decodes_as_structured() {
        let part: Part =
            serde_json::from_str(r#"{"main_text_content": "hi", "lucky_food_image_keyword": "tea"}"#)
                .unwrap();
        match part {
            Part::Structured(map) => assert!(map.contains_key("main_text_content")),
            other => panic!("unexpected part: {:?}", other),
        }
    }

    #[test]
    fn test_response_without_candidates_exposes_block_reason() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"promptFeedback": {"blockReason": "SAFETY", "safetyRatings": []}}"#,
        )
        .unwrap();
        assert!(response.first_part().is_none());
        assert_eq!(response.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_finish_reason_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"finishReason": "MAX_TOKENS"}, {"finishReason": "STOP"}]}"#,
        )
        .unwrap();
        assert!(response.first_part().is_none());
        assert_eq!(response.finish_reason(), Some("MAX_TOKENS"));
    }

    #[test]
    fn test_block_reason_in_error_body() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert_eq!(block_reason_in_body(body).as_deref(), Some("SAFETY"));
        assert_eq!(block_reason_in_body("not json"), None);
        assert_eq!(block_reason_in_body(r#"{"error": {"code": 500}}"#), None);
    }
}
