//! Decoding of the model's structured reply into a [`GenerationResult`].

use crate::models::{FollowUp, GenerationResult};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// The two shapes a structured reply arrives in.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    /// The object was delivered already decoded.
    Direct(Map<String, Value>),
    /// The object was delivered as JSON text.
    Encoded(String),
}

#[derive(Debug, Deserialize)]
struct RawContent {
    main_text_content: Option<String>,
    lucky_food_image_keyword: Option<Value>,
    follow_up: Option<Value>,
}

impl ResponsePayload {
    /// Resolve either shape to a validated result.
    ///
    /// Undecodable text or a non-object is [`Error::MalformedContent`]; a
    /// missing or mistyped main text is [`Error::IncompleteContent`]; a blank
    /// main text is [`Error::EmptyContent`]. A missing or non-string keyword
    /// and a broken follow-up degrade to `None`.
    pub fn decode(self) -> Result<GenerationResult> {
        let object = match self {
            ResponsePayload::Direct(map) => map,
            ResponsePayload::Encoded(text) => {
                let body = strip_code_fence(&text);
                match serde_json::from_str::<Value>(body) {
                    Ok(Value::Object(map)) => map,
                    Ok(other) => {
                        return Err(Error::MalformedContent(format!(
                            "expected a JSON object, got {}",
                            json_kind(&other)
                        )))
                    }
                    Err(e) => {
                        let preview: String = body.chars().take(300).collect();
                        tracing::error!("Encoded payload is not valid JSON: {} ({})", e, preview);
                        return Err(Error::MalformedContent(e.to_string()));
                    }
                }
            }
        };

        let raw: RawContent = serde_json::from_value(Value::Object(object))
            .map_err(|e| Error::IncompleteContent(e.to_string()))?;

        let main_text = raw
            .main_text_content
            .ok_or_else(|| Error::IncompleteContent("missing main_text_content".to_string()))?;
        if main_text.trim().is_empty() {
            return Err(Error::EmptyContent);
        }

        let image_keyword = match raw.lucky_food_image_keyword {
            Some(Value::String(keyword)) => Some(keyword.trim().to_string()),
            None | Some(Value::Null) => None,
            Some(other) => {
                tracing::warn!("Ignoring image keyword of type {}", json_kind(&other));
                None
            }
        }
        .filter(|k| !k.is_empty());
        if image_keyword.is_none() {
            tracing::info!("Payload has no image keyword; media resolution will be skipped");
        }

        let follow_up = raw.follow_up.and_then(|value| {
            match serde_json::from_value::<FollowUp>(value) {
                Ok(follow_up) => follow_up.sanitized(),
                Err(e) => {
                    tracing::warn!("Ignoring malformed follow_up object: {}", e);
                    None
                }
            }
        });

        Ok(GenerationResult {
            main_text,
            image_keyword,
            follow_up,
        })
    }
}

/// Remove a surrounding Markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn direct(value: Value) -> ResponsePayload {
        match value {
            Value::Object(map) => ResponsePayload::Direct(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_direct_and_encoded_shapes_decode_identically() {
        let value = json!({
            "main_text_content": "早安喵",
            "lucky_food_image_keyword": " matcha latte ",
        });

        let from_direct = direct(value.clone()).decode().unwrap();
        let from_text = ResponsePayload::Encoded(value.to_string()).decode().unwrap();

        assert_eq!(from_direct, from_text);
        assert_eq!(from_direct.image_keyword.as_deref(), Some("matcha latte"));
        assert!(from_direct.follow_up.is_none());
    }

    #[test]
    fn test_code_fenced_text_is_accepted() {
        let text = "```json\n{\"main_text_content\": \"hi\", \"lucky_food_image_keyword\": \"tea\"}\n```";
        let result = ResponsePayload::Encoded(text.to_string()).decode().unwrap();
        assert_eq!(result.main_text, "hi");
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = ResponsePayload::Encoded("{\"main_text_content\": ".to_string())
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::MalformedContent(_)));
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = ResponsePayload::Encoded("[1, 2]".to_string())
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::MalformedContent(msg) if msg.contains("array")));
    }

    #[test]
    fn test_missing_main_text_is_incomplete() {
        let err = direct(json!({"lucky_food_image_keyword": "tea"}))
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::IncompleteContent(_)));
    }

    #[test]
    fn test_blank_main_text_is_empty() {
        let err = direct(json!({"main_text_content": "  \n "}))
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::EmptyContent));
    }

    #[test]
    fn test_missing_keyword_degrades_to_none() {
        let result = direct(json!({"main_text_content": "hello"})).decode().unwrap();
        assert!(result.image_keyword.is_none());

        let blank = direct(json!({"main_text_content": "hello", "lucky_food_image_keyword": " "}))
            .decode()
            .unwrap();
        assert!(blank.image_keyword.is_none());
    }

    #[test]
    fn test_non_string_keyword_is_dropped_and_main_text_kept() {
        let numeric = ResponsePayload::Encoded(
            r#"{"main_text_content":"早安喵","lucky_food_image_keyword":42}"#.to_string(),
        )
        .decode()
        .unwrap();
        assert_eq!(numeric.main_text, "早安喵");
        assert!(numeric.image_keyword.is_none());

        let array = direct(json!({
            "main_text_content": "早安喵",
            "lucky_food_image_keyword": ["strawberry", "cake"],
        }))
        .decode()
        .unwrap();
        assert_eq!(array.main_text, "早安喵");
        assert!(array.image_keyword.is_none());

        let null = direct(json!({"main_text_content": "早安喵", "lucky_food_image_keyword": null}))
            .decode()
            .unwrap();
        assert!(null.image_keyword.is_none());
    }

    #[test]
    fn test_follow_up_is_parsed_and_sanitized() {
        let result = direct(json!({
            "main_text_content": "hello",
            "follow_up": {
                "greeting": "喵～",
                "prompt": "要不要陪小雲玩？",
                "buttons": [
                    {"label": "好呀", "payload": "play"},
                    {"label": "", "payload": "nope"}
                ]
            }
        }))
        .decode()
        .unwrap();

        let follow_up = result.follow_up.unwrap();
        assert_eq!(follow_up.buttons.len(), 1);
        assert_eq!(follow_up.buttons[0].payload, "play");
    }

    #[test]
    fn test_malformed_follow_up_is_dropped() {
        let result = direct(json!({
            "main_text_content": "hello",
            "follow_up": "not an object"
        }))
        .decode()
        .unwrap();
        assert!(result.follow_up.is_none());
    }
}
