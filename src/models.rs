//! Data models shared across pipeline stages
//!
//! Everything here lives for a single run: the generation request and its
//! parsed result, downloaded image candidates, and the outbound messages.

use serde::{Deserialize, Serialize};

/// Maximum number of quick-reply buttons the chat platform accepts.
pub const MAX_FOLLOW_UP_BUTTONS: usize = 13;

/// Instruction payload for the generative-text API.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub instruction: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl GenerationRequest {
    /// Request tuned for the daily message: creative, long, JSON-encoded.
    pub fn daily(instruction: String) -> Self {
        Self {
            instruction,
            temperature: 0.9,
            max_output_tokens: 3500,
            response_mime_type: "application/json".to_string(),
        }
    }
}

/// A single quick-reply button attached to the follow-up message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpButton {
    pub label: String,
    pub payload: String,
}

/// Optional closing interaction proposed by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    #[serde(default)]
    pub greeting: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub buttons: Vec<FollowUpButton>,
}

impl FollowUp {
    /// Drop unusable buttons and cap the rest; `None` when nothing is left to say.
    pub fn sanitized(mut self) -> Option<Self> {
        self.greeting = self.greeting.trim().to_string();
        self.prompt = self.prompt.trim().to_string();
        if self.greeting.is_empty() && self.prompt.is_empty() {
            return None;
        }

        self.buttons.retain(|b| !b.label.trim().is_empty() && !b.payload.trim().is_empty());
        self.buttons.truncate(MAX_FOLLOW_UP_BUTTONS);
        Some(self)
    }

    /// Text shown above the buttons.
    pub fn text(&self) -> String {
        [self.greeting.as_str(), self.prompt.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Validated output of the content requester.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// Never empty once constructed through the decoder.
    pub main_text: String,
    /// Short English search keyword; `None` skips media resolution.
    pub image_keyword: Option<String>,
    pub follow_up: Option<FollowUp>,
}

/// A downloaded photo that passed the local acceptance checks.
#[derive(Debug, Clone)]
pub struct ImageCandidate {
    pub url: String,
    /// MIME type sent to the vision check.
    pub mime_type: String,
    pub size: usize,
    pub bytes: Vec<u8>,
}

/// One unit handed to the broadcast transport, in send order.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    Text {
        text: String,
        buttons: Vec<FollowUpButton>,
    },
    Image {
        original_url: String,
        preview_url: String,
    },
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutboundMessage::Text {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        let url = url.into();
        OutboundMessage::Image {
            original_url: url.clone(),
            preview_url: url,
        }
    }
}

/// Weather summary used in the instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub description: String,
    pub temperature: String,
    pub reaction: String,
}

impl WeatherReport {
    /// Payload used whenever the weather API cannot be trusted.
    pub fn fallback() -> Self {
        Self {
            description: "一個充滿貓咪魔法的好天氣".to_string(),
            temperature: "溫暖的剛剛好、適合打盹的貓咪溫度".to_string(),
            reaction: "小雲覺得今天會遇到很多開心的事！喵～✨".to_string(),
        }
    }
}

/// Everything the context gatherer knows about today.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyContext {
    pub date_label: String,
    pub solar_term: String,
    pub weather: WeatherReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(label: &str, payload: &str) -> FollowUpButton {
        FollowUpButton {
            label: label.to_string(),
            payload: payload.to_string(),
        }
    }

    #[test]
    fn test_follow_up_sanitized_drops_blank_buttons() {
        let follow_up = FollowUp {
            greeting: " 早安喵 ".to_string(),
            prompt: "今天想聊什麼？".to_string(),
            buttons: vec![button("摸摸", "pet"), button("", "x"), button("罐罐", " ")],
        }
        .sanitized()
        .unwrap();

        assert_eq!(follow_up.greeting, "早安喵");
        assert_eq!(follow_up.buttons, vec![button("摸摸", "pet")]);
        assert_eq!(follow_up.text(), "早安喵\n今天想聊什麼？");
    }

    #[test]
    fn test_follow_up_without_text_is_rejected() {
        let follow_up = FollowUp {
            greeting: "  ".to_string(),
            prompt: String::new(),
            buttons: vec![button("a", "b")],
        };
        assert!(follow_up.sanitized().is_none());
    }

    #[test]
    fn test_follow_up_buttons_are_capped() {
        let buttons = (0..20).map(|i| button(&format!("b{}", i), "p")).collect();
        let follow_up = FollowUp {
            greeting: String::new(),
            prompt: "pick one".to_string(),
            buttons,
        }
        .sanitized()
        .unwrap();

        assert_eq!(follow_up.buttons.len(), MAX_FOLLOW_UP_BUTTONS);
        assert_eq!(follow_up.text(), "pick one");
    }

    #[test]
    fn test_image_message_uses_same_url_for_preview() {
        match OutboundMessage::image("https://img.test/cake.jpg") {
            OutboundMessage::Image {
                original_url,
                preview_url,
            } => assert_eq!(original_url, preview_url),
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
