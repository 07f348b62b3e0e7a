use super::BroadcastService;
use crate::models::{FollowUpButton, OutboundMessage, MAX_FOLLOW_UP_BUTTONS};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.line.me";

pub const MAX_MESSAGES: usize = 5;
pub const MAX_TEXT_CHARS: usize = 5000;
pub const MAX_LABEL_CHARS: usize = 20;
const MAX_POSTBACK_CHARS: usize = 300;

#[derive(Debug, Serialize)]
struct BroadcastRequest<'a> {
    messages: &'a [LineMessage],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
enum LineMessage {
    #[serde(rename = "text", rename_all = "camelCase")]
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        quick_reply: Option<QuickReply>,
    },
    #[serde(rename = "image", rename_all = "camelCase")]
    Image {
        original_content_url: String,
        preview_image_url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct QuickReply {
    items: Vec<QuickReplyItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct QuickReplyItem {
    #[serde(rename = "type")]
    kind: &'static str,
    action: PostbackAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostbackAction {
    #[serde(rename = "type")]
    kind: &'static str,
    label: String,
    data: String,
    display_text: String,
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn quick_reply(buttons: &[FollowUpButton]) -> Option<QuickReply> {
    let items: Vec<QuickReplyItem> = buttons
        .iter()
        .take(MAX_FOLLOW_UP_BUTTONS)
        .map(|button| {
            let label = truncate_chars(button.label.trim(), MAX_LABEL_CHARS);
            QuickReplyItem {
                kind: "action",
                action: PostbackAction {
                    kind: "postback",
                    display_text: truncate_chars(button.label.trim(), MAX_POSTBACK_CHARS),
                    data: truncate_chars(&button.payload, MAX_POSTBACK_CHARS),
                    label,
                },
            }
        })
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(QuickReply { items })
    }
}

fn to_line_messages(messages: &[OutboundMessage]) -> Result<Vec<LineMessage>> {
    if messages.is_empty() {
        return Err(Error::Broadcast("nothing to broadcast".to_string()));
    }
    if messages.len() > MAX_MESSAGES {
        return Err(Error::Broadcast(format!(
            "{} messages exceed the limit of {} per broadcast",
            messages.len(),
            MAX_MESSAGES
        )));
    }

    messages
        .iter()
        .map(|message| match message {
            OutboundMessage::Text { text, buttons } => {
                if text.trim().is_empty() {
                    return Err(Error::Broadcast("empty text message".to_string()));
                }
                if text.chars().count() > MAX_TEXT_CHARS {
                    tracing::warn!("Truncating text message to {} characters", MAX_TEXT_CHARS);
                }
                Ok(LineMessage::Text {
                    text: truncate_chars(text, MAX_TEXT_CHARS),
                    quick_reply: quick_reply(buttons),
                })
            }
            OutboundMessage::Image {
                original_url,
                preview_url,
            } => Ok(LineMessage::Image {
                original_content_url: original_url.clone(),
                preview_image_url: preview_url.clone(),
            }),
        })
        .collect()
}

pub struct LineBroadcastClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl LineBroadcastClient {
    pub fn new(access_token: String) -> Self {
        Self::new_with_client(access_token, Client::new())
    }

    pub fn new_with_client(access_token: String, client: Client) -> Self {
        Self {
            client,
            access_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl BroadcastService for LineBroadcastClient {
    async fn broadcast(&self, messages: &[OutboundMessage]) -> Result<()> {
        let line_messages = to_line_messages(messages)?;

        let response = self
            .client
            .post(format!("{}/v2/bot/message/broadcast", self.base_url))
            .timeout(Duration::from_secs(30))
            .bearer_auth(&self.access_token)
            .json(&BroadcastRequest {
                messages: &line_messages,
            })
            .send()
            .await
            .map_err(|e| Error::from_request(e, "LINE broadcast"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Broadcast(format!(
                "LINE broadcast failed (status {}): {}",
                status, body
            )));
        }

        tracing::info!("Broadcast {} messages via LINE", line_messages.len());
        Ok(())
    }
}
