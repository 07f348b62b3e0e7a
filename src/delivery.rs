//! Delivery assembler: turns the run's results into ordered outbound messages.

use crate::content::ContentOutcome;
use crate::models::OutboundMessage;

/// Sent last whenever the model proposed no usable follow-up.
pub const CLOSING_MESSAGE: &str =
    "今天的晨報就到這裡囉！小雲要去曬太陽打盹了，大家也要好好照顧自己喔～喵🐾";

/// Primary text, then the calendar card and themed image when present, then
/// the follow-up (or the closing text). Always between two and four messages.
pub fn assemble(
    content: &ContentOutcome,
    calendar_url: Option<&str>,
    image_url: Option<&str>,
) -> Vec<OutboundMessage> {
    let mut messages = vec![OutboundMessage::text(content.text())];

    if let Some(url) = calendar_url {
        messages.push(OutboundMessage::image(url));
    }
    if let Some(url) = image_url {
        messages.push(OutboundMessage::image(url));
    }

    let closing = match content.follow_up() {
        Some(follow_up) => OutboundMessage::Text {
            text: follow_up.text(),
            buttons: follow_up.buttons.clone(),
        },
        None => OutboundMessage::text(CLOSING_MESSAGE),
    };
    messages.push(closing);

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::placeholder;
    use crate::models::{FollowUp, FollowUpButton, GenerationResult};
    use pretty_assertions::assert_eq;

    fn generated(follow_up: Option<FollowUp>) -> ContentOutcome {
        ContentOutcome::Generated(GenerationResult {
            main_text: "早安！今天是霜降".to_string(),
            image_keyword: Some("persimmon".to_string()),
            follow_up,
        })
    }

    #[test]
    fn test_full_message_order() {
        let follow_up = FollowUp {
            greeting: "喵～".to_string(),
            prompt: "想聽哪一個？".to_string(),
            buttons: vec![FollowUpButton {
                label: "運勢".to_string(),
                payload: "fortune".to_string(),
            }],
        };

        let messages = assemble(
            &generated(Some(follow_up.clone())),
            Some("https://img.test/calendar.png"),
            Some("https://img.test/persimmon.jpg"),
        );

        assert_eq!(
            messages,
            vec![
                OutboundMessage::text("早安！今天是霜降"),
                OutboundMessage::image("https://img.test/calendar.png"),
                OutboundMessage::image("https://img.test/persimmon.jpg"),
                OutboundMessage::Text {
                    text: "喵～\n想聽哪一個？".to_string(),
                    buttons: follow_up.buttons,
                },
            ]
        );
    }

    #[test]
    fn test_missing_follow_up_uses_closing_message() {
        let messages = assemble(&generated(None), None, Some("https://img.test/p.jpg"));
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2], OutboundMessage::text(CLOSING_MESSAGE));
    }

    #[test]
    fn test_placeholder_still_yields_two_messages() {
        let outcome = ContentOutcome::Placeholder(placeholder::TIMEOUT.to_string());
        let messages = assemble(&outcome, None, None);
        assert_eq!(
            messages,
            vec![
                OutboundMessage::text(placeholder::TIMEOUT),
                OutboundMessage::text(CLOSING_MESSAGE),
            ]
        );
    }
}
