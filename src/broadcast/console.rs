use super::BroadcastService;
use crate::models::OutboundMessage;
use crate::Result;
use async_trait::async_trait;

/// Dry-run transport: prints what would have been broadcast.
#[derive(Debug, Default, Clone)]
pub struct ConsoleBroadcaster;

impl ConsoleBroadcaster {
    pub fn new() -> Self {
        Self
    }
}

pub fn describe(message: &OutboundMessage) -> String {
    match message {
        OutboundMessage::Text { text, buttons } if buttons.is_empty() => {
            format!("[text]\n{}", text)
        }
        OutboundMessage::Text { text, buttons } => {
            let labels: Vec<&str> = buttons.iter().map(|b| b.label.as_str()).collect();
            format!("[text]\n{}\n[buttons] {}", text, labels.join(" | "))
        }
        OutboundMessage::Image { original_url, .. } => format!("[image] {}", original_url),
    }
}

#[async_trait]
impl BroadcastService for ConsoleBroadcaster {
    async fn broadcast(&self, messages: &[OutboundMessage]) -> Result<()> {
        tracing::info!("DRY_RUN enabled, printing {} messages", messages.len());
        for (i, message) in messages.iter().enumerate() {
            println!("--- message {} ---\n{}", i + 1, describe(message));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FollowUpButton;

    #[test]
    fn test_describe() {
        assert_eq!(describe(&OutboundMessage::text("hi")), "[text]\nhi");
        assert_eq!(
            describe(&OutboundMessage::image("https://img.test/a.png")),
            "[image] https://img.test/a.png"
        );
        let with_buttons = OutboundMessage::Text {
            text: "pick".to_string(),
            buttons: vec![
                FollowUpButton {
                    label: "a".to_string(),
                    payload: "1".to_string(),
                },
                FollowUpButton {
                    label: "b".to_string(),
                    payload: "2".to_string(),
                },
            ],
        };
        assert_eq!(describe(&with_buttons), "[text]\npick\n[buttons] a | b");
    }

    #[tokio::test]
    async fn test_console_broadcast_succeeds() {
        ConsoleBroadcaster::new()
            .broadcast(&[OutboundMessage::text("hi")])
            .await
            .unwrap();
    }
}
