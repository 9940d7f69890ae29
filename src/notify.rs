use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::MonitorError;

const LINE_PUSH_URL: &str = "https://api.line.me/v2/bot/message/push";

/// LINE caps a text message at 5000 characters; stay safely under it.
const MAX_TEXT_CHARS: usize = 4900;

/// Outbound notification channel for a watch run.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `messages` as one push, newline-joined.
    async fn notify(&self, messages: &[String]) -> Result<(), MonitorError>;
}

#[derive(Serialize)]
struct PushBody<'a> {
    to: &'a str,
    messages: Vec<TextMessage<'a>>,
}

#[derive(Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Push client for the LINE Messaging API.
pub struct LineNotifier {
    client: reqwest::Client,
    channel_token: Option<String>,
    recipient: Option<String>,
}

impl LineNotifier {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            channel_token: config.channel_token.clone(),
            recipient: config.recipient.clone(),
        }
    }
}

#[async_trait]
impl Notifier for LineNotifier {
    async fn notify(&self, messages: &[String]) -> Result<(), MonitorError> {
        let token = self
            .channel_token
            .as_deref()
            .ok_or(MonitorError::Config("LINE_CHANNEL_ACCESS_TOKEN"))?;
        let to = self
            .recipient
            .as_deref()
            .ok_or(MonitorError::Config("LINE_USER_ID"))?;

        let joined = messages.join("\n");
        let text = clip_chars(&joined, MAX_TEXT_CHARS);
        let body = PushBody {
            to,
            messages: vec![TextMessage { kind: "text", text }],
        };

        let res = self
            .client
            .post(LINE_PUSH_URL)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(MonitorError::Delivery { status, body });
        }

        info!("LINE push delivered ({} chars)", text.chars().count());
        Ok(())
    }
}

/// Cut `text` down to at most `max` characters, on a char boundary.
fn clip_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(clip_chars("🆕 新商品\n価格: ￥980", MAX_TEXT_CHARS), "🆕 新商品\n価格: ￥980");
    }

    #[test]
    fn text_at_the_limit_is_untouched() {
        let text = "あ".repeat(MAX_TEXT_CHARS);
        assert_eq!(clip_chars(&text, MAX_TEXT_CHARS), text);
    }

    #[test]
    fn clipping_counts_characters_not_bytes() {
        let text = "あ".repeat(MAX_TEXT_CHARS + 100);
        let clipped = clip_chars(&text, MAX_TEXT_CHARS);

        assert_eq!(clipped.chars().count(), MAX_TEXT_CHARS);
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        let notifier = LineNotifier {
            client: reqwest::Client::new(),
            channel_token: None,
            recipient: Some("U1234567890".to_string()),
        };

        let err = notifier.notify(&["x".to_string()]).await.unwrap_err();
        assert!(matches!(err, MonitorError::Config("LINE_CHANNEL_ACCESS_TOKEN")));
    }

    #[tokio::test]
    async fn missing_recipient_fails_before_any_request() {
        let notifier = LineNotifier {
            client: reqwest::Client::new(),
            channel_token: Some("token".to_string()),
            recipient: None,
        };

        let err = notifier.notify(&["x".to_string()]).await.unwrap_err();
        assert!(matches!(err, MonitorError::Config("LINE_USER_ID")));
    }
}
