use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{BotError, BotResult};
use crate::models::NotificationMessage;
use crate::pipeline::format::split_message;
use crate::services::schedule::REQUEST_TIMEOUT_SECS;

/// Abstraction over the messaging provider so tests can count sends instead
/// of hitting the Bot API.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Delivers one chunk of message text.
    async fn send(&self, text: &str) -> BotResult<()>;
}

/// Sends messages through the Telegram Bot API `sendMessage` endpoint.
pub struct TelegramSink {
    client: Client,
    url: String,
    chat_id: String,
}

impl TelegramSink {
    pub fn new(token: &str, chat_id: &str) -> BotResult<Self> {
        Self::with_api_base("https://api.telegram.org", token, chat_id)
    }

    /// Points the sink at a different API root, for tests.
    pub fn with_api_base(base: &str, token: &str, chat_id: &str) -> BotResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| BotError::Delivery(format!("failed to build http client: {}", e)))?;
        Ok(TelegramSink {
            client,
            url: format!("{}/bot{}/sendMessage", base.trim_end_matches('/'), token),
            chat_id: chat_id.to_string(),
        })
    }
}

#[async_trait]
impl MessageSink for TelegramSink {
    async fn send(&self, text: &str) -> BotResult<()> {
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        // Transport failures on the send path are delivery failures, not
        // schedule-provider network errors.
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // Telegram error bodies carry a human-readable description field.
        let detail = match response.json::<Value>().await {
            Ok(body) => body
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string()),
            Err(_) => status.to_string(),
        };
        Err(BotError::Delivery(detail))
    }
}

/// Sends the formatted summary, splitting it into chunks the provider
/// accepts. The message is fully composed before the first send, so a
/// delivery failure never produces a partially formatted notification.
pub async fn deliver(sink: &dyn MessageSink, message: &NotificationMessage) -> BotResult<()> {
    let chunks = split_message(&message.html);
    let total = chunks.len();
    for (index, chunk) in chunks.iter().enumerate() {
        sink.send(chunk).await?;
        info!("Delivered message chunk {}/{}", index + 1, total);
    }
    Ok(())
}
