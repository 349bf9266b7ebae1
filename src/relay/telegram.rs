use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::{Notifier, RelayOutcome};
use crate::config::TelegramConfig;

/// Upstream error bodies are truncated to this many characters.
const MAX_ERROR_BODY: usize = 1024;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: send_message_url(&config.api_base, &config.bot_token),
            chat_id: config.chat_id.clone(),
        })
    }
}

pub fn send_message_url(api_base: &str, bot_token: &str) -> String {
    format!("{}/bot{bot_token}/sendMessage", api_base.trim_end_matches('/'))
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn id(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> RelayOutcome {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        let resp = match self.client.post(&self.url).json(&body).send().await {
            Ok(resp) => resp,
            // The request URL carries the bot token.
            Err(e) => {
                return RelayOutcome::Transport(format!(
                    "Telegram request failed: {}",
                    e.without_url()
                ));
            }
        };

        let status = resp.status();
        if status.is_success() {
            return RelayOutcome::Delivered;
        }

        let body = resp
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e.without_url()))
            .chars()
            .take(MAX_ERROR_BODY)
            .collect::<String>();

        RelayOutcome::Rejected {
            status: status.as_u16(),
            body,
        }
    }
}
