use super::telegram_models::{ApiResponse, SendMessageRequest, SetWebhookRequest};
use crate::core::messaging::{Messenger, MessagingError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const UNKNOWN_ERROR: &str = "Неизвестная ошибка";

/// Minimal Telegram Bot API client: sendMessage and setWebhook.
pub struct TelegramClient {
    client: Client,
    bot_token: Option<String>,
    api_base: String,
}

impl TelegramClient {
    pub fn new(bot_token: Option<String>, api_base: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            bot_token,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// Calls a Bot API method and decodes its `{ok, description}` envelope.
    ///
    /// Telegram reports refusals with a 4xx status *and* a JSON envelope, so
    /// the envelope is decoded whatever the status is.
    async fn call<B: Serialize + Sync>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<ApiResponse, MessagingError> {
        let token = self
            .bot_token
            .as_deref()
            .ok_or(MessagingError::MissingToken)?;
        let url = format!("{}/bot{}/{}", self.api_base, token, method);

        // The token is part of the URL; keep it out of error text.
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| MessagingError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MessagingError::Transport(e.without_url().to_string()))?;

        match serde_json::from_str::<ApiResponse>(&text) {
            Ok(envelope) if envelope.ok => Ok(envelope),
            Ok(envelope) => Err(MessagingError::Rejected(
                envelope
                    .description
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            )),
            Err(_) => Err(MessagingError::Transport(format!(
                "{method} answered {status} with an unreadable body"
            ))),
        }
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    fn ensure_ready(&self) -> Result<(), MessagingError> {
        match self.bot_token {
            Some(_) => Ok(()),
            None => Err(MessagingError::MissingToken),
        }
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessagingError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "Markdown",
        };
        self.call("sendMessage", &request).await?;
        Ok(())
    }

    async fn set_webhook(&self, url: &str) -> Result<String, MessagingError> {
        let envelope = self.call("setWebhook", &SetWebhookRequest { url }).await?;
        Ok(envelope.description.unwrap_or_default())
    }
}
