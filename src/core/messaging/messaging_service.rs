// Outbound side of the messaging provider, plus the one-shot webhook registrar.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("TELEGRAM_BOT_TOKEN не установлен")]
    MissingToken,

    /// The provider answered but refused the call; carries its description.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("TELEGRAM_WEBHOOK_URL не установлен")]
    MissingWebhookUrl,

    #[error(transparent)]
    Messaging(#[from] MessagingError),
}

// ============================================================================
// MESSENGER TRAIT (PORT)
// ============================================================================

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Fails fast when the messenger lacks credentials to make any call.
    fn ensure_ready(&self) -> Result<(), MessagingError> {
        Ok(())
    }

    /// Sends `text` to `chat_id`.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessagingError>;

    /// Points the provider's update delivery at `url`.
    /// Returns the provider's confirmation text.
    async fn set_webhook(&self, url: &str) -> Result<String, MessagingError>;
}

#[async_trait]
impl<T: Messenger + ?Sized> Messenger for Arc<T> {
    fn ensure_ready(&self) -> Result<(), MessagingError> {
        (**self).ensure_ready()
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessagingError> {
        (**self).send_message(chat_id, text).await
    }

    async fn set_webhook(&self, url: &str) -> Result<String, MessagingError> {
        (**self).set_webhook(url).await
    }
}

// ============================================================================
// WEBHOOK REGISTRAR
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct WebhookRegistration {
    pub webhook_url: String,
    pub provider_description: String,
}

pub struct WebhookRegistrar<M: Messenger> {
    messenger: M,
    webhook_url: Option<String>,
}

impl<M: Messenger> WebhookRegistrar<M> {
    pub fn new(messenger: M, webhook_url: Option<String>) -> Self {
        Self {
            messenger,
            webhook_url,
        }
    }

    /// Registers our fixed callback URL. Calling it again simply re-registers.
    ///
    /// A missing bot token is reported before a missing webhook URL.
    pub async fn register(&self) -> Result<WebhookRegistration, RegistrationError> {
        self.messenger.ensure_ready()?;
        let url = self
            .webhook_url
            .as_deref()
            .ok_or(RegistrationError::MissingWebhookUrl)?;

        let description = self.messenger.set_webhook(url).await?;
        tracing::info!(webhook_url = url, "Webhook registered");

        Ok(WebhookRegistration {
            webhook_url: url.to_string(),
            provider_description: description,
        })
    }
}
