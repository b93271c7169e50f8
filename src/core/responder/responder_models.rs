use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// What the responder needs from an inbound chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub chat_id: i64,
    pub user_id: Option<i64>,
    /// Sender's username, empty when they have none.
    pub username: String,
    pub text: String,
}

/// The two fixed commands. Anything else is a free-form question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Info,
}

impl Command {
    /// Exact match only: "/help@bot" or " /help" are questions.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/help" => Some(Command::Help),
            "/info" => Some(Command::Info),
            _ => None,
        }
    }
}

/// Which branch produced the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Command(Command),
    /// Generated with a matched knowledge-base answer as context.
    Knowledge { entry_id: i64 },
    /// Generated with the static release instruction as context.
    Fallback,
}

/// One row of the exchange log.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageLog {
    pub chat_id: i64,
    pub user_id: Option<i64>,
    pub username: String,
    pub message_text: String,
    pub bot_response: String,
    pub response_time_ms: i32,
    pub error_message: Option<String>,
}

/// Everything that happened while handling one message.
///
/// Failures of the outbound send and the log insert never fail the
/// handling; they only show up here as `delivered` / `logged` being false.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOutcome {
    pub route: Route,
    pub reply: String,
    pub error_message: Option<String>,
    pub response_time_ms: i32,
    pub delivered: bool,
    pub logged: bool,
}

#[derive(Debug, Error)]
pub enum LogStoreError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait MessageLogStore: Send + Sync {
    async fn record(&self, entry: &MessageLog) -> Result<(), LogStoreError>;
}

#[async_trait]
impl<T: MessageLogStore + ?Sized> MessageLogStore for Arc<T> {
    async fn record(&self, entry: &MessageLog) -> Result<(), LogStoreError> {
        (**self).record(entry).await
    }
}
