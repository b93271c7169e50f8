// Telegram Bot API wire types.
//
// Only the fields the bot reads are modelled; serde ignores the rest.
// See https://core.telegram.org/bots/api#update

use crate::core::responder::InboundMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub chat: Option<Chat>,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

impl Update {
    /// The text message this update carries, if any.
    ///
    /// Updates without a chat id or with empty text (stickers, joins, edits,
    /// callback queries) have nothing to answer and yield `None`.
    pub fn into_inbound(self) -> Option<InboundMessage> {
        let message = self.message?;
        let chat_id = message.chat?.id;
        let text = message.text.filter(|t| !t.is_empty())?;

        Some(InboundMessage {
            chat_id,
            user_id: message.from.as_ref().map(|u| u.id),
            username: message.from.and_then(|u| u.username).unwrap_or_default(),
            text,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    pub parse_mode: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SetWebhookRequest<'a> {
    pub url: &'a str,
}

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}
