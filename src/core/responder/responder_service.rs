// Conversational responder - turns one inbound chat message into one reply.
//
// Received -> Classified -> (FixedReply | Lookup -> Generate) -> Dispatched -> Logged
//
// Nothing here is allowed to fail the caller: every collaborator failure is
// matched explicitly and turned into a degraded reply.

use super::replies::{command_reply, GENERATION_FAILED_TEXT, NO_ANSWER_TEXT};
use super::responder_models::{
    Command, ExchangeOutcome, InboundMessage, MessageLog, MessageLogStore, Route,
};
use crate::core::ai::{AiProvider, AiService};
use crate::core::knowledge::{KnowledgeEntry, KnowledgeStore};
use crate::core::messaging::Messenger;
use std::sync::Arc;
use std::time::Instant;

/// Reply text plus how it was produced, before it is sent.
struct ComposedReply {
    route: Route,
    text: String,
    error_message: Option<String>,
}

pub struct ResponderService {
    knowledge: Arc<dyn KnowledgeStore>,
    ai: AiService<Box<dyn AiProvider>>,
    messenger: Arc<dyn Messenger>,
    logs: Arc<dyn MessageLogStore>,
}

impl ResponderService {
    pub fn new(
        knowledge: Arc<dyn KnowledgeStore>,
        ai: AiService<Box<dyn AiProvider>>,
        messenger: Arc<dyn Messenger>,
        logs: Arc<dyn MessageLogStore>,
    ) -> Self {
        Self {
            knowledge,
            ai,
            messenger,
            logs,
        }
    }

    pub async fn handle(&self, message: InboundMessage) -> ExchangeOutcome {
        let started = Instant::now();
        let chat_id = message.chat_id;

        let composed = match Command::parse(&message.text) {
            Some(command) => ComposedReply {
                route: Route::Command(command),
                text: command_reply(command, self.ai.search_grounding()),
                error_message: None,
            },
            None => self.answer_question(chat_id, &message.text).await,
        };

        let response_time_ms = i32::try_from(started.elapsed().as_millis()).unwrap_or(i32::MAX);

        let delivered = match self.messenger.send_message(chat_id, &composed.text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(chat_id, "Failed to send reply: {}", e);
                false
            }
        };

        let log = MessageLog {
            chat_id,
            user_id: message.user_id,
            username: message.username,
            message_text: message.text,
            bot_response: composed.text.clone(),
            response_time_ms,
            error_message: composed.error_message.clone(),
        };
        let logged = match self.logs.record(&log).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(chat_id, "Failed to log message: {}", e);
                false
            }
        };

        tracing::info!(
            chat_id,
            route = ?composed.route,
            response_time_ms,
            delivered,
            "Message handled"
        );

        ExchangeOutcome {
            route: composed.route,
            reply: composed.text,
            error_message: composed.error_message,
            response_time_ms,
            delivered,
            logged,
        }
    }

    async fn answer_question(&self, chat_id: i64, question: &str) -> ComposedReply {
        let matched = self.lookup(chat_id, question).await;
        let route = match &matched {
            Some(entry) => Route::Knowledge { entry_id: entry.id },
            None => Route::Fallback,
        };
        let knowledge = matched.as_ref().map(|entry| entry.answer.as_str());

        match self.ai.answer(question, knowledge).await {
            Ok(Some(text)) => ComposedReply {
                route,
                text,
                error_message: None,
            },
            Ok(None) => ComposedReply {
                route,
                text: NO_ANSWER_TEXT.to_string(),
                error_message: None,
            },
            Err(e) => {
                tracing::error!(chat_id, "Generation failed: {}", e);
                ComposedReply {
                    route,
                    text: GENERATION_FAILED_TEXT.to_string(),
                    error_message: Some(e.to_string()),
                }
            }
        }
    }

    /// Best-matching knowledge entry; a store failure counts as no match.
    async fn lookup(&self, chat_id: i64, question: &str) -> Option<KnowledgeEntry> {
        match self.knowledge.best_match(question).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(chat_id, "Knowledge lookup failed: {}", e);
                None
            }
        }
    }
}
