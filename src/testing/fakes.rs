// Test doubles for the core ports.
//
// Each fake is cheap to clone and clones share state, so a test can hand one
// copy to the service under test and inspect another afterwards.

use crate::core::ai::models::{AiError, AiPrompt, AiProviderResponse};
use crate::core::ai::{AiConfig, AiProvider};
use crate::core::knowledge::{KnowledgeDraft, KnowledgeEntry, KnowledgeError, KnowledgeStore};
use crate::core::messaging::{Messenger, MessagingError};
use crate::core::responder::{LogStoreError, MessageLog, MessageLogStore};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

// ============================================================================
// AI PROVIDER
// ============================================================================

#[derive(Clone)]
enum Script {
    Answer(String),
    NoCandidates,
    Fail,
}

#[derive(Clone)]
pub struct ScriptedAiProvider {
    script: Script,
    prompts: Arc<Mutex<Vec<AiPrompt>>>,
}

impl ScriptedAiProvider {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::with_script(Script::Answer(text.to_string()))
    }

    pub fn without_candidates() -> Self {
        Self::with_script(Script::NoCandidates)
    }

    pub fn failing() -> Self {
        Self::with_script(Script::Fail)
    }

    /// Every prompt received so far, oldest first.
    pub fn prompts(&self) -> Vec<AiPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for ScriptedAiProvider {
    async fn generate(
        &self,
        prompt: &AiPrompt,
        _config: &AiConfig,
    ) -> Result<AiProviderResponse, AiError> {
        self.prompts.lock().unwrap().push(prompt.clone());

        match &self.script {
            Script::Answer(text) => Ok(AiProviderResponse {
                content: Some(text.clone()),
            }),
            Script::NoCandidates => Ok(AiProviderResponse { content: None }),
            Script::Fail => Err(AiError::Transport("operation timed out".to_string())),
        }
    }
}

// ============================================================================
// MESSENGER
// ============================================================================

#[derive(Clone)]
enum Refusal {
    Rejected(String),
    MissingToken,
    Transport(String),
}

impl Refusal {
    fn to_error(&self) -> MessagingError {
        match self {
            Refusal::Rejected(description) => MessagingError::Rejected(description.clone()),
            Refusal::MissingToken => MessagingError::MissingToken,
            Refusal::Transport(cause) => MessagingError::Transport(cause.clone()),
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingMessenger {
    refusal: Option<Refusal>,
    sent: Arc<Mutex<Vec<(i64, String)>>>,
    webhooks: Arc<Mutex<Vec<String>>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    fn refusing(refusal: Refusal) -> Self {
        Self {
            refusal: Some(refusal),
            ..Self::default()
        }
    }

    /// A messenger whose every call is refused with `description`.
    pub fn rejecting(description: &str) -> Self {
        Self::refusing(Refusal::Rejected(description.to_string()))
    }

    /// A messenger configured without a bot token.
    pub fn without_token() -> Self {
        Self::refusing(Refusal::MissingToken)
    }

    /// A messenger whose provider cannot be reached.
    pub fn unreachable(cause: &str) -> Self {
        Self::refusing(Refusal::Transport(cause.to_string()))
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn webhooks(&self) -> Vec<String> {
        self.webhooks.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    fn ensure_ready(&self) -> Result<(), MessagingError> {
        match &self.refusal {
            Some(Refusal::MissingToken) => Err(MessagingError::MissingToken),
            _ => Ok(()),
        }
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessagingError> {
        if let Some(refusal) = &self.refusal {
            return Err(refusal.to_error());
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }

    async fn set_webhook(&self, url: &str) -> Result<String, MessagingError> {
        if let Some(refusal) = &self.refusal {
            return Err(refusal.to_error());
        }
        self.webhooks.lock().unwrap().push(url.to_string());
        Ok("Webhook was set".to_string())
    }
}

// ============================================================================
// MESSAGE LOG
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryMessageLog {
    fail: bool,
    entries: Arc<Mutex<Vec<MessageLog>>>,
}

impl InMemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> Vec<MessageLog> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageLogStore for InMemoryMessageLog {
    async fn record(&self, entry: &MessageLog) -> Result<(), LogStoreError> {
        if self.fail {
            return Err(LogStoreError::Storage("connection refused".to_string()));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

// ============================================================================
// KNOWLEDGE STORE
// ============================================================================

/// A knowledge store whose database is always unreachable.
pub struct FailingKnowledgeStore;

impl FailingKnowledgeStore {
    fn unavailable() -> KnowledgeError {
        KnowledgeError::Storage("connection refused".to_string())
    }
}

#[async_trait]
impl KnowledgeStore for FailingKnowledgeStore {
    async fn list(&self) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        Err(Self::unavailable())
    }

    async fn create(&self, _: &KnowledgeDraft) -> Result<KnowledgeEntry, KnowledgeError> {
        Err(Self::unavailable())
    }

    async fn update(
        &self,
        _: i64,
        _: &KnowledgeDraft,
    ) -> Result<Option<KnowledgeEntry>, KnowledgeError> {
        Err(Self::unavailable())
    }

    async fn delete(&self, _: i64) -> Result<(), KnowledgeError> {
        Err(Self::unavailable())
    }

    async fn best_match(&self, _: &str) -> Result<Option<KnowledgeEntry>, KnowledgeError> {
        Err(Self::unavailable())
    }
}
