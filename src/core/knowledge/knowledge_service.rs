// Knowledge base administration - the business rules behind the /knowledge endpoint.
//
// The service validates payloads and delegates persistence to a KnowledgeStore.
// The responder talks to the same store directly for its best-match lookup.

use super::knowledge_models::{KnowledgeDraft, KnowledgeEntry, KnowledgeInput};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Missing required field: {0}")]
    Validation(&'static str),

    #[error("Storage error: {0}")]
    Storage(String),
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for persisting knowledge entries.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Every entry, grouped by category, newest first within a category.
    async fn list(&self) -> Result<Vec<KnowledgeEntry>, KnowledgeError>;

    /// Insert a new entry. The store assigns `id` and both timestamps.
    async fn create(&self, draft: &KnowledgeDraft) -> Result<KnowledgeEntry, KnowledgeError>;

    /// Replace every mutable field of `id` and refresh `updated_at`.
    /// Returns `None` when no entry has that id.
    async fn update(
        &self,
        id: i64,
        draft: &KnowledgeDraft,
    ) -> Result<Option<KnowledgeEntry>, KnowledgeError>;

    /// Remove `id` if present. Removing a missing id is not an error.
    async fn delete(&self, id: i64) -> Result<(), KnowledgeError>;

    /// The single entry whose question and answer rank highest against `query`
    /// by full-text relevance, or `None` when nothing matches at all.
    async fn best_match(&self, query: &str) -> Result<Option<KnowledgeEntry>, KnowledgeError>;
}

// Lets the web layer and the responder share one store behind an Arc<dyn ...>.
#[async_trait]
impl<T: KnowledgeStore + ?Sized> KnowledgeStore for Arc<T> {
    async fn list(&self) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        (**self).list().await
    }

    async fn create(&self, draft: &KnowledgeDraft) -> Result<KnowledgeEntry, KnowledgeError> {
        (**self).create(draft).await
    }

    async fn update(
        &self,
        id: i64,
        draft: &KnowledgeDraft,
    ) -> Result<Option<KnowledgeEntry>, KnowledgeError> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<(), KnowledgeError> {
        (**self).delete(id).await
    }

    async fn best_match(&self, query: &str) -> Result<Option<KnowledgeEntry>, KnowledgeError> {
        (**self).best_match(query).await
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

impl KnowledgeInput {
    /// Checks the fields shared by create and update. Keywords default to empty.
    pub fn into_draft(self) -> Result<KnowledgeDraft, KnowledgeError> {
        Ok(KnowledgeDraft {
            category: self.category.ok_or(KnowledgeError::Validation("category"))?,
            question: self.question.ok_or(KnowledgeError::Validation("question"))?,
            answer: self.answer.ok_or(KnowledgeError::Validation("answer"))?,
            keywords: self.keywords.unwrap_or_default(),
        })
    }
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct KnowledgeService<S: KnowledgeStore> {
    store: S,
}

impl<S: KnowledgeStore> KnowledgeService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        self.store.list().await
    }

    pub async fn create(&self, input: KnowledgeInput) -> Result<KnowledgeEntry, KnowledgeError> {
        let draft = input.into_draft()?;
        let entry = self.store.create(&draft).await?;
        tracing::info!(id = entry.id, category = %entry.category, "Knowledge entry created");
        Ok(entry)
    }

    pub async fn update(
        &self,
        input: KnowledgeInput,
    ) -> Result<Option<KnowledgeEntry>, KnowledgeError> {
        let id = input.id.ok_or(KnowledgeError::Validation("id"))?;
        let draft = input.into_draft()?;

        let updated = self.store.update(id, &draft).await?;
        if updated.is_none() {
            tracing::debug!(id, "Update matched no knowledge entry");
        }
        Ok(updated)
    }

    /// Deleting without an id, or an id that is already gone, still succeeds.
    pub async fn delete(&self, id: Option<i64>) -> Result<(), KnowledgeError> {
        match id {
            Some(id) => self.store.delete(id).await,
            None => Ok(()),
        }
    }
}
