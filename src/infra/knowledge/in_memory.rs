// In-memory KnowledgeStore used by the unit tests.
//
// Mirrors the PostgreSQL store's contract closely enough for the service and
// responder tests: store-assigned ids, category/newest-first ordering and a
// best-match lookup. Relevance is approximated by counting query words that
// occur in the question and answer; the real ranking comes from PostgreSQL.

use crate::core::knowledge::{KnowledgeDraft, KnowledgeEntry, KnowledgeError, KnowledgeStore};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

pub struct InMemoryKnowledgeStore {
    entries: DashMap<i64, KnowledgeEntry>,
    next_id: AtomicI64,
    lookups: AtomicUsize,
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicI64::new(1),
            lookups: AtomicUsize::new(0),
        }
    }

    /// How many times `best_match` has been called.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn words(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= 3)
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl KnowledgeStore for InMemoryKnowledgeStore {
    async fn list(&self) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        let mut entries: Vec<KnowledgeEntry> =
            self.entries.iter().map(|e| e.value().clone()).collect();

        entries.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });

        Ok(entries)
    }

    async fn create(&self, draft: &KnowledgeDraft) -> Result<KnowledgeEntry, KnowledgeError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();

        let entry = KnowledgeEntry {
            id,
            category: draft.category.clone(),
            question: draft.question.clone(),
            answer: draft.answer.clone(),
            keywords: draft.keywords.clone(),
            created_at: now,
            updated_at: now,
        };
        self.entries.insert(id, entry.clone());

        Ok(entry)
    }

    async fn update(
        &self,
        id: i64,
        draft: &KnowledgeDraft,
    ) -> Result<Option<KnowledgeEntry>, KnowledgeError> {
        Ok(self.entries.get_mut(&id).map(|mut entry| {
            entry.category = draft.category.clone();
            entry.question = draft.question.clone();
            entry.answer = draft.answer.clone();
            entry.keywords = draft.keywords.clone();
            entry.updated_at = Utc::now();
            entry.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<(), KnowledgeError> {
        self.entries.remove(&id);
        Ok(())
    }

    async fn best_match(&self, query: &str) -> Result<Option<KnowledgeEntry>, KnowledgeError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        let terms = Self::words(query);
        let best = self
            .entries
            .iter()
            .map(|entry| {
                let haystack = format!("{} {}", entry.question, entry.answer).to_lowercase();
                let rank = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
                (rank, entry.value().clone())
            })
            .filter(|(rank, _)| *rank > 0)
            .max_by(|(ra, a), (rb, b)| ra.cmp(rb).then(b.id.cmp(&a.id)))
            .map(|(_, entry)| entry);

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(question: &str, answer: &str) -> KnowledgeDraft {
        KnowledgeDraft {
            category: "song".to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            keywords: vec![],
        }
    }

    #[tokio::test]
    async fn test_best_match_prefers_more_matching_words() {
        let store = InMemoryKnowledgeStore::new();
        store
            .create(&draft("Формат песни", "Песня в формате WAV"))
            .await
            .unwrap();
        let cover = store
            .create(&draft("Размер обложки песни", "Обложка JPG, размер 3000x3000"))
            .await
            .unwrap();

        let found = store.best_match("какой размер обложки").await.unwrap();

        assert_eq!(found.map(|e| e.id), Some(cover.id));
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_best_match_returns_none_without_overlap() {
        let store = InMemoryKnowledgeStore::new();
        store.create(&draft("Формат песни", "WAV")).await.unwrap();

        let found = store.best_match("привет").await.unwrap();
        assert!(found.is_none());
    }
}
