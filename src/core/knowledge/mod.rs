pub mod knowledge_models;
pub mod knowledge_service;

pub use knowledge_models::{KnowledgeDraft, KnowledgeEntry, KnowledgeInput};
pub use knowledge_service::{KnowledgeError, KnowledgeService, KnowledgeStore};
