use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored question/answer pair used as grounding context for generated answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: i64,
    pub category: String,
    pub question: String,
    pub answer: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable part of an entry, validated and ready to be written.
///
/// Updates replace all of these fields at once; there is no partial update.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeDraft {
    pub category: String,
    pub question: String,
    pub answer: String,
    pub keywords: Vec<String>,
}

/// Raw create/update payload as the admin UI sends it.
///
/// Every field is optional here so a missing one can be reported by name
/// instead of failing inside the JSON decoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}
