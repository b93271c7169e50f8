use crate::core::knowledge::{KnowledgeDraft, KnowledgeEntry, KnowledgeError, KnowledgeStore};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const ENTRY_COLUMNS: &str = "id, category, question, answer, keywords, created_at, updated_at";

pub struct PgKnowledgeStore {
    pool: PgPool,
    /// Text search configuration, already validated as a plain identifier.
    /// Inlined into SQL so the query matches the expression index.
    language: String,
}

impl PgKnowledgeStore {
    pub fn new(pool: PgPool, language: impl Into<String>) -> Self {
        Self {
            pool,
            language: language.into(),
        }
    }

    pub async fn migrate(&self) -> Result<(), KnowledgeError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS knowledge_base (
                id BIGSERIAL PRIMARY KEY,
                category TEXT NOT NULL,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                keywords TEXT[] NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_knowledge_base_category
            ON knowledge_base(category, created_at DESC)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        let fts_index = format!(
            "CREATE INDEX IF NOT EXISTS idx_knowledge_base_fts_{lang} \
             ON knowledge_base USING GIN (to_tsvector('{lang}', question || ' ' || answer))",
            lang = self.language
        );
        sqlx::query(&fts_index)
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        Ok(())
    }

    fn entry_from_row(row: &PgRow) -> Result<KnowledgeEntry, KnowledgeError> {
        Ok(KnowledgeEntry {
            id: row.try_get("id").map_err(storage)?,
            category: row.try_get("category").map_err(storage)?,
            question: row.try_get("question").map_err(storage)?,
            answer: row.try_get("answer").map_err(storage)?,
            keywords: row.try_get("keywords").map_err(storage)?,
            created_at: row.try_get("created_at").map_err(storage)?,
            updated_at: row.try_get("updated_at").map_err(storage)?,
        })
    }
}

fn storage(err: sqlx::Error) -> KnowledgeError {
    KnowledgeError::Storage(err.to_string())
}

#[async_trait]
impl KnowledgeStore for PgKnowledgeStore {
    async fn list(&self) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM knowledge_base ORDER BY category, created_at DESC, id DESC"
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

        rows.iter().map(Self::entry_from_row).collect()
    }

    async fn create(&self, draft: &KnowledgeDraft) -> Result<KnowledgeEntry, KnowledgeError> {
        let sql = format!(
            "INSERT INTO knowledge_base (category, question, answer, keywords) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ENTRY_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&draft.category)
            .bind(&draft.question)
            .bind(&draft.answer)
            .bind(&draft.keywords)
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;

        Self::entry_from_row(&row)
    }

    async fn update(
        &self,
        id: i64,
        draft: &KnowledgeDraft,
    ) -> Result<Option<KnowledgeEntry>, KnowledgeError> {
        let sql = format!(
            "UPDATE knowledge_base \
             SET category = $1, question = $2, answer = $3, keywords = $4, updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {ENTRY_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&draft.category)
            .bind(&draft.question)
            .bind(&draft.answer)
            .bind(&draft.keywords)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        row.as_ref().map(Self::entry_from_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<(), KnowledgeError> {
        sqlx::query("DELETE FROM knowledge_base WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        Ok(())
    }

    async fn best_match(&self, query: &str) -> Result<Option<KnowledgeEntry>, KnowledgeError> {
        let sql = format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM (
                SELECT {ENTRY_COLUMNS},
                       ts_rank(to_tsvector('{lang}', question || ' ' || answer),
                               plainto_tsquery('{lang}', $1)) AS rank
                FROM knowledge_base
                WHERE to_tsvector('{lang}', question || ' ' || answer)
                      @@ plainto_tsquery('{lang}', $1)
            ) ranked
            WHERE rank > 0
            ORDER BY rank DESC, id DESC
            LIMIT 1
            "#,
            lang = self.language
        );

        let row = sqlx::query(&sql)
            .bind(query)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        row.as_ref().map(Self::entry_from_row).transpose()
    }
}
