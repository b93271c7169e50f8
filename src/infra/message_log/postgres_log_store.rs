use crate::core::responder::{LogStoreError, MessageLog, MessageLogStore};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

/// Append-only exchange log in `bot_messages`.
pub struct PgMessageLogStore {
    pool: PgPool,
}

impl PgMessageLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bot_messages (
                id BIGSERIAL PRIMARY KEY,
                chat_id BIGINT NOT NULL,
                user_id BIGINT,
                username TEXT NOT NULL DEFAULT '',
                message_text TEXT NOT NULL,
                bot_response TEXT NOT NULL,
                response_time_ms INTEGER NOT NULL,
                error_message TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_bot_messages_chat
            ON bot_messages(chat_id, created_at DESC)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl MessageLogStore for PgMessageLogStore {
    async fn record(&self, entry: &MessageLog) -> Result<(), LogStoreError> {
        sqlx::query(
            r#"
            INSERT INTO bot_messages
                (chat_id, user_id, username, message_text, bot_response, response_time_ms, error_message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.chat_id)
        .bind(entry.user_id)
        .bind(&entry.username)
        .bind(&entry.message_text)
        .bind(&entry.bot_response)
        .bind(entry.response_time_ms)
        .bind(entry.error_message.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| LogStoreError::Storage(e.to_string()))?;

        Ok(())
    }
}
