// This is the entry point of the release assistant bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (PostgreSQL, Gemini, Telegram)
// - `web/` = HTTP adapters (axum routes)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Serve the HTTP endpoints

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "config/app_config.rs"]
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;
#[cfg(test)]
mod testing;
#[path = "web/web_layer.rs"]
mod web;

use crate::config::AppConfig;
use crate::core::ai::{AiConfig, AiProvider, AiService};
use crate::core::knowledge::{KnowledgeService, KnowledgeStore};
use crate::core::messaging::{Messenger, WebhookRegistrar};
use crate::core::responder::ResponderService;
use crate::infra::ai::GeminiClient;
use crate::infra::knowledge::PgKnowledgeStore;
use crate::infra::message_log::PgMessageLogStore;
use crate::infra::telegram::TelegramClient;
use crate::web::AppState;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "release_assistant_bot=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    let knowledge_store =
        PgKnowledgeStore::new(pool.clone(), config.database.text_search_language.clone());
    knowledge_store
        .migrate()
        .await
        .context("Failed to migrate knowledge_base")?;
    let knowledge_store: Arc<dyn KnowledgeStore> = Arc::new(knowledge_store);

    let log_store = PgMessageLogStore::new(pool);
    log_store
        .migrate()
        .await
        .context("Failed to migrate bot_messages")?;

    let telegram: Arc<dyn Messenger> = Arc::new(
        TelegramClient::new(
            config.telegram.bot_token.clone(),
            config.telegram.api_base.clone(),
        )
        .context("Failed to create Telegram client")?,
    );
    if config.telegram.bot_token.is_none() {
        tracing::warn!("TELEGRAM_BOT_TOKEN is not set; replies and webhook setup will fail");
    }

    let gemini = GeminiClient::new(
        config.gemini.api_key.clone(),
        config.gemini.api_base.clone(),
        config.gemini.proxy_url.as_deref(),
    )
    .context("Failed to create Gemini client")?;
    if config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; questions will get the fallback reply");
    }
    let ai_service = AiService::new(
        Box::new(gemini) as Box<dyn AiProvider>,
        AiConfig::release_assistant(config.gemini.model.clone(), config.gemini.search_grounding),
    );

    let responder = ResponderService::new(
        knowledge_store.clone(),
        ai_service,
        telegram.clone(),
        Arc::new(log_store),
    );

    let state = AppState {
        knowledge: Arc::new(KnowledgeService::new(knowledge_store)),
        registrar: Arc::new(WebhookRegistrar::new(
            telegram,
            config.telegram.webhook_url.clone(),
        )),
        responder: Arc::new(responder),
    };

    let app = web::router(state);

    tracing::info!(
        addr = %config.bind_addr,
        model = %config.gemini.model,
        proxied = config.gemini.proxy_url.is_some(),
        "Release assistant bot listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
