// Runtime configuration for the bot.
//
// Everything the components need from the environment is read exactly once,
// here, and handed to each component at construction. Secrets that only one
// operation needs (bot token, Gemini key, webhook URL) stay optional so the
// operation can report them as missing at request time instead of keeping
// the whole server from starting.

use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_TEXT_SEARCH_LANGUAGE: &str = "russian";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// PostgreSQL text search configuration used for knowledge lookups.
    pub text_search_language: String,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub api_base: String,
    /// Public URL of our `/telegram` route, registered by `/setup-webhook`.
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub search_grounding: bool,
    /// Always a full URL; a bare `host:port` is read as an HTTP proxy.
    pub proxy_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseConfig,
    pub telegram: TelegramConfig,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "DATABASE_MAX_CONNECTIONS",
                    reason: format!("expected a positive integer, got {raw:?}"),
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let text_search_language = get("TEXT_SEARCH_LANGUAGE")
            .unwrap_or_else(|| DEFAULT_TEXT_SEARCH_LANGUAGE.to_string());
        if !is_search_config_name(&text_search_language) {
            return Err(ConfigError::Invalid {
                key: "TEXT_SEARCH_LANGUAGE",
                reason: format!("{text_search_language:?} is not a text search configuration name"),
            });
        }

        let search_grounding = match get("GEMINI_SEARCH_GROUNDING") {
            Some(raw) => raw
                .to_lowercase()
                .parse::<bool>()
                .map_err(|_| ConfigError::Invalid {
                    key: "GEMINI_SEARCH_GROUNDING",
                    reason: format!("expected true or false, got {raw:?}"),
                })?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            database: DatabaseConfig {
                url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections,
                text_search_language,
            },
            telegram: TelegramConfig {
                bot_token: get("TELEGRAM_BOT_TOKEN"),
                api_base: get("TELEGRAM_API_BASE")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_string()),
                webhook_url: get("TELEGRAM_WEBHOOK_URL"),
            },
            gemini: GeminiConfig {
                api_key: get("GEMINI_API_KEY"),
                api_base: get("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                search_grounding,
                proxy_url: get("PROXY_URL").map(|p| normalize_proxy_url(&p)).transpose()?,
            },
        })
    }
}

fn is_search_config_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

/// Only HTTP(S) proxies are supported; a bare `host:port` is read as HTTP.
fn normalize_proxy_url(raw: &str) -> Result<String, ConfigError> {
    match raw.split_once("://") {
        None => Ok(format!("http://{raw}")),
        Some((scheme, _)) if scheme.eq_ignore_ascii_case("http") => Ok(raw.to_string()),
        Some((scheme, _)) if scheme.eq_ignore_ascii_case("https") => Ok(raw.to_string()),
        Some((scheme, _)) => Err(ConfigError::Invalid {
            key: "PROXY_URL",
            reason: format!("unsupported proxy scheme {scheme:?}, expected http or https"),
        }),
    }
}
