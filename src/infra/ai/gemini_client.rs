// =============================================================================
// GEMINI CLIENT - Google AI Studio API Integration
// =============================================================================
//
// Implements `AiProvider` against the Gemini generateContent endpoint
// (https://ai.google.dev/api/generate-content).
//
// **Wire shape:**
// - Authentication: API key is passed as a query parameter (`?key=API_KEY`).
// - The system instruction and the user's question travel as two parts of a
//   single "user" turn rather than a separate `systemInstruction` field.
// - Reply text is `candidates[0].content.parts[0].text`.
//
// **Networking:**
// - All calls go through the configured outbound proxy when one is set.
// - 30 second timeout, no retries; the responder degrades on failure.

use crate::core::ai::{
    models::{AiConfig, AiError, AiPrompt, AiProviderResponse},
    prompts::QUESTION_PREFIX,
    AiProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// GEMINI API DATA STRUCTURES
// =============================================================================

/// A single part of content. Only text parts are used here.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

/// Generation configuration options that control the model's output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    /// Controls randomness. Range: [0.0, 2.0]. Higher = more creative.
    temperature: f64,

    /// Maximum number of tokens to generate in the response.
    max_output_tokens: u32,
}

/// Dynamic Google Search grounding: the model searches only when its own
/// confidence is below `dynamic_threshold`.
#[derive(Debug, Serialize)]
struct GeminiTool {
    google_search_retrieval: GoogleSearchRetrieval,
}

#[derive(Debug, Serialize)]
struct GoogleSearchRetrieval {
    dynamic_retrieval_config: DynamicRetrievalConfig,
}

#[derive(Debug, Serialize)]
struct DynamicRetrievalConfig {
    mode: &'static str,
    dynamic_threshold: f64,
}

/// The request body sent to the Gemini generateContent endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,

    generation_config: GenerationConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    /// Missing when the candidate was blocked before producing anything.
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorDetail,
}

// =============================================================================
// GEMINI CLIENT IMPLEMENTATION
// =============================================================================

pub struct GeminiClient {
    /// HTTP client (proxied, with timeout).
    client: Client,

    /// API key; requests fail fast with `MissingApiKey` when absent.
    api_key: Option<String>,

    /// e.g. `https://generativelanguage.googleapis.com/v1beta`
    api_base: String,
}

impl GeminiClient {
    /// Builds a client that routes through `proxy_url` when given.
    pub fn new(
        api_key: Option<String>,
        api_base: impl Into<String>,
        proxy_url: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy_url) = proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn build_request(prompt: &AiPrompt, config: &AiConfig) -> GenerateContentRequest {
        let tools = config.search_grounding.then(|| {
            vec![GeminiTool {
                google_search_retrieval: GoogleSearchRetrieval {
                    dynamic_retrieval_config: DynamicRetrievalConfig {
                        mode: "MODE_DYNAMIC",
                        dynamic_threshold: 0.3,
                    },
                },
            }]
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part {
                        text: Some(prompt.system_instruction.clone()),
                    },
                    Part {
                        text: Some(format!("{QUESTION_PREFIX}{}", prompt.question)),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
            tools,
        }
    }

    /// First candidate's first part, if it has text.
    fn first_text(response: GenerateContentResponse) -> Option<String> {
        response
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

// reqwest puts the full URL, API key included, into its error messages.
fn transport(err: reqwest::Error) -> AiError {
    AiError::Transport(err.without_url().to_string())
}

#[async_trait]
impl AiProvider for GeminiClient {
    async fn generate(
        &self,
        prompt: &AiPrompt,
        config: &AiConfig,
    ) -> Result<AiProviderResponse, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.api_base, config.model);
        let request = Self::build_request(prompt, config);

        // Log request for debugging (be careful not to log the API key!)
        tracing::debug!(
            "Gemini request to model {}: {} chars of instruction, grounding: {}",
            config.model,
            prompt.system_instruction.len(),
            config.search_grounding
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.map_err(transport)?;

            // Try to parse as Gemini error response for better error messages
            let message = serde_json::from_str::<GeminiErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);

            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiError::Decode(e.without_url().to_string()))?;

        let content = Self::first_text(body);
        if content.is_none() {
            tracing::warn!("Gemini response contained no candidate text");
        }

        Ok(AiProviderResponse { content })
    }
}

// =============================================================================
// TESTS
// =============================================================================
