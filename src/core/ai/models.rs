use thiserror::Error;

/// Sampling settings sent with every generation call.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    /// Let the provider ground answers with web search when the knowledge base is silent.
    pub search_grounding: bool,
}

impl AiConfig {
    /// The fixed sampling parameters the release assistant has always used.
    pub fn release_assistant(model: impl Into<String>, search_grounding: bool) -> Self {
        Self {
            model: model.into(),
            temperature: 0.9,
            max_output_tokens: 1000,
            search_grounding,
        }
    }
}

/// One generation request: the instruction that frames the conversation and
/// the user's question, sent as two parts of a single turn.
#[derive(Debug, Clone, PartialEq)]
pub struct AiPrompt {
    pub system_instruction: String,
    pub question: String,
}

/// Response from an AI provider.
#[derive(Debug, Clone, Default)]
pub struct AiProviderResponse {
    /// Text of the first candidate's first part; `None` when the provider
    /// returned no candidates (e.g. the prompt was blocked).
    pub content: Option<String>,
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Request to the generation API failed: {0}")]
    Transport(String),

    #[error("Generation API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode generation API response: {0}")]
    Decode(String),
}
