use super::models::{AiConfig, AiError, AiPrompt, AiProviderResponse};
use super::prompts::build_system_instruction;
use async_trait::async_trait;

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends one generation request to the provider.
    ///
    /// A response without candidates is not an error; it comes back with
    /// `content: None` so the caller can pick its own wording.
    async fn generate(
        &self,
        prompt: &AiPrompt,
        config: &AiConfig,
    ) -> Result<AiProviderResponse, AiError>;
}

// Blanket implementation for Box<dyn AiProvider>
// This allows us to use trait objects in the AiService, so tests can swap
// the Gemini client for a scripted provider.
#[async_trait]
impl AiProvider for Box<dyn AiProvider> {
    async fn generate(
        &self,
        prompt: &AiPrompt,
        config: &AiConfig,
    ) -> Result<AiProviderResponse, AiError> {
        (**self).generate(prompt, config).await
    }
}

pub struct AiService<P: AiProvider> {
    provider: P,
    config: AiConfig,
}

impl<P: AiProvider> AiService<P> {
    pub fn new(provider: P, config: AiConfig) -> Self {
        Self { provider, config }
    }

    pub fn search_grounding(&self) -> bool {
        self.config.search_grounding
    }

    /// Asks the provider to answer `question`, grounded on `knowledge` when we
    /// have a matching knowledge-base answer.
    ///
    /// `Ok(None)` means the provider answered but produced no usable text.
    pub async fn answer(
        &self,
        question: &str,
        knowledge: Option<&str>,
    ) -> Result<Option<String>, AiError> {
        let prompt = AiPrompt {
            system_instruction: build_system_instruction(knowledge, self.config.search_grounding),
            question: question.to_string(),
        };

        let response = self.provider.generate(&prompt, &self.config).await?;

        Ok(response
            .content
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}
