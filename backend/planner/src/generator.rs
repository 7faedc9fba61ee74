use std::sync::Arc;

use tracing::{debug, info, warn};

use docsmith_core::{DocError, DocResult, LlmProvider, LlmRequest};

pub const SYSTEM_PROMPT: &str = "You are a helpful and precise assistant.";
pub const DEFAULT_MODEL: &str = "gpt-4.1";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Prompt-in, text-out wrapper around one provider.
///
/// Provider failures (transport, quota, bad status) surface as
/// [`DocError::Upstream`] so callers can tell them apart from a reply that
/// arrived but could not be parsed.
#[derive(Clone)]
pub struct TextGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl TextGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` and return the trimmed reply text.
    pub async fn generate(&self, prompt: &str) -> DocResult<String> {
        let request = LlmRequest {
            model: self.model.clone(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let provider = self.provider.name();
        debug!(provider = %provider, model = %self.model, "Calling provider");

        match self.provider.complete(&request).await {
            Ok(response) => {
                info!(
                    provider = %response.provider,
                    model = %response.model,
                    tokens = response.tokens_used,
                    latency_ms = response.latency_ms,
                    "Provider responded"
                );
                Ok(response.content.trim().to_string())
            }
            Err(e) => {
                warn!(provider = %provider, error = %e, "Provider failed");
                Err(DocError::upstream(provider, format!("{e:#}")))
            }
        }
    }
}
