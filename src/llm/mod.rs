//! LLM: JSON completion backing the story endpoint.
//!
//! DESIGN
//! ======
//! Configured from environment variables. `LlmClient` forwards to the
//! Anthropic or `OpenAI` adapter chosen by `LLM_PROVIDER`; each adapter
//! forces a JSON object reply its own way. Callers depend on [`LlmChat`] so
//! story generation can be exercised with a mock.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, Provider};
pub use types::LlmChat;
use types::{JsonReply, JsonRequest, LlmError};

/// Story LLM client for the configured provider.
pub struct LlmClient {
    model: String,
    backend: Backend,
}

enum Backend {
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build a client from parsed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let LlmConfig { provider, api_key, model, timeouts } = config;
        let backend = match provider {
            Provider::Anthropic => Backend::Anthropic(anthropic::AnthropicClient::new(api_key, model.clone(), timeouts)?),
            Provider::OpenAi { mode, base_url } => {
                Backend::OpenAi(openai::OpenAiClient::new(api_key, model.clone(), mode, base_url, timeouts)?)
            }
        };
        Ok(Self { model, backend })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn complete_json(&self, request: &JsonRequest<'_>) -> Result<JsonReply, LlmError> {
        match &self.backend {
            Backend::Anthropic(c) => c.complete_json(request).await,
            Backend::OpenAi(c) => c.complete_json(request).await,
        }
    }
}
