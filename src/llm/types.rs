//! LLM types: the single-turn JSON completion the story service runs on.
//!
//! A story request is one system prompt plus one user idea, and the reply
//! must be a JSON object. Each provider enforces that in its own way (an
//! assistant prefill, or a `json_object` response format), so callers only
//! ever see the object text.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status. The body is logged, never shown.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REQUEST / REPLY
// =============================================================================

/// One story completion: instructions, the user's idea, and an output cap.
#[derive(Debug, Clone, Copy)]
pub struct JsonRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
}

/// Token accounting reported by the provider (zero when absent).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
}

/// Text of the JSON object the model produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonReply {
    pub text: String,
    /// The model stopped at `max_tokens`, so `text` is likely cut mid-object.
    pub truncated: bool,
    pub usage: TokenUsage,
}

impl JsonReply {
    /// Reply text with `prefix` restored in front of it.
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.text.insert_str(0, prefix);
        self
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Provider-neutral JSON completion. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Ask the model for a JSON object answering `request`.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is malformed.
    async fn complete_json(&self, request: &JsonRequest<'_>) -> Result<JsonReply, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
