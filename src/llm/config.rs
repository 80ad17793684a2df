//! LLM configuration parsed from environment variables.

use std::time::Duration;

use super::types::LlmError;
use crate::config::{Lookup, parse_or, process_env};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Which endpoint family an `OpenAI`-compatible server is spoken to through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiApiMode {
    ChatCompletions,
    Responses,
}

/// Provider plus the settings only that provider reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAi { mode: OpenAiApiMode, base_url: String },
}

impl Provider {
    fn default_model(&self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-5-20250929",
            Self::OpenAi { .. } => "gpt-4o",
        }
    }

    fn default_key_var(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAi { .. } => "OPENAI_API_KEY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl LlmTimeouts {
    /// HTTP client carrying these timeouts.
    pub(crate) fn http_client(self) -> Result<reqwest::Client, LlmError> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.request_secs))
            .connect_timeout(Duration::from_secs(self.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`LlmConfig::from_lookup`].
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(&process_env)
    }

    /// Build typed LLM config from a key lookup.
    ///
    /// - `LLM_PROVIDER`: `anthropic` (default) or `openai`
    /// - `LLM_API_KEY_ENV`: names the variable holding the key, default
    ///   `ANTHROPIC_API_KEY` or `OPENAI_API_KEY` for the chosen provider
    /// - `LLM_MODEL`: provider default when absent
    /// - `LLM_OPENAI_MODE`: `responses` (default) or `chat_completions`
    /// - `LLM_OPENAI_BASE_URL`: for `OpenAI`-compatible servers
    /// - `LLM_REQUEST_TIMEOUT_SECS` (120), `LLM_CONNECT_TIMEOUT_SECS` (10)
    ///
    /// # Errors
    ///
    /// Returns an error if the key variable is unset or empty, or an enum
    /// value is unknown.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, LlmError> {
        let provider = parse_provider(lookup)?;

        let key_var = lookup("LLM_API_KEY_ENV").unwrap_or_else(|| provider.default_key_var().to_owned());
        let api_key = lookup(&key_var)
            .filter(|key| !key.trim().is_empty())
            .ok_or(LlmError::MissingApiKey { var: key_var })?;

        let model = lookup("LLM_MODEL").unwrap_or_else(|| provider.default_model().to_owned());
        let timeouts = LlmTimeouts {
            request_secs: parse_or(lookup, "LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(lookup, "LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { provider, api_key, model, timeouts })
    }
}

fn parse_provider(lookup: Lookup<'_>) -> Result<Provider, LlmError> {
    match lookup("LLM_PROVIDER").as_deref().unwrap_or("anthropic") {
        "anthropic" => Ok(Provider::Anthropic),
        "openai" => {
            let mode = match lookup("LLM_OPENAI_MODE").as_deref().unwrap_or("responses") {
                "responses" => OpenAiApiMode::Responses,
                "chat_completions" => OpenAiApiMode::ChatCompletions,
                other => {
                    return Err(LlmError::ConfigParse(format!(
                        "unknown LLM_OPENAI_MODE '{other}' (expected 'responses' or 'chat_completions')"
                    )));
                }
            };
            let base_url = lookup("LLM_OPENAI_BASE_URL")
                .as_deref()
                .unwrap_or(DEFAULT_OPENAI_BASE_URL)
                .trim_end_matches('/')
                .to_owned();
            Ok(Provider::OpenAi { mode, base_url })
        }
        other => Err(LlmError::ConfigParse(format!("unknown LLM_PROVIDER: {other}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
