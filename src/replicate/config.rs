//! Image model configuration parsed from environment variables.

use crate::config::{Lookup, parse_or, process_env};

pub const DEFAULT_REPLICATE_BASE_URL: &str = "https://api.replicate.com/v1";
/// Fine-tuned model version that draws Lily.
pub const DEFAULT_MODEL_VERSION: &str = "93ffc3c7204e38f5ea5ce755ed3dbe91c6280545aec1f3793c97bd820557dafc";
pub const DEFAULT_INFERENCE_STEPS: u32 = 8;
pub const DEFAULT_MODEL_VARIANT: &str = "schnell";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicateConfig {
    /// Empty when `REPLICATE_API_TOKEN` is unset; requests then fail upstream.
    pub api_token: String,
    pub base_url: String,
    pub model_version: String,
    pub inference_steps: u32,
    pub model_variant: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl ReplicateConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    /// Build the image model config from a key lookup.
    ///
    /// - `REPLICATE_API_TOKEN`: secret, not validated here
    /// - `REPLICATE_BASE_URL`: default `https://api.replicate.com/v1`
    /// - `REPLICATE_MODEL_VERSION`: default Lily fine-tune
    /// - `IMAGE_INFERENCE_STEPS`: default 8
    /// - `IMAGE_MODEL_VARIANT`: default `schnell`
    /// - `REPLICATE_REQUEST_TIMEOUT_SECS`: default 120, covers polling too
    /// - `REPLICATE_CONNECT_TIMEOUT_SECS`: default 10
    /// - `REPLICATE_POLL_INTERVAL_MS`: default 1000
    #[must_use]
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            api_token: lookup("REPLICATE_API_TOKEN").unwrap_or_default(),
            base_url: lookup("REPLICATE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_REPLICATE_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model_version: lookup("REPLICATE_MODEL_VERSION").unwrap_or_else(|| DEFAULT_MODEL_VERSION.to_string()),
            inference_steps: parse_or(lookup, "IMAGE_INFERENCE_STEPS", DEFAULT_INFERENCE_STEPS),
            model_variant: lookup("IMAGE_MODEL_VARIANT").unwrap_or_else(|| DEFAULT_MODEL_VARIANT.to_string()),
            request_timeout_secs: parse_or(lookup, "REPLICATE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: parse_or(lookup, "REPLICATE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            poll_interval_ms: parse_or(lookup, "REPLICATE_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS),
        }
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.api_token.is_empty()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
