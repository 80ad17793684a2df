//! Anthropic Messages API client.
//!
//! The Messages API has no JSON mode, so the request ends with an assistant
//! turn holding `{` and the model continues the object from there. The brace
//! is put back in front of the reply before it leaves this module.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmTimeouts;
use super::types::{JsonReply, JsonRequest, LlmError, TokenUsage};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const JSON_PREFILL: &str = "{";

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = timeouts.http_client()?;
        Ok(Self { http, api_key, model })
    }

    pub async fn complete_json(&self, request: &JsonRequest<'_>) -> Result<JsonReply, LlmError> {
        let body = MessagesRequest::new(&self.model, request);

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_reply(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Turn<'a>; 2],
}

#[derive(Serialize)]
struct Turn<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> MessagesRequest<'a> {
    fn new(model: &'a str, request: &JsonRequest<'a>) -> Self {
        Self {
            model,
            max_tokens: request.max_tokens,
            system: request.system,
            messages: [
                Turn { role: "user", content: request.prompt },
                Turn { role: "assistant", content: JSON_PREFILL },
            ],
        }
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<Block>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Block {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_reply(json: &str) -> Result<JsonReply, LlmError> {
    let api: MessagesResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let text: String = api
        .content
        .into_iter()
        .filter_map(|block| match block {
            Block::Text { text } => Some(text),
            Block::Other => None,
        })
        .collect();

    let reply = JsonReply {
        text,
        truncated: api.stop_reason.as_deref() == Some("max_tokens"),
        usage: TokenUsage { input: api.usage.input_tokens, output: api.usage.output_tokens },
    };
    Ok(reply.with_prefix(JSON_PREFILL))
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
