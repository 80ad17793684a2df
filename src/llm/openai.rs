//! OpenAI-compatible API client.
//!
//! Both `/chat/completions` and `/responses` are asked for a `json_object`
//! response format, so the reply text is the story object itself. Replies
//! are read as loose `Value`s because compatible servers disagree on the
//! optional fields.

use serde::Serialize;
use serde_json::Value;

use super::config::{LlmTimeouts, OpenAiApiMode};
use super::types::{JsonReply, JsonRequest, LlmError, TokenUsage};

const JSON_OBJECT: JsonFormat = JsonFormat { kind: "json_object" };

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    mode: OpenAiApiMode,
}

impl OpenAiClient {
    pub fn new(
        api_key: String,
        model: String,
        mode: OpenAiApiMode,
        base_url: String,
        timeouts: LlmTimeouts,
    ) -> Result<Self, LlmError> {
        let http = timeouts.http_client()?;
        Ok(Self { http, api_key, model, base_url, mode })
    }

    pub async fn complete_json(&self, request: &JsonRequest<'_>) -> Result<JsonReply, LlmError> {
        match self.mode {
            OpenAiApiMode::ChatCompletions => {
                let body = CompletionsRequest::new(&self.model, request);
                let text = self.post("/chat/completions", &body).await?;
                parse_completions_reply(&text)
            }
            OpenAiApiMode::Responses => {
                let body = ResponsesRequest::new(&self.model, request);
                let text = self.post("/responses", &body).await?;
                parse_responses_reply(&text)
            }
        }
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
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
        Ok(text)
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Serialize, Clone, Copy)]
struct JsonFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct CompletionsRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Turn<'a>>,
    response_format: JsonFormat,
}

#[derive(Serialize)]
struct Turn<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> CompletionsRequest<'a> {
    fn new(model: &'a str, request: &JsonRequest<'a>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if !request.system.trim().is_empty() {
            messages.push(Turn { role: "system", content: request.system });
        }
        messages.push(Turn { role: "user", content: request.prompt });
        Self { model, max_tokens: request.max_tokens, messages, response_format: JSON_OBJECT }
    }
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    max_output_tokens: u32,
    instructions: &'a str,
    input: &'a str,
    text: TextOptions,
}

#[derive(Serialize)]
struct TextOptions {
    format: JsonFormat,
}

impl<'a> ResponsesRequest<'a> {
    fn new(model: &'a str, request: &JsonRequest<'a>) -> Self {
        Self {
            model,
            max_output_tokens: request.max_tokens,
            instructions: request.system,
            input: request.prompt,
            text: TextOptions { format: JSON_OBJECT },
        }
    }
}

// =============================================================================
// REPLY PARSING
// =============================================================================

fn parse_root(json_text: &str) -> Result<Value, LlmError> {
    serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))
}

fn usage(root: &Value, input_key: &str, output_key: &str) -> TokenUsage {
    let field = |key: &str| {
        root.pointer(&format!("/usage/{key}"))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };
    TokenUsage { input: field(input_key), output: field(output_key) }
}

fn parse_completions_reply(json_text: &str) -> Result<JsonReply, LlmError> {
    let root = parse_root(json_text)?;
    let choice = root
        .pointer("/choices/0")
        .ok_or_else(|| LlmError::ApiParse("chat_completions: missing choices[0]".to_owned()))?;

    let text = choice
        .pointer("/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    Ok(JsonReply {
        text,
        truncated: choice.get("finish_reason").and_then(Value::as_str) == Some("length"),
        usage: usage(&root, "prompt_tokens", "completion_tokens"),
    })
}

fn parse_responses_reply(json_text: &str) -> Result<JsonReply, LlmError> {
    let root = parse_root(json_text)?;

    let text: String = match root.get("output").and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
            .filter_map(|item| item.get("content").and_then(Value::as_array))
            .flatten()
            .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect(),
        None => root
            .get("output_text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
    };

    let truncated = root.pointer("/incomplete_details/reason").and_then(Value::as_str) == Some("max_output_tokens");

    Ok(JsonReply { text, truncated, usage: usage(&root, "input_tokens", "output_tokens") })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
