//! Replicate predictions API client.
//!
//! `POST /predictions` creates a prediction against a fixed model version;
//! `GET urls.get` reads its status. Pure parsing in `parse_prediction` and
//! `output_to_url` for testability.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::config::ReplicateConfig;
use super::{ImageError, ImageModel};

// =============================================================================
// CLIENT
// =============================================================================

pub struct ReplicateClient {
    http: reqwest::Client,
    config: ReplicateConfig,
}

impl ReplicateClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: ReplicateConfig) -> Result<Self, ImageError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ImageError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn model_version(&self) -> &str {
        &self.config.model_version
    }

    async fn create_prediction(&self, prompt: &str) -> Result<Prediction, ImageError> {
        let body = PredictionRequest {
            version: &self.config.model_version,
            input: PredictionInput {
                prompt,
                num_inference_steps: self.config.inference_steps,
                model: &self.config.model_variant,
            },
        };
        let url = format!("{}/predictions", self.config.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_token)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.request_error(&e))?;
        read_prediction(response).await
    }

    /// Poll one prediction. `remaining` caps this request so the poll cannot
    /// outlive the overall deadline.
    async fn fetch_prediction(&self, url: &str, remaining: Duration) -> Result<Prediction, ImageError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.api_token)
            .timeout(remaining)
            .send()
            .await
            .map_err(|e| self.request_error(&e))?;
        read_prediction(response).await
    }

    fn request_error(&self, err: &reqwest::Error) -> ImageError {
        if err.is_timeout() {
            ImageError::TimedOut { secs: self.config.request_timeout_secs }
        } else {
            ImageError::ApiRequest(err.to_string())
        }
    }
}

#[async_trait::async_trait]
impl ImageModel for ReplicateClient {
    async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        let deadline = Duration::from_secs(self.config.request_timeout_secs);
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);
        let start = Instant::now();

        info!(prompt_len = prompt.len(), "replicate: running model");
        let mut prediction = self.create_prediction(prompt).await?;
        loop {
            match prediction.status() {
                PredictionStatus::Succeeded => {
                    info!(id = %prediction.id, elapsed = ?start.elapsed(), "replicate: prediction succeeded");
                    return output_to_url(prediction.output.as_ref()).ok_or(ImageError::EmptyOutput);
                }
                PredictionStatus::Failed | PredictionStatus::Canceled => {
                    return Err(ImageError::PredictionFailed {
                        status: prediction.status.clone(),
                        detail: prediction.error_detail(),
                    });
                }
                PredictionStatus::Pending => {}
            }

            let Some(poll_url) = prediction.urls.as_ref().and_then(|u| u.get.clone()) else {
                return Err(ImageError::ApiParse("prediction missing urls.get".to_string()));
            };
            debug!(id = %prediction.id, status = %prediction.status, "replicate: polling");
            tokio::time::sleep(poll_interval.min(deadline.saturating_sub(start.elapsed()))).await;
            let remaining = deadline.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return Err(ImageError::TimedOut { secs: self.config.request_timeout_secs });
            }
            prediction = self.fetch_prediction(&poll_url, remaining).await?;
        }
    }
}

async fn read_prediction(response: reqwest::Response) -> Result<Prediction, ImageError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ImageError::ApiRequest(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(ImageError::ApiResponse { status, body: text });
    }
    parse_prediction(&text)
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct PredictionRequest<'a> {
    version: &'a str,
    input: PredictionInput<'a>,
}

#[derive(Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    num_inference_steps: u32,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Prediction {
    #[serde(default)]
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub urls: Option<PredictionUrls>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictionUrls {
    #[serde(default)]
    pub get: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PredictionStatus {
    Pending,
    Succeeded,
    Failed,
    Canceled,
}

impl Prediction {
    pub(crate) fn status(&self) -> PredictionStatus {
        match self.status.as_str() {
            "succeeded" => PredictionStatus::Succeeded,
            "failed" => PredictionStatus::Failed,
            "canceled" => PredictionStatus::Canceled,
            _ => PredictionStatus::Pending,
        }
    }

    fn error_detail(&self) -> String {
        match &self.error {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "no detail".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_prediction(json: &str) -> Result<Prediction, ImageError> {
    serde_json::from_str(json).map_err(|e| ImageError::ApiParse(e.to_string()))
}

/// Coerce prediction output to one URL string.
///
/// Strings pass through; arrays are coerced element-wise and joined with `,`
/// (a single-image model yields one URL). `null` and empty results are `None`.
pub(crate) fn output_to_url(output: Option<&Value>) -> Option<String> {
    let text = coerce(output?);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(coerce).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
