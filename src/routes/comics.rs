//! Comic generation routes: story and per-panel images.
//!
//! ERROR HANDLING
//! ==============
//! Handlers log the underlying error and answer with a fixed message. Model
//! and provider details never reach the caller. The body is read as raw
//! bytes and parsed as JSON whatever its `Content-Type`; a body that is not
//! valid JSON, or lacks a string `prompt`, is treated as a missing prompt.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::services::image::{self, ImageServiceError};
use crate::services::story::{self, ComicPanel, StoryError};
use crate::state::AppState;

pub const PROMPT_REQUIRED: &str = "Prompt is required";
pub const IMAGE_FAILED: &str = "Failed to generate image";
pub const STORY_FAILED: &str = "Failed to generate story";
pub const STORY_NOT_CONFIGURED: &str = "Story generation not configured";

#[derive(Deserialize)]
pub struct PromptBody {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Serialize, Deserialize)]
pub struct StoryResponse {
    pub result: StoryResult,
}

#[derive(Serialize, Deserialize)]
pub struct StoryResult {
    pub comics: Vec<ComicPanel>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message.to_owned() })).into_response()
}

pub(crate) fn prompt_from(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<PromptBody>(body) {
        Ok(body) => body.prompt,
        Err(e) => {
            warn!(error = %e, body_len = body.len(), "comics: unreadable request body");
            None
        }
    }
}

/// `POST /api/generate_imgs`: one panel prompt → one image URL.
pub async fn generate_imgs(State(state): State<AppState>, body: Bytes) -> Response {
    let prompt = prompt_from(&body);
    match image::generate_image(state.images.as_ref(), prompt.as_deref()).await {
        Ok(image_url) => Json(ImageResponse { image_url }).into_response(),
        Err(err) => image_error_response(&err),
    }
}

/// `POST /api/generate_plot`: user prompt → ordered panel list.
pub async fn generate_plot(State(state): State<AppState>, body: Bytes) -> Response {
    let prompt = prompt_from(&body);
    match story::generate_story(state.llm.as_deref(), state.story, prompt.as_deref()).await {
        Ok(comics) => Json(StoryResponse { result: StoryResult { comics } }).into_response(),
        Err(err) => story_error_response(&err),
    }
}

pub(crate) fn image_error_response(err: &ImageServiceError) -> Response {
    match err {
        ImageServiceError::InvalidInput => error_response(StatusCode::BAD_REQUEST, PROMPT_REQUIRED),
        ImageServiceError::Upstream(e) => {
            error!(error = %e, "Error generating image");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, IMAGE_FAILED)
        }
    }
}

pub(crate) fn story_error_response(err: &StoryError) -> Response {
    match err {
        StoryError::InvalidInput => error_response(StatusCode::BAD_REQUEST, PROMPT_REQUIRED),
        StoryError::LlmNotConfigured => error_response(StatusCode::SERVICE_UNAVAILABLE, STORY_NOT_CONFIGURED),
        StoryError::Upstream(e) => {
            error!(error = %e, "Error generating story");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, STORY_FAILED)
        }
    }
}

#[cfg(test)]
#[path = "comics_test.rs"]
mod tests;
