//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the hosted-model clients behind traits. Nothing is persisted
//! and no per-session data lives on the server: every request is
//! independent.

use std::sync::Arc;

use crate::llm::LlmChat;
use crate::replicate::ImageModel;
use crate::services::story::StorySettings;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    /// Optional story LLM. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// Hosted image-generation model.
    pub images: Arc<dyn ImageModel>,
    pub story: StorySettings,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>, images: Arc<dyn ImageModel>, story: StorySettings) -> Self {
        Self { llm, images, story }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
