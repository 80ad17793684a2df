//! Story service: user prompt → ordered comic panels.
//!
//! DESIGN
//! ======
//! The LLM is asked for a JSON object `{"comics":[{"prompt","caption"}...]}`.
//! A reply the model declines to produce (inappropriate prompt) or that
//! carries no parseable object is a soft failure: an empty panel list, which
//! the view reports to the user. Only transport/provider errors are hard
//! failures.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{Lookup, parse_or, process_env};
use crate::llm::LlmChat;
use crate::llm::types::{JsonRequest, LlmError};

pub const DEFAULT_STORY_PANEL_COUNT: usize = 6;
pub const DEFAULT_STORY_MAX_TOKENS: u32 = 2048;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("prompt is required")]
    InvalidInput,
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("LLM error: {0}")]
    Upstream(#[from] LlmError),
}

/// One comic panel as produced by the story model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicPanel {
    /// Image-generation instruction for this panel.
    pub prompt: String,
    /// Display text shown under the panel.
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorySettings {
    pub panel_count: usize,
    pub max_tokens: u32,
}

impl Default for StorySettings {
    fn default() -> Self {
        Self { panel_count: DEFAULT_STORY_PANEL_COUNT, max_tokens: DEFAULT_STORY_MAX_TOKENS }
    }
}

impl StorySettings {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    /// `STORY_PANEL_COUNT` (default 6, at least 1) and `STORY_MAX_TOKENS` (default 2048).
    #[must_use]
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            panel_count: parse_or(lookup, "STORY_PANEL_COUNT", DEFAULT_STORY_PANEL_COUNT).max(1),
            max_tokens: parse_or(lookup, "STORY_MAX_TOKENS", DEFAULT_STORY_MAX_TOKENS),
        }
    }
}

#[derive(Deserialize)]
struct StoryPayload {
    #[serde(default)]
    comics: Vec<ComicPanel>,
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Generate the panel list for `prompt`.
///
/// # Errors
///
/// [`StoryError::InvalidInput`] for a missing or blank prompt,
/// [`StoryError::LlmNotConfigured`] when no LLM is available, and
/// [`StoryError::Upstream`] when the provider call fails.
pub async fn generate_story(
    llm: Option<&dyn LlmChat>,
    settings: StorySettings,
    prompt: Option<&str>,
) -> Result<Vec<ComicPanel>, StoryError> {
    let prompt = prompt
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or(StoryError::InvalidInput)?;
    let llm = llm.ok_or(StoryError::LlmNotConfigured)?;

    let system = build_system_prompt(settings.panel_count);
    let request = JsonRequest { system: &system, prompt, max_tokens: settings.max_tokens };
    let reply = llm.complete_json(&request).await?;
    if reply.truncated {
        warn!(max_tokens = settings.max_tokens, "story: reply cut at token limit");
    }

    let panels = parse_story(&reply.text, settings.panel_count);
    info!(
        prompt_len = prompt.len(),
        panels = panels.len(),
        input_tokens = reply.usage.input,
        output_tokens = reply.usage.output,
        "story: generated"
    );
    Ok(panels)
}

// =============================================================================
// PROMPT
// =============================================================================

pub(crate) fn build_system_prompt(panel_count: usize) -> String {
    let mut out = String::from(
        "You write short, family-friendly comic stories starring Lily, a small, fluffy, apricot-colored \
         mini golden doodle puppy. The user gives a short idea; turn it into a comic.\n\n",
    );
    let _ = writeln!(out, "Write exactly {panel_count} panels that tell one story from beginning to end.");
    out.push_str(
        "For every panel provide:\n\
         - \"prompt\": a vivid, self-contained image-generation prompt describing Lily, the setting, \
         the action and a bright comic-book art style. Never refer to other panels.\n\
         - \"caption\": one or two short sentences of narration for readers of all ages.\n\n\
         Respond with JSON only, no prose and no code fences, in exactly this shape:\n\
         {\"comics\":[{\"prompt\":\"...\",\"caption\":\"...\"}]}\n\n\
         If the idea is violent, frightening, sexual, hateful or otherwise not suitable for a \
         family-friendly dog adventure, respond with {\"comics\":[]}.",
    );
    out
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract the panel list from model text.
///
/// Accepts the bare object or an object wrapped in prose/code fences.
/// Panels with a blank `prompt` are dropped; at most `max_panels` are kept.
pub(crate) fn parse_story(text: &str, max_panels: usize) -> Vec<ComicPanel> {
    let Some(json) = extract_json_object(text) else {
        warn!(reply_len = text.len(), "story: reply has no JSON object");
        return Vec::new();
    };
    let payload: StoryPayload = match serde_json::from_str(json) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "story: reply JSON did not match panel shape");
            return Vec::new();
        }
    };
    payload
        .comics
        .into_iter()
        .filter(|panel| !panel.prompt.trim().is_empty())
        .take(max_panels)
        .collect()
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
#[path = "story_test.rs"]
mod tests;
