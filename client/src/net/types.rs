//! Wire types for the comic REST endpoints.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Body of both `POST /api/generate_plot` and `POST /api/generate_imgs`.
#[derive(Clone, Debug, Serialize)]
pub struct PromptRequest<'a> {
    pub prompt: &'a str,
}

/// One panel of a generated story.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub prompt: String,
    #[serde(default)]
    pub caption: String,
}

/// Story endpoint reply. Error bodies (`{"error": ...}`) parse too, with
/// `result` absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StoryResponse {
    #[serde(default)]
    pub result: Option<StoryResult>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StoryResult {
    #[serde(default)]
    pub comics: Option<Vec<PanelSpec>>,
}

impl StoryResponse {
    /// Panels in story order; empty when the reply carried none.
    pub fn into_panels(self) -> Vec<PanelSpec> {
        self.result.and_then(|r| r.comics).unwrap_or_default()
    }
}

/// Image endpoint reply.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ImageResponse {
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ImageResponse {
    /// The image URL if present and non-empty.
    pub fn into_url(self) -> Option<String> {
        self.image_url.filter(|url| !url.is_empty())
    }
}
