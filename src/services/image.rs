//! Image service: one prompt → one image URL.
//!
//! Single attempt, fail-fast: no retries here or in the model client.

use tracing::info;

use crate::replicate::{ImageError, ImageModel};

#[derive(Debug, thiserror::Error)]
pub enum ImageServiceError {
    /// The prompt was absent or empty. The model was not called.
    #[error("prompt is required")]
    InvalidInput,
    /// The hosted model call failed.
    #[error("image model error: {0}")]
    Upstream(#[from] ImageError),
}

/// Validate `prompt` and run the image model once.
///
/// # Errors
///
/// [`ImageServiceError::InvalidInput`] for a missing or empty prompt,
/// [`ImageServiceError::Upstream`] for any model failure.
pub async fn generate_image(model: &dyn ImageModel, prompt: Option<&str>) -> Result<String, ImageServiceError> {
    let prompt = prompt
        .filter(|p| !p.is_empty())
        .ok_or(ImageServiceError::InvalidInput)?;

    let url = model.generate(prompt).await?;
    if url.is_empty() {
        return Err(ImageError::EmptyOutput.into());
    }
    info!(prompt_len = prompt.len(), "image: generated");
    Ok(url)
}

#[cfg(test)]
#[path = "image_test.rs"]
mod tests;
