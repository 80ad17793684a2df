//! Replicate: hosted image-generation model.
//!
//! DESIGN
//! ======
//! One prediction per panel. The client asks Replicate to hold the request
//! open (`Prefer: wait`) and falls back to polling the prediction URL until
//! it reaches a terminal status or the configured deadline passes. The
//! prediction output is coerced to a single URL string. Callers depend on
//! [`ImageModel`] so the image endpoint can be exercised with a mock.

pub mod client;
pub mod config;

pub use client::ReplicateClient;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by image model calls.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The HTTP request to the model host failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The model host returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The prediction payload could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The prediction finished as `failed` or `canceled`.
    #[error("prediction {status}: {detail}")]
    PredictionFailed { status: String, detail: String },

    /// The prediction succeeded but produced no usable output.
    #[error("prediction produced no output")]
    EmptyOutput,

    /// The prediction did not finish before the deadline.
    #[error("prediction timed out after {secs}s")]
    TimedOut { secs: u64 },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// IMAGE MODEL TRAIT
// =============================================================================

/// Generates one image for one prompt and returns its URL.
#[async_trait::async_trait]
pub trait ImageModel: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`ImageError`] on transport failure, a failed prediction,
    /// or output that does not coerce to a non-empty string.
    async fn generate(&self, prompt: &str) -> Result<String, ImageError>;
}
