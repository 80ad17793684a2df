//! REST API helpers for the comic endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since generation only runs
//! in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>` instead of panics. A story reply that is
//! valid JSON but carries no panels is `Ok(vec![])`, not an error; only a
//! transport failure or an unreadable body is `Err`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::PanelSpec;

pub const GENERATE_PLOT_ENDPOINT: &str = "/api/generate_plot";
pub const GENERATE_IMGS_ENDPOINT: &str = "/api/generate_imgs";

/// The two calls one generation run makes. Implemented over HTTP in the
/// browser and by scripted fakes in tests.
#[allow(async_fn_in_trait)]
pub trait ComicApi {
    /// # Errors
    ///
    /// Returns an error string on transport failure or an unreadable body.
    async fn generate_plot(&self, prompt: &str) -> Result<Vec<PanelSpec>, String>;

    /// # Errors
    ///
    /// Returns an error string on transport failure or a reply without an
    /// image URL.
    async fn generate_image(&self, prompt: &str) -> Result<String, String>;
}

/// `ComicApi` over the server's JSON endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpComicApi;

impl ComicApi for HttpComicApi {
    async fn generate_plot(&self, prompt: &str) -> Result<Vec<PanelSpec>, String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(GENERATE_PLOT_ENDPOINT)
                .json(&super::types::PromptRequest { prompt })
                .map_err(|e| e.to_string())?
                .send()
                .await
                .map_err(|e| e.to_string())?;
            let body: super::types::StoryResponse = resp.json().await.map_err(|e| e.to_string())?;
            Ok(body.into_panels())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = prompt;
            Err(not_available_message())
        }
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(GENERATE_IMGS_ENDPOINT)
                .json(&super::types::PromptRequest { prompt })
                .map_err(|e| e.to_string())?
                .send()
                .await
                .map_err(|e| e.to_string())?;
            let status = resp.status();
            let body: super::types::ImageResponse = resp.json().await.map_err(|e| e.to_string())?;
            body.into_url().ok_or_else(|| image_request_failed_message(status))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = prompt;
            Err(not_available_message())
        }
    }
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn image_request_failed_message(status: u16) -> String {
    format!("image request failed: {status}")
}

#[cfg_attr(feature = "hydrate", allow(dead_code))]
fn not_available_message() -> String {
    "not available on server".to_owned()
}
