//! Sequential generation driver for one comic run.
//!
//! DESIGN
//! ======
//! One story call, then one image call per panel in list order. Each image
//! request is issued only after the previous one has resolved, so at most
//! one request is in flight and panels fill in left to right. The first
//! image failure ends the run; there are no retries.
//!
//! The driver reports progress as `ComicEvent`s through `dispatch` and never
//! touches state directly, which keeps it runnable without a browser.

#[cfg(test)]
#[path = "generation_test.rs"]
mod generation_test;

use super::api::ComicApi;
use crate::state::comic::{ComicEvent, Panel};

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The story call failed at the transport level.
    StoryFailed,
    /// The story reply carried no panels.
    StoryEmpty,
    /// The image request at `index` failed; later panels were not requested.
    Stalled { index: usize },
    /// Every panel received an image.
    Completed { panels: usize },
}

/// Drive one run for `prompt`. The caller must already have applied
/// `ComicEvent::StoryRequested`.
pub async fn run_generation<A, F>(api: &A, prompt: &str, mut dispatch: F) -> GenerationOutcome
where
    A: ComicApi,
    F: FnMut(ComicEvent),
{
    let specs = match api.generate_plot(prompt).await {
        Ok(specs) => specs,
        Err(e) => {
            warn(&format!("story request failed: {e}"));
            dispatch(ComicEvent::StoryFailed);
            return GenerationOutcome::StoryFailed;
        }
    };
    if specs.is_empty() {
        dispatch(ComicEvent::StoryEmpty);
        return GenerationOutcome::StoryEmpty;
    }

    let prompts: Vec<String> = specs.iter().map(|spec| spec.prompt.clone()).collect();
    dispatch(ComicEvent::StoryLoaded(specs.into_iter().map(Panel::from).collect()));

    for (index, panel_prompt) in prompts.iter().enumerate() {
        match api.generate_image(panel_prompt).await {
            Ok(url) => dispatch(ComicEvent::ImageLoaded { index, url }),
            Err(e) => {
                warn(&format!("image request {index} failed: {e}"));
                dispatch(ComicEvent::ImageFailed { index });
                return GenerationOutcome::Stalled { index };
            }
        }
    }

    GenerationOutcome::Completed { panels: prompts.len() }
}

fn warn(message: &str) {
    #[cfg(feature = "hydrate")]
    log::warn!("{message}");
    #[cfg(not(feature = "hydrate"))]
    let _ = message;
}
