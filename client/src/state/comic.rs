//! Comic session state and its transition function.
//!
//! DESIGN
//! ======
//! A run moves `Idle -> RequestingStory -> RequestingImages(0..n) -> Done`,
//! with `Error` reachable from either requesting phase. Image events are
//! keyed by panel index and only accepted for the index currently being
//! requested, so a stray or late event cannot touch another panel.
//!
//! An image failure ends the run in `Error` without a message. Panels that
//! already have images stay visible; later panels stay pending.

#[cfg(test)]
#[path = "comic_test.rs"]
mod comic_test;

use crate::net::types::PanelSpec;

pub const STORY_ERROR_MESSAGE: &str = "An error occurred while generating the story. Please try again.";
pub const EMPTY_STORY_MESSAGE: &str = "Sorry, I couldn't generate a story for this prompt. Please try a different prompt that's more appropriate for a family-friendly dog adventure!";

/// One comic panel as displayed on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    pub prompt: String,
    pub caption: String,
    /// Set once this panel's image request succeeds.
    pub image_url: Option<String>,
}

impl From<PanelSpec> for Panel {
    fn from(spec: PanelSpec) -> Self {
        Self { prompt: spec.prompt, caption: spec.caption, image_url: None }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    RequestingStory,
    /// Waiting on the image for the panel at this index.
    RequestingImages(usize),
    Done,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComicEvent {
    PromptChanged(String),
    StoryRequested,
    StoryFailed,
    StoryEmpty,
    StoryLoaded(Vec<Panel>),
    ImageLoaded { index: usize, url: String },
    ImageFailed { index: usize },
}

/// Session state for the comic page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComicState {
    pub prompt_text: String,
    pub panels: Vec<Panel>,
    pub phase: Phase,
    pub error_message: Option<String>,
}

impl ComicState {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::RequestingStory | Phase::RequestingImages(_))
    }

    /// Start a run if none is in flight. Returns the prompt to send.
    pub fn begin(&mut self) -> Option<String> {
        if self.is_loading() {
            return None;
        }
        self.apply(ComicEvent::StoryRequested);
        Some(self.prompt_text.clone())
    }

    pub fn apply(&mut self, event: ComicEvent) {
        match event {
            ComicEvent::PromptChanged(text) => self.prompt_text = text,
            ComicEvent::StoryRequested => {
                if self.is_loading() {
                    return;
                }
                self.panels.clear();
                self.error_message = None;
                self.phase = Phase::RequestingStory;
            }
            ComicEvent::StoryFailed => self.fail_story(STORY_ERROR_MESSAGE),
            ComicEvent::StoryEmpty => self.fail_story(EMPTY_STORY_MESSAGE),
            ComicEvent::StoryLoaded(panels) => {
                if self.phase != Phase::RequestingStory {
                    return;
                }
                if panels.is_empty() {
                    self.fail_story(EMPTY_STORY_MESSAGE);
                    return;
                }
                self.panels = panels;
                self.phase = Phase::RequestingImages(0);
            }
            ComicEvent::ImageLoaded { index, url } => {
                if self.phase != Phase::RequestingImages(index) {
                    return;
                }
                let Some(panel) = self.panels.get_mut(index) else {
                    return;
                };
                panel.image_url = Some(url);
                self.phase = if index + 1 >= self.panels.len() { Phase::Done } else { Phase::RequestingImages(index + 1) };
            }
            ComicEvent::ImageFailed { index } => {
                if self.phase == Phase::RequestingImages(index) {
                    self.phase = Phase::Error;
                }
            }
        }
    }

    fn fail_story(&mut self, message: &str) {
        if self.phase != Phase::RequestingStory {
            return;
        }
        self.panels.clear();
        self.error_message = Some(message.to_owned());
        self.phase = Phase::Error;
    }
}
