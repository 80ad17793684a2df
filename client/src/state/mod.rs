//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The page holds one `RwSignal<ComicState>` in context. Every change goes
//! through `ComicState::apply`, so the transition table lives in one place
//! and can be tested without a browser.

pub mod comic;
