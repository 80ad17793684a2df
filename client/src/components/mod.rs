//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the panel grid and page chrome, reading shared state
//! from Leptos context providers.

pub mod footer;
pub mod panel_card;
