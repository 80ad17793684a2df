//! Domain services used by HTTP handlers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Services own validation and model orchestration so routes stay focused
//! on request parsing and mapping results to status codes.

pub mod image;
pub mod story;
