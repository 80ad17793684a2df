//! Networking modules for the comic REST endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls, `generation` sequences them for one run,
//! and `types` defines the shared wire schema.

pub mod api;
pub mod generation;
pub mod types;
