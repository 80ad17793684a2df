//! Environment-driven configuration helpers.
//!
//! DESIGN
//! ======
//! Every typed config (`ServerConfig`, `LlmConfig`, `ReplicateConfig`,
//! `StorySettings`) is parsed through a key lookup rather than reading
//! `std::env` directly, so tests feed a map and never mutate the process
//! environment. `.env` is loaded once in `main` via `dotenvy`.

use std::collections::HashMap;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;

/// Key → value source for configuration.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Lookup backed by the process environment. Empty values count as unset.
#[must_use]
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Build a lookup over a fixed map (used by tests and tooling).
pub fn map_lookup(map: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
    move |key| map.get(key).cloned()
}

/// Parse `key` as `T`, falling back to `default` when unset or malformed.
pub fn parse_or<T: FromStr>(lookup: Lookup<'_>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Process-level server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    /// Read `PORT` (default 3000).
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        Ok(Self { port })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
