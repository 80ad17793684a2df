use super::*;
use crate::config::map_lookup;

fn lookup_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    map_lookup(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect(),
    )
}

#[test]
fn defaults_without_env() {
    let lookup = lookup_of(&[]);
    let cfg = ReplicateConfig::from_lookup(&lookup);
    assert!(!cfg.has_token());
    assert_eq!(cfg.base_url, DEFAULT_REPLICATE_BASE_URL);
    assert_eq!(cfg.model_version, DEFAULT_MODEL_VERSION);
    assert_eq!(cfg.inference_steps, 8);
    assert_eq!(cfg.model_variant, "schnell");
    assert_eq!(cfg.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert_eq!(cfg.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    assert_eq!(cfg.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
}

#[test]
fn overrides_are_applied() {
    let lookup = lookup_of(&[
        ("REPLICATE_API_TOKEN", "r8_test"),
        ("REPLICATE_BASE_URL", "http://localhost:9999/v1/"),
        ("REPLICATE_MODEL_VERSION", "abc123"),
        ("IMAGE_INFERENCE_STEPS", "4"),
        ("IMAGE_MODEL_VARIANT", "dev"),
        ("REPLICATE_POLL_INTERVAL_MS", "250"),
    ]);
    let cfg = ReplicateConfig::from_lookup(&lookup);
    assert!(cfg.has_token());
    assert_eq!(cfg.api_token, "r8_test");
    assert_eq!(cfg.base_url, "http://localhost:9999/v1");
    assert_eq!(cfg.model_version, "abc123");
    assert_eq!(cfg.inference_steps, 4);
    assert_eq!(cfg.model_variant, "dev");
    assert_eq!(cfg.poll_interval_ms, 250);
}

#[test]
fn malformed_numbers_fall_back() {
    let lookup = lookup_of(&[("IMAGE_INFERENCE_STEPS", "many"), ("REPLICATE_REQUEST_TIMEOUT_SECS", "-1")]);
    let cfg = ReplicateConfig::from_lookup(&lookup);
    assert_eq!(cfg.inference_steps, DEFAULT_INFERENCE_STEPS);
    assert_eq!(cfg.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}
