//! Image generation: fill the site's image slots from a text-to-image API.
//!
//! The module is split into:
//! - **Manifest**: the slots to fill ([`default_manifest`] or a JSON file)
//! - **Client**: [`ImageApi`] trait + [`ImagenClient`] (reqwest, blocking)
//! - **Retry**: per-entry state machine with linear backoff on 429
//! - **Runner**: sequential batch with skip-if-exists and throttling
//!
//! Sleeping and HTTP both sit behind traits so a whole batch can run in
//! tests without waiting or touching the network.

mod client;
mod manifest;
mod retry;
mod runner;

pub use client::{
    ApiResponse, ImageApi, ImagenClient, PredictRequest, PredictResponse, enhance_prompt,
};
pub use manifest::{ManifestEntry, default_manifest, load_manifest};
pub use retry::{
    EntryError, EntryState, RetryPolicy, Sleeper, ThreadSleeper, backoff_delay,
    generate_with_retry,
};
pub use runner::{ImageEvent, RunOptions, RunSummary, run};

use thiserror::Error;

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GOOGLE_API_KEY", "NANOBANA_API_KEY"];

#[derive(Error, Debug)]
pub enum ImageGenError {
    #[error("GOOGLE_API_KEY or NANOBANA_API_KEY environment variable required")]
    MissingApiKey,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("{0}")]
    Transport(String),
}

/// First non-empty value among [`API_KEY_VARS`] according to `lookup`.
pub fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String, ImageGenError> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .ok_or(ImageGenError::MissingApiKey)
}

/// Read the API key from the process environment.
pub fn api_key_from_env() -> Result<String, ImageGenError> {
    api_key_from(|name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn google_key_preferred() {
        let key = api_key_from(env(&[("NANOBANA_API_KEY", "b"), ("GOOGLE_API_KEY", "g")]));
        assert_eq!(key.unwrap(), "g");
    }

    #[test]
    fn falls_back_to_second_variable() {
        let key = api_key_from(env(&[("NANOBANA_API_KEY", "b")]));
        assert_eq!(key.unwrap(), "b");
    }

    #[test]
    fn empty_value_counts_as_unset() {
        let key = api_key_from(env(&[("GOOGLE_API_KEY", ""), ("NANOBANA_API_KEY", "b")]));
        assert_eq!(key.unwrap(), "b");
    }

    #[test]
    fn missing_key_is_error() {
        assert!(matches!(
            api_key_from(env(&[])),
            Err(ImageGenError::MissingApiKey)
        ));
    }
}
