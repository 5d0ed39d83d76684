//! Per-entry request state machine with linear backoff on rate limiting.
//!
//! ```text
//! Pending ──▶ Requesting(1)
//! Requesting(n) ──429──▶ RateLimited(n)
//! Requesting(n) ──2xx + image──▶ Succeeded
//! Requesting(n) ──anything else──▶ Failed
//! RateLimited(n) ──wait n × step──▶ Requesting(n + 1)   while n < max
//! RateLimited(max) ──wait max × step──▶ Failed(rate limit exceeded)
//! ```
//!
//! The final rate-limited attempt still waits out its backoff before the
//! entry is given up, so the provider sees the same pacing whether or not
//! another request follows.

use super::client::{ApiResponse, ImageApi, PredictResponse};
use crate::config::ImagesConfig;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::time::Duration;
use thiserror::Error;

/// Why a single entry could not be generated. Never aborts the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("rate limit exceeded after {0} attempts")]
    RateLimitExceeded(u32),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("no image in response")]
    NoImage,
    #[error("invalid image data: {0}")]
    Decode(String),
    #[error("could not write image: {0}")]
    Write(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Requesting(u32),
    RateLimited(u32),
    Succeeded(Vec<u8>),
    Failed(EntryError),
}

impl EntryState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EntryState::Succeeded(_) | EntryState::Failed(_))
    }
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the current thread.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Wait after the `attempt`-th rate-limited response (1-based).
pub fn backoff_delay(attempt: u32, step: Duration) -> Duration {
    step * attempt
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_step: Duration,
    pub error_body_limit: usize,
}

impl From<&ImagesConfig> for RetryPolicy {
    fn from(config: &ImagesConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_step: config.backoff_step(),
            error_body_limit: config.error_body_limit,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::from(&ImagesConfig::default())
    }
}

/// First `limit` characters of `body`, on a char boundary.
pub fn truncate_body(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}

/// Pull the decoded image bytes out of a successful response body.
pub fn decode_image(body: &str) -> Result<Vec<u8>, EntryError> {
    let parsed: PredictResponse =
        serde_json::from_str(body).map_err(|e| EntryError::InvalidResponse(e.to_string()))?;
    let encoded = parsed.first_image().ok_or(EntryError::NoImage)?;
    STANDARD
        .decode(encoded)
        .map_err(|e| EntryError::Decode(e.to_string()))
}

fn classify(response: ApiResponse, attempt: u32, policy: &RetryPolicy) -> EntryState {
    if response.is_rate_limited() {
        EntryState::RateLimited(attempt)
    } else if !response.is_success() {
        EntryState::Failed(EntryError::Api {
            status: response.status,
            body: truncate_body(&response.body, policy.error_body_limit),
        })
    } else {
        match decode_image(&response.body) {
            Ok(bytes) => EntryState::Succeeded(bytes),
            Err(e) => EntryState::Failed(e),
        }
    }
}

/// Advance one transition. `on_backoff` is told about each wait before it
/// happens.
pub fn step(
    state: EntryState,
    prompt: &str,
    aspect_ratio: &str,
    api: &impl ImageApi,
    sleeper: &impl Sleeper,
    policy: &RetryPolicy,
    on_backoff: &mut impl FnMut(u32, Duration),
) -> EntryState {
    match state {
        EntryState::Pending => EntryState::Requesting(1),
        EntryState::Requesting(attempt) => match api.predict(prompt, aspect_ratio) {
            Ok(response) => classify(response, attempt, policy),
            Err(e) => EntryState::Failed(EntryError::Transport(e.to_string())),
        },
        EntryState::RateLimited(attempt) => {
            let wait = backoff_delay(attempt, policy.backoff_step);
            on_backoff(attempt, wait);
            sleeper.sleep(wait);
            if attempt < policy.max_retries {
                EntryState::Requesting(attempt + 1)
            } else {
                EntryState::Failed(EntryError::RateLimitExceeded(attempt))
            }
        }
        terminal => terminal,
    }
}

/// Drive one entry from `Pending` to a terminal state.
pub fn generate_with_retry(
    prompt: &str,
    aspect_ratio: &str,
    api: &impl ImageApi,
    sleeper: &impl Sleeper,
    policy: &RetryPolicy,
    mut on_backoff: impl FnMut(u32, Duration),
) -> Result<Vec<u8>, EntryError> {
    let mut state = EntryState::Pending;
    loop {
        state = match step(
            state,
            prompt,
            aspect_ratio,
            api,
            sleeper,
            policy,
            &mut on_backoff,
        ) {
            EntryState::Succeeded(bytes) => return Ok(bytes),
            EntryState::Failed(e) => return Err(e),
            next => next,
        };
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::imagegen::ImageGenError;

    fn run(api: &ScriptedApi, sleeper: &RecordingSleeper) -> Result<Vec<u8>, EntryError> {
        generate_with_retry("p", "4:3", api, sleeper, &RetryPolicy::default(), |_, _| {})
    }

    #[test]
    fn backoff_is_linear() {
        let step = Duration::from_secs(30);
        assert_eq!(backoff_delay(1, step), Duration::from_secs(30));
        assert_eq!(backoff_delay(2, step), Duration::from_secs(60));
        assert_eq!(backoff_delay(3, step), Duration::from_secs(90));
    }

    #[test]
    fn success_first_try() {
        let api = ScriptedApi::new(vec![ok_image(b"img")]);
        let sleeper = RecordingSleeper::default();
        assert_eq!(run(&api, &sleeper).unwrap(), b"img");
        assert!(sleeper.sleeps.borrow().is_empty());
    }

    #[test]
    fn two_rate_limits_then_success() {
        let api = ScriptedApi::new(vec![status(429, ""), status(429, ""), ok_image(b"img")]);
        let sleeper = RecordingSleeper::default();
        let mut notified = Vec::new();

        let bytes = generate_with_retry(
            "p",
            "4:3",
            &api,
            &sleeper,
            &RetryPolicy::default(),
            |attempt, wait| notified.push((attempt, wait)),
        )
        .unwrap();

        assert_eq!(bytes, b"img");
        assert_eq!(api.call_count(), 3);
        assert_eq!(
            *sleeper.sleeps.borrow(),
            vec![Duration::from_secs(30), Duration::from_secs(60)]
        );
        assert_eq!(notified, vec![(1, Duration::from_secs(30)), (2, Duration::from_secs(60))]);
    }

    #[test]
    fn rate_limited_every_time_fails_after_final_wait() {
        let api = ScriptedApi::new(vec![status(429, ""), status(429, ""), status(429, "")]);
        let sleeper = RecordingSleeper::default();

        let err = run(&api, &sleeper).unwrap_err();

        assert_eq!(err, EntryError::RateLimitExceeded(3));
        assert_eq!(api.call_count(), 3);
        assert_eq!(
            *sleeper.sleeps.borrow(),
            vec![
                Duration::from_secs(30),
                Duration::from_secs(60),
                Duration::from_secs(90)
            ]
        );
    }

    #[test]
    fn server_error_is_not_retried_and_body_truncated() {
        let long = "x".repeat(500);
        let api = ScriptedApi::new(vec![status(500, &long)]);
        let sleeper = RecordingSleeper::default();

        let err = run(&api, &sleeper).unwrap_err();

        match err {
            EntryError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), 200);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(api.call_count(), 1);
        assert!(sleeper.sleeps.borrow().is_empty());
    }

    #[test]
    fn transport_error_is_not_retried() {
        let api = ScriptedApi::new(vec![Err(ImageGenError::Transport("refused".into()))]);
        let sleeper = RecordingSleeper::default();
        let err = run(&api, &sleeper).unwrap_err();
        assert!(matches!(err, EntryError::Transport(ref m) if m.contains("refused")));
        assert_eq!(api.call_count(), 1);
    }

    #[test]
    fn success_without_image_fails() {
        let api = ScriptedApi::new(vec![status(200, r#"{"predictions":[]}"#)]);
        let sleeper = RecordingSleeper::default();
        assert_eq!(run(&api, &sleeper).unwrap_err(), EntryError::NoImage);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_body("héllo", 2), "hé");
        assert_eq!(truncate_body("ab", 200), "ab");
    }

    #[test]
    fn step_is_idempotent_on_terminal_states() {
        let api = ScriptedApi::default();
        let sleeper = RecordingSleeper::default();
        let state = step(
            EntryState::Failed(EntryError::NoImage),
            "p",
            "1:1",
            &api,
            &sleeper,
            &RetryPolicy::default(),
            &mut |_, _| {},
        );
        assert_eq!(state, EntryState::Failed(EntryError::NoImage));
        assert_eq!(api.call_count(), 0);
    }
}
