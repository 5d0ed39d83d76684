//! HTTP client for the text-to-image prediction endpoint.
//!
//! [`ImageApi`] is the seam between the batch runner and the network. The
//! production implementation, [`ImagenClient`], posts one prediction request
//! per call and hands back the raw status and body; interpreting them is the
//! retry loop's job.

use super::ImageGenError;
use crate::config::ImagesConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Raw provider response: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// One text-to-image request. Errors are transport failures only; HTTP
/// error statuses come back as an `Ok` response.
pub trait ImageApi {
    fn predict(&self, prompt: &str, aspect_ratio: &str) -> Result<ApiResponse, ImageGenError>;
}

/// Wrap a slot prompt in the house photography style.
pub fn enhance_prompt(prompt: &str) -> String {
    format!(
        "Professional photograph: {prompt}. High quality, clean composition, good natural \
         lighting, no text or watermarks, realistic."
    )
}

#[derive(Debug, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<Instance>,
    pub parameters: Parameters,
}

#[derive(Debug, Serialize)]
pub struct Instance {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub safety_filter_level: &'static str,
    pub person_generation: &'static str,
}

impl PredictRequest {
    pub fn new(prompt: &str, aspect_ratio: &str) -> Self {
        Self {
            instances: vec![Instance {
                prompt: enhance_prompt(prompt),
            }],
            parameters: Parameters {
                sample_count: 1,
                aspect_ratio: aspect_ratio.to_string(),
                safety_filter_level: "block_few",
                person_generation: "allow_adult",
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
}

impl PredictResponse {
    /// Base64 payload of the first prediction, if any.
    pub fn first_image(&self) -> Option<&str> {
        self.predictions
            .first()
            .and_then(|p| p.bytes_base64_encoded.as_deref())
            .filter(|b| !b.is_empty())
    }
}

/// Blocking reqwest client for the Imagen `predict` endpoint.
pub struct ImagenClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl ImagenClient {
    pub fn new(config: &ImagesConfig, api_key: String) -> Result<Self, ImageGenError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key,
        })
    }
}

impl ImageApi for ImagenClient {
    fn predict(&self, prompt: &str, aspect_ratio: &str) -> Result<ApiResponse, ImageGenError> {
        let request = PredictRequest::new(prompt, aspect_ratio);
        // without_url keeps the key out of error messages.
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .map_err(|e| ImageGenError::Transport(e.without_url().to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ImageGenError::Transport(e.without_url().to_string()))?;
        Ok(ApiResponse { status, body })
    }
}
