//! Project configuration.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the project directory next to `content.json` and is optional: stock
//! defaults are used for anything it does not set.
//!
//! ## Project Layout
//!
//! ```text
//! my-salon/
//! ├── config.toml              # This file (optional)
//! ├── content.json             # Content store (see `sitesmith scaffold`)
//! └── public/                  # Copied verbatim into the built site
//!     └── images/              # Filled by `sitesmith images`
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_file = "content.json"            # Content store, relative to project
//! public_dir = "public"                    # Static files copied into the site
//! default_site_url = "https://example.com" # Used when seo.siteUrl is empty
//!
//! [related]
//! other_services = 3        # "Other services" on a service page
//! service_testimonials = 2  # Testimonials on a service page
//! area_testimonials = 3     # Testimonials on an area page
//! other_areas = 4           # "Other areas" on an area page
//! home_services = 8         # Services grid on the home page
//! home_testimonials = 6     # Testimonials on the home page
//!
//! [images]
//! output_dir = "public/images"
//! endpoint = "https://generativelanguage.googleapis.com/v1beta/models/imagen-4.0-generate-001:predict"
//! max_retries = 3           # Attempts per image when rate limited
//! backoff_step_secs = 30    # Wait = attempt × step
//! throttle_secs = 15        # Pause after each generated image
//! error_body_limit = 200    # Characters of error body kept in messages
//! request_timeout_secs = 120
//! ```
//!
//! Unknown keys are rejected so typos surface immediately.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up in the project directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Google Imagen 4 prediction endpoint.
pub const IMAGEN_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/imagen-4.0-generate-001:predict";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content store path, relative to the project directory.
    pub content_file: String,
    /// Directory of static files copied into the built site.
    pub public_dir: String,
    /// Base URL for sitemap and robots when `seo.siteUrl` is empty.
    pub default_site_url: String,
    /// How many related items each page shows.
    pub related: RelatedConfig,
    /// Image generation settings.
    pub images: ImagesConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_file: "content.json".to_string(),
            public_dir: "public".to_string(),
            default_site_url: "https://example.com".to_string(),
            related: RelatedConfig::default(),
            images: ImagesConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content_file must not be empty".into(),
            ));
        }
        if !self.default_site_url.starts_with("http://")
            && !self.default_site_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "default_site_url must be an http(s) URL".into(),
            ));
        }
        if self.images.max_retries == 0 {
            return Err(ConfigError::Validation(
                "images.max_retries must be at least 1".into(),
            ));
        }
        if !self.images.endpoint.starts_with("http://")
            && !self.images.endpoint.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "images.endpoint must be an http(s) URL".into(),
            ));
        }
        if self.images.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "images.request_timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Limits for related-item lists on generated pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelatedConfig {
    pub other_services: usize,
    pub service_testimonials: usize,
    pub area_testimonials: usize,
    pub other_areas: usize,
    pub home_services: usize,
    pub home_testimonials: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            other_services: 3,
            service_testimonials: 2,
            area_testimonials: 3,
            other_areas: 4,
            home_services: 8,
            home_testimonials: 6,
        }
    }
}

/// Image generation settings for `sitesmith images`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Destination root for generated images, relative to the project.
    pub output_dir: String,
    /// Text-to-image prediction endpoint. The API key is appended as `?key=`.
    pub endpoint: String,
    /// Attempts per image before giving up on rate limiting.
    pub max_retries: u32,
    /// Linear backoff step: attempt `n` waits `n × step` after a 429.
    pub backoff_step_secs: u64,
    /// Pause after each successfully generated image.
    pub throttle_secs: u64,
    /// Characters of a provider error body kept in the failure message.
    pub error_body_limit: usize,
    /// HTTP request timeout.
    pub request_timeout_secs: u64,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            output_dir: "public/images".to_string(),
            endpoint: IMAGEN_ENDPOINT.to_string(),
            max_retries: 3,
            backoff_step_secs: 30,
            throttle_secs: 15,
            error_body_limit: 200,
            request_timeout_secs: 120,
        }
    }
}

impl ImagesConfig {
    pub fn backoff_step(&self) -> Duration {
        Duration::from_secs(self.backoff_step_secs)
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_secs(self.throttle_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Overlay `user` onto `stock`, descending into tables. A user value that
/// is not a table replaces whatever the stock side had at that key.
pub fn merge_toml(stock: toml::Value, user: toml::Value) -> toml::Value {
    match (stock, user) {
        (toml::Value::Table(mut merged), toml::Value::Table(user)) => {
            for (key, value) in user {
                let value = match merged.remove(&key) {
                    Some(stock_value) => merge_toml(stock_value, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, user) => user,
    }
}

/// Build a config from the text of a `config.toml`, or stock defaults when
/// there is none. Unknown keys and out-of-range values are errors.
pub fn parse_config(text: Option<&str>) -> Result<SiteConfig, ConfigError> {
    let stock = toml::Value::try_from(SiteConfig::default())?;
    let merged = match text {
        Some(text) => merge_toml(stock, toml::from_str(text)?),
        None => stock,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Read `config.toml` from the project directory, if present.
pub fn load_config(project: &Path) -> Result<SiteConfig, ConfigError> {
    let path = project.join(CONFIG_FILE);
    let text = if path.exists() {
        Some(fs::read_to_string(&path)?)
    } else {
        None
    };
    parse_config(text.as_deref())
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sitesmith Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# Content store, relative to the project directory.
content_file = "content.json"

# Static files copied verbatim into the built site.
public_dir = "public"

# Base URL for sitemap.xml and robots.txt when seo.siteUrl is empty.
default_site_url = "https://example.com"

# ---------------------------------------------------------------------------
# Related items shown on generated pages
# ---------------------------------------------------------------------------
[related]
# "Other services" list on each service page.
other_services = 3

# Testimonials on a service page (matched by the service title's first word).
service_testimonials = 2

# Testimonials on an area page (matched by the area name).
area_testimonials = 3

# "Other areas" list on each area page.
other_areas = 4

# Services grid and testimonials on the home page.
home_services = 8
home_testimonials = 6

# ---------------------------------------------------------------------------
# Image generation (sitesmith images)
# ---------------------------------------------------------------------------
[images]
# Where generated images are written, relative to the project directory.
output_dir = "public/images"

# Text-to-image prediction endpoint. The API key is read from GOOGLE_API_KEY
# (or NANOBANA_API_KEY) and appended as ?key=.
endpoint = "https://generativelanguage.googleapis.com/v1beta/models/imagen-4.0-generate-001:predict"

# Attempts per image when the provider answers 429 Too Many Requests.
max_retries = 3

# Linear backoff: attempt n waits n x backoff_step_secs.
backoff_step_secs = 30

# Pause after each generated image to stay under the provider's rate limit.
throttle_secs = 15

# Characters of a provider error body kept in failure messages.
error_body_limit = 200

# HTTP request timeout in seconds.
request_timeout_secs = 120
"##
}
