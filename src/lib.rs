//! # sitesmith
//!
//! A static marketing-site generator for local service businesses: salons,
//! trades, clinics. One `content.json` document describes the business, and
//! sitesmith renders it into a small SEO-oriented website with per-service
//! and per-area landing pages, schema.org structured data, a sitemap and a
//! robots file.
//!
//! # Architecture
//!
//! ```text
//! scaffold   business name, service, location  →  content.json
//! images     manifest + text-to-image API      →  public/images/
//! build      content.json + public/            →  dist/
//! ```
//!
//! The three commands are independent. `scaffold` bootstraps content for a
//! new customer, `images` fills the image slots that content refers to, and
//! `build` renders the site. A scaffolded project builds immediately: every
//! image falls back to a deterministic placeholder until a real file exists.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | The content store: data model, loading, validation, slug lookups |
//! | [`generate`] | Renders every route to HTML with Maud and assembles `dist/` |
//! | [`routes`] | Route enumeration, URLs, `sitemap.xml` and `robots.txt` |
//! | [`schema`] | schema.org JSON-LD builders (LocalBusiness, Service, FAQPage, BreadcrumbList) |
//! | [`placeholder`] | Deterministic stock-photo fallback URLs for image slots |
//! | [`scaffold`] | Synthesizes a complete content store from a few inputs |
//! | [`imagegen`] | Batch image generation with rate-limit backoff and throttling |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Shared view types (`Breadcrumb`, navigation) |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Routes Come From Slugs
//!
//! Pages are enumerated from the content store's slugs, never from user
//! input, so a route that does not resolve cannot be rendered. Lookups by
//! slug return `Option` and the renderer only ever asks for slugs it just
//! enumerated.
//!
//! ## Validation At Load
//!
//! Duplicate slugs, out-of-range ratings and malformed hours are rejected
//! when `content.json` is loaded. Rendering assumes a valid store.
//!
//! ## Explicit Time And Sleep
//!
//! The current year and the sitemap date are passed into the pure
//! generators. The image batch sleeps through a [`imagegen::Sleeper`] and
//! talks HTTP through [`imagegen::ImageApi`], so backoff and throttling are
//! tested without waiting.

pub mod config;
pub mod content;
pub mod generate;
pub mod imagegen;
pub mod logging;
pub mod output;
pub mod placeholder;
pub mod routes;
pub mod scaffold;
pub mod schema;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::OnceLock;

/// Version shown by `--version` and in the generator meta tag.
///
/// The package version on a release tag, `dev@<hash>` otherwise.
pub fn version_string() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        if env!("ON_RELEASE_TAG") == "true" {
            env!("CARGO_PKG_VERSION").to_string()
        } else {
            let hash = env!("GIT_HASH");
            if hash.is_empty() {
                "dev@unknown".to_string()
            } else {
                format!("dev@{hash}")
            }
        }
    })
}
