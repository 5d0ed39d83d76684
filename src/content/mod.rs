//! The content store: one JSON document holding everything the site shows.
//!
//! [`ContentStore::load`] reads `content.json`, deserializes it into typed
//! structs and validates it in one step, so a malformed document fails the
//! build up front instead of leaking into rendered pages or structured data.
//! The resulting value is immutable and passed by reference to every
//! accessor, schema generator and renderer.

mod keyed;
mod lookup;
mod model;
mod validate;

pub use keyed::KeyedList;
pub use model::{
    About, Business, CLOSED, Colors, ContentStore, DEFAULT_ABOUT_IMAGE, DEFAULT_HERO_IMAGE,
    DayHours, Faq, Footer, GalleryItem, Geo, Highlight, ImageOverrides, SchemaSettings, Seo,
    Service, ServiceArea, TeamMember, Testimonial,
};

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate slug '{slug}' in {collection}")]
    DuplicateSlug {
        collection: &'static str,
        slug: String,
    },
    #[error("Empty slug at position {index} in {collection}")]
    EmptySlug {
        collection: &'static str,
        index: usize,
    },
    #[error("Testimonial from '{name}' has rating {rating}; ratings must be 1-5")]
    RatingOutOfRange { name: String, rating: u8 },
    #[error("Opening hours for {day} must be \"Closed\" or \"open - close\", got {value:?}")]
    MalformedHours { day: String, value: String },
}

impl ContentStore {
    /// Read, parse and validate a content document.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let json = fs::read_to_string(path)?;
        let store = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            services = store.services.len(),
            areas = store.service_areas.len(),
            "loaded content"
        );
        Ok(store)
    }

    /// Parse and validate a content document held in memory.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let store: ContentStore = serde_json::from_str(json)?;
        store.validate()?;
        Ok(store)
    }

    /// Write the document as pretty-printed JSON, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), ContentError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json + "\n")?;
        Ok(())
    }
}
