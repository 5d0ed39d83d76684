//! Placeholder image URLs from picsum.photos.
//!
//! A freshly scaffolded site references `/images/...` files that only exist
//! once `sitesmith images` has run. Rendered `<img>` tags carry one of these
//! URLs as an `onerror` fallback so pages look complete in the meantime.
//! Seeds are stable, so the same slot always shows the same stock photo.

const PICSUM: &str = "https://picsum.photos/seed";

/// URL-safe seed: lowercase ASCII words joined by dashes.
pub fn seed(text: &str) -> String {
    slug::slugify(text)
}

pub fn fallback_image(seed_text: &str, width: u32, height: u32) -> String {
    format!("{PICSUM}/{}/{width}/{height}", seed(seed_text))
}

pub fn hero_image(service: &str) -> String {
    fallback_image(&format!("hero-{service}"), 1920, 1080)
}

pub fn service_image(service: &str, index: usize) -> String {
    fallback_image(&format!("{service}-{index}"), 800, 600)
}

pub fn team_image(name: &str) -> String {
    fallback_image(&format!("team-{name}"), 400, 400)
}

pub fn gallery_image(category: &str, index: usize) -> String {
    fallback_image(&format!("gallery-{category}-{index}"), 600, 600)
}
