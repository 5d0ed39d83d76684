//! Content document types.
//!
//! The wire format is camelCase JSON. Collections that a hand-authored
//! document may reasonably omit (team, FAQ, gallery, about, ...) default to
//! empty; the business identity, services, areas, testimonials and SEO block
//! are required.

use super::keyed::KeyedList;
use serde::{Deserialize, Serialize};

/// Stock hero photo used when `images.hero` is not set.
pub const DEFAULT_HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1521737711867-e3b97375f902?w=1920&h=1080&fit=crop";
/// Stock about photo used when `images.about` is not set.
pub const DEFAULT_ABOUT_IMAGE: &str =
    "https://images.unsplash.com/photo-1504307651254-35680f356dfd?w=800&h=600&fit=crop";

/// Literal opening-hours value for a day the business does not open.
pub const CLOSED: &str = "Closed";

/// The whole site's content, loaded once and never mutated during a build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStore {
    pub business: Business,
    pub services: Vec<Service>,
    pub service_areas: Vec<ServiceArea>,
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub team: Vec<TeamMember>,
    #[serde(default)]
    pub faq: Vec<Faq>,
    #[serde(default)]
    pub gallery: Vec<GalleryItem>,
    pub seo: Seo,
    #[serde(default)]
    pub colors: Colors,
    #[serde(default)]
    pub images: ImageOverrides,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub schema: SchemaSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub established: Option<i32>,
    /// Day name → `"HH:MM - HH:MM"` or `"Closed"`, in display order.
    #[serde(default)]
    pub opening_hours: KeyedList,
    /// Platform → profile URL.
    #[serde(default)]
    pub social_media: KeyedList,
    /// What the business does, e.g. "Hair Salon". Used in copy and image seeds.
    #[serde(default)]
    pub service: String,
    /// Coordinates for the LocalBusiness schema. Not geocoded from the address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

impl Business {
    /// Opening hours with each value split into its open/close parts.
    pub fn hours(&self) -> impl Iterator<Item = (&str, DayHours<'_>)> {
        self.opening_hours
            .iter()
            .map(|(day, value)| (day, DayHours::parse(value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub latitude: f64,
    pub longitude: f64,
}

/// One opening-hours value, split on the literal `" - "` delimiter.
///
/// The first part opens and the second closes. Anything after a second
/// delimiter is ignored. Parsing never fails: a value without the delimiter
/// comes back as `Open { opens: <whole value>, closes: None }`. Load-time
/// validation rejects both shapes, so they only reach callers for stores
/// built in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayHours<'a> {
    Closed,
    Open {
        opens: &'a str,
        closes: Option<&'a str>,
    },
}

impl<'a> DayHours<'a> {
    pub fn parse(value: &'a str) -> Self {
        if value == CLOSED {
            return DayHours::Closed;
        }
        let mut parts = value.split(" - ");
        DayHours::Open {
            opens: parts.next().unwrap_or(value),
            closes: parts.next(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Routing key, unique across services.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    /// Display string, e.g. "From $45".
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceArea {
    /// Routing key, unique across service areas.
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub text: String,
    /// 1 to 5 stars.
    pub rating: u8,
    /// Free text naming the service received. Matched heuristically against
    /// service titles; not a foreign key.
    #[serde(default)]
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    pub image: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Absolute base URL without trailing slash. May be empty, in which case
    /// the configured default site URL is used for sitemap and robots.
    #[serde(default)]
    pub site_url: String,
    #[serde(default)]
    pub site_name: String,
}

/// Brand colours, emitted as CSS custom properties on every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Colors {
    pub primary: String,
    pub primary_light: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            primary: "#2563eb".to_string(),
            primary_light: "#3b82f6".to_string(),
            secondary: "#1f2937".to_string(),
            accent: "#f59e0b".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl ImageOverrides {
    pub fn hero(&self) -> &str {
        self.hero.as_deref().unwrap_or(DEFAULT_HERO_IMAGE)
    }

    pub fn about(&self) -> &str {
        self.about.as_deref().unwrap_or(DEFAULT_ABOUT_IMAGE)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub title: String,
    /// Markdown. Blank-line separated paragraphs; the first one doubles as
    /// the home-page excerpt.
    pub story: String,
    pub mission: String,
    pub features: Vec<Highlight>,
    pub values: Vec<Highlight>,
}

impl About {
    /// First paragraph of the story.
    pub fn excerpt(&self) -> &str {
        self.story.split("\n\n").next().unwrap_or_default().trim()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

/// Settings for the LocalBusiness / Service structured data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaSettings {
    /// schema.org type, e.g. `LocalBusiness`, `HairSalon`, `Plumber`.
    #[serde(rename = "type")]
    pub business_type: String,
    pub price_range: String,
    pub price_currency: String,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            business_type: "LocalBusiness".to_string(),
            price_range: "$$".to_string(),
            price_currency: "AUD".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub copyright: String,
    pub areas: String,
    pub hours: String,
}
