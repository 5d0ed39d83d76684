//! schema.org structured data (JSON-LD).
//!
//! Four generators map the content store onto the vocabularies search
//! engines read from `<script type="application/ld+json">` blocks:
//!
//! | Generator | schema.org type | Embedded on |
//! |-----------|-----------------|-------------|
//! | [`local_business`] | `LocalBusiness` (or `schema.type`) | every page |
//! | [`faq_page`] | `FAQPage` | every page |
//! | [`service`] | `Service` | service pages |
//! | [`breadcrumbs`] | `BreadcrumbList` | service and area pages |
//!
//! All generators are pure: the same store yields the same document.
//!
//! ## Known lossy spots
//!
//! - Offer prices keep only the digits of the display price, so
//!   `"$45-$60"` becomes `"4560"`. Ranges are not interpreted.
//! - Coordinates come from `business.geo`, falling back to a fixed
//!   placeholder pair; nothing is geocoded from the address.
//! - Opening hours are split on `" - "`. Validation rejects other shapes at
//!   load, but a store built in code with e.g. `"9am to 5pm"` yields
//!   `opens: "9am to 5pm"` and no `closes`.

use crate::content::{ContentStore, DayHours, Geo, Service};
use crate::placeholder;
use crate::types::Breadcrumb;
use serde::Serialize;

const CONTEXT: &str = "https://schema.org";

/// Used when `business.geo` is absent.
pub const PLACEHOLDER_GEO: Geo = Geo {
    latitude: -28.0023,
    longitude: 153.4145,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalBusiness {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub telephone: String,
    pub email: String,
    pub address: PostalAddress,
    pub geo: GeoCoordinates,
    pub opening_hours_specification: Vec<OpeningHoursSpecification>,
    pub price_range: String,
    pub image: String,
    pub same_as: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub street_address: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    pub address_country: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoCoordinates {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursSpecification {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub day_of_week: String,
    pub opens: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub service_type: String,
    pub provider: Provider,
    pub area_served: Vec<City>,
    pub description: String,
    pub offers: Offer,
}

#[derive(Debug, Clone, Serialize)]
pub struct Provider {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct City {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub price: String,
    pub price_currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub main_entity: Vec<Question>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub accepted_answer: Answer,
}

#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub item_list_element: Vec<ListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    /// 1-based.
    pub position: usize,
    pub name: String,
    /// Absolute URL.
    pub item: String,
}

// ============================================================================
// Generators
// ============================================================================

pub fn local_business(store: &ContentStore) -> LocalBusiness {
    let business = &store.business;
    let geo = business.geo.unwrap_or(PLACEHOLDER_GEO);

    let opening_hours_specification = business
        .hours()
        .filter_map(|(day, hours)| match hours {
            DayHours::Closed => None,
            DayHours::Open { opens, closes } => Some(OpeningHoursSpecification {
                kind: "OpeningHoursSpecification",
                day_of_week: capitalize(day),
                opens: opens.to_string(),
                closes: closes.map(str::to_string),
            }),
        })
        .collect();

    LocalBusiness {
        context: CONTEXT,
        kind: store.schema.business_type.clone(),
        name: business.name.clone(),
        description: store.seo.description.clone(),
        url: store.seo.site_url.clone(),
        telephone: business.phone.clone(),
        email: business.email.clone(),
        address: PostalAddress {
            kind: "PostalAddress",
            street_address: business.address.clone(),
            address_locality: business.city.clone(),
            address_region: business.state.clone(),
            postal_code: business.postcode.clone(),
            address_country: business.country.clone(),
        },
        geo: GeoCoordinates {
            kind: "GeoCoordinates",
            latitude: geo.latitude,
            longitude: geo.longitude,
        },
        opening_hours_specification,
        price_range: store.schema.price_range.clone(),
        image: placeholder::hero_image(&business.service),
        same_as: business.social_media.values().map(str::to_string).collect(),
    }
}

pub fn service(store: &ContentStore, service: &Service) -> ServiceSchema {
    ServiceSchema {
        context: CONTEXT,
        kind: "Service",
        service_type: service.title.clone(),
        provider: Provider {
            kind: store.schema.business_type.clone(),
            name: store.business.name.clone(),
        },
        area_served: store
            .service_areas
            .iter()
            .map(|a| City {
                kind: "City",
                name: a.name.clone(),
            })
            .collect(),
        description: service.description.clone(),
        offers: Offer {
            kind: "Offer",
            price: offer_price(&service.price),
            price_currency: store.schema.price_currency.clone(),
        },
    }
}

pub fn faq_page(store: &ContentStore) -> FaqPage {
    FaqPage {
        context: CONTEXT,
        kind: "FAQPage",
        main_entity: store
            .faq
            .iter()
            .map(|item| Question {
                kind: "Question",
                name: item.question.clone(),
                accepted_answer: Answer {
                    kind: "Answer",
                    text: item.answer.clone(),
                },
            })
            .collect(),
    }
}

pub fn breadcrumbs(store: &ContentStore, items: &[Breadcrumb]) -> BreadcrumbList {
    BreadcrumbList {
        context: CONTEXT,
        kind: "BreadcrumbList",
        item_list_element: items
            .iter()
            .enumerate()
            .map(|(index, crumb)| ListItem {
                kind: "ListItem",
                position: index + 1,
                name: crumb.name.clone(),
                item: format!("{}{}", store.seo.site_url, crumb.url),
            })
            .collect(),
    }
}

/// Every ASCII digit of a display price, concatenated.
///
/// `"From $45"` → `"45"`, `"$45-$60"` → `"4560"`, `"POA"` → `""`.
pub fn offer_price(display: &str) -> String {
    display.chars().filter(char::is_ascii_digit).collect()
}

/// Serialize a document for embedding inside a `<script>` element.
///
/// `</` is escaped so content like `"</script>"` in an FAQ answer cannot
/// close the element early.
pub fn to_json_ld<T: Serialize>(document: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(document)?.replace("</", "<\\/"))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
