//! Load-time validation of the content document.
//!
//! Serde enforces presence and types; this pass enforces the cross-field
//! rules that a typo in a hand-edited `content.json` would otherwise turn
//! into broken routes or wrong structured data:
//!
//! - service and service-area slugs are non-empty and unique per collection
//! - testimonial ratings are 1 to 5
//! - opening hours are `"Closed"` or exactly `"<open> - <close>"`

use super::model::{CLOSED, ContentStore};
use super::ContentError;
use std::collections::HashSet;

impl ContentStore {
    /// Check the invariants serde cannot express. Returns the first violation.
    pub fn validate(&self) -> Result<(), ContentError> {
        check_slugs("services", self.services.iter().map(|s| s.slug.as_str()))?;
        check_slugs(
            "serviceAreas",
            self.service_areas.iter().map(|a| a.slug.as_str()),
        )?;

        for testimonial in &self.testimonials {
            if !(1..=5).contains(&testimonial.rating) {
                return Err(ContentError::RatingOutOfRange {
                    name: testimonial.name.clone(),
                    rating: testimonial.rating,
                });
            }
        }

        for (day, value) in self.business.opening_hours.iter() {
            if !is_well_formed_hours(value) {
                return Err(ContentError::MalformedHours {
                    day: day.to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn check_slugs<'a>(
    collection: &'static str,
    slugs: impl Iterator<Item = &'a str>,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for (index, slug) in slugs.enumerate() {
        if slug.trim().is_empty() {
            return Err(ContentError::EmptySlug { collection, index });
        }
        if !seen.insert(slug) {
            return Err(ContentError::DuplicateSlug {
                collection,
                slug: slug.to_string(),
            });
        }
    }
    Ok(())
}

fn is_well_formed_hours(value: &str) -> bool {
    if value == CLOSED {
        return true;
    }
    let parts: Vec<&str> = value.split(" - ").collect();
    parts.len() == 2 && parts.iter().all(|p| !p.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_store;

    #[test]
    fn fixture_is_valid() {
        sample_store().validate().unwrap();
    }

    #[test]
    fn duplicate_service_slug_rejected() {
        let mut store = sample_store();
        store.services[1].slug = store.services[0].slug.clone();
        match store.validate() {
            Err(ContentError::DuplicateSlug { collection, slug }) => {
                assert_eq!(collection, "services");
                assert_eq!(slug, "womens-cut");
            }
            other => panic!("expected DuplicateSlug, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_area_slug_rejected() {
        let mut store = sample_store();
        store.service_areas[2].slug = "southport".to_string();
        assert!(matches!(
            store.validate(),
            Err(ContentError::DuplicateSlug {
                collection: "serviceAreas",
                ..
            })
        ));
    }

    #[test]
    fn same_slug_across_collections_is_fine() {
        let mut store = sample_store();
        store.service_areas[0].slug = "balayage".to_string();
        store.validate().unwrap();
    }

    #[test]
    fn empty_slug_rejected() {
        let mut store = sample_store();
        store.services[2].slug = "  ".to_string();
        assert!(matches!(
            store.validate(),
            Err(ContentError::EmptySlug {
                collection: "services",
                index: 2
            })
        ));
    }

    #[test]
    fn rating_bounds_enforced() {
        let mut store = sample_store();
        store.testimonials[0].rating = 0;
        assert!(matches!(
            store.validate(),
            Err(ContentError::RatingOutOfRange { rating: 0, .. })
        ));

        store.testimonials[0].rating = 6;
        assert!(matches!(
            store.validate(),
            Err(ContentError::RatingOutOfRange { rating: 6, .. })
        ));

        store.testimonials[0].rating = 1;
        store.validate().unwrap();
    }

    #[test]
    fn malformed_hours_rejected() {
        let mut store = sample_store();
        store.business.opening_hours.insert("tuesday", "9am to 5pm");
        match store.validate() {
            Err(ContentError::MalformedHours { day, value }) => {
                assert_eq!(day, "tuesday");
                assert_eq!(value, "9am to 5pm");
            }
            other => panic!("expected MalformedHours, got {other:?}"),
        }
    }

    #[test]
    fn three_part_hours_rejected() {
        assert!(!is_well_formed_hours("09:00 - 12:00 - 17:00"));
        assert!(!is_well_formed_hours("09:00 - "));
        assert!(is_well_formed_hours("9:00 AM - 5:00 PM"));
        assert!(is_well_formed_hours("Closed"));
    }
}
