//! Read-only lookups and derivations over the content store.
//!
//! Everything here is a pure function of `&ContentStore`. Unknown slugs are
//! reported as `None`; turning that into a 404 is the caller's business.
//!
//! Testimonial relations are a substring heuristic, not foreign keys: a
//! testimonial "belongs" to a service when its free-text `service` field
//! mentions the first word of the service title, and to an area when its
//! `location` mentions the area name. Both can over- and under-match.

use super::model::{ContentStore, GalleryItem, Service, ServiceArea, Testimonial};

impl ContentStore {
    /// First service whose slug equals `slug` exactly (case-sensitive).
    pub fn service(&self, slug: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.slug == slug)
    }

    /// First service area whose slug equals `slug` exactly (case-sensitive).
    pub fn service_area(&self, slug: &str) -> Option<&ServiceArea> {
        self.service_areas.iter().find(|a| a.slug == slug)
    }

    /// Every service slug in document order.
    pub fn service_slugs(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.slug.as_str()).collect()
    }

    /// Every service-area slug in document order.
    pub fn area_slugs(&self) -> Vec<&str> {
        self.service_areas.iter().map(|a| a.slug.as_str()).collect()
    }

    /// Services other than `slug`, first `limit` in document order.
    pub fn other_services(&self, slug: &str, limit: usize) -> Vec<&Service> {
        self.services
            .iter()
            .filter(|s| s.slug != slug)
            .take(limit)
            .collect()
    }

    /// Service areas other than `slug`, first `limit` in document order.
    pub fn other_areas(&self, slug: &str, limit: usize) -> Vec<&ServiceArea> {
        self.service_areas
            .iter()
            .filter(|a| a.slug != slug)
            .take(limit)
            .collect()
    }

    /// Testimonials whose `service` text mentions the service title's first word.
    pub fn service_testimonials(&self, service: &Service, limit: usize) -> Vec<&Testimonial> {
        let needle = service
            .title
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        self.testimonials
            .iter()
            .filter(|t| t.service.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Testimonials whose `location` text mentions the area name.
    pub fn area_testimonials(&self, area: &ServiceArea, limit: usize) -> Vec<&Testimonial> {
        let needle = area.name.to_lowercase();
        self.testimonials
            .iter()
            .filter(|t| t.location.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Distinct gallery categories in first-seen order.
    pub fn gallery_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.gallery {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }

    pub fn gallery_in(&self, category: &str) -> Vec<&GalleryItem> {
        self.gallery
            .iter()
            .filter(|g| g.category == category)
            .collect()
    }
}
