//! Route enumeration, `sitemap.xml` and `robots.txt`.
//!
//! Every page the site build writes corresponds to one [`Route`]. Routes are
//! derived from the store's slug lists, so a page for an unknown slug can
//! never be produced.

use crate::config::SiteConfig;
use crate::content::ContentStore;
use chrono::NaiveDate;
use maud::{PreEscaped, html};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Contact,
    Gallery,
    Service(String),
    Area(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

impl Route {
    /// Site-relative URL path, without a trailing slash (except the root).
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Gallery => "/gallery".to_string(),
            Route::Service(slug) => format!("/services/{slug}"),
            Route::Area(slug) => format!("/areas/{slug}"),
        }
    }

    /// File written for this route, relative to the output directory.
    pub fn output_file(&self) -> String {
        match self {
            Route::Home => "index.html".to_string(),
            other => format!("{}/index.html", other.path().trim_start_matches('/')),
        }
    }

    pub fn change_frequency(&self) -> ChangeFrequency {
        match self {
            Route::Home | Route::Gallery => ChangeFrequency::Weekly,
            _ => ChangeFrequency::Monthly,
        }
    }

    pub fn priority(&self) -> f32 {
        match self {
            Route::Home => 1.0,
            Route::Contact => 0.9,
            Route::About | Route::Service(_) => 0.8,
            Route::Gallery | Route::Area(_) => 0.7,
        }
    }

    /// Absolute URL against `base` (no trailing slash expected).
    pub fn url(&self, base: &str) -> String {
        match self {
            Route::Home => base.to_string(),
            other => format!("{base}{}", other.path()),
        }
    }
}

/// All routes: the four fixed pages, then one per service, then one per area.
pub fn all(store: &ContentStore) -> Vec<Route> {
    let mut routes = vec![Route::Home, Route::About, Route::Contact, Route::Gallery];
    routes.extend(
        store
            .service_slugs()
            .into_iter()
            .map(|s| Route::Service(s.to_string())),
    );
    routes.extend(
        store
            .area_slugs()
            .into_iter()
            .map(|s| Route::Area(s.to_string())),
    );
    routes
}

/// `seo.siteUrl`, or the configured default when empty. Trailing slashes
/// are dropped so paths can be appended directly.
pub fn base_url(store: &ContentStore, config: &SiteConfig) -> String {
    let url = if store.seo.site_url.trim().is_empty() {
        config.default_site_url.as_str()
    } else {
        store.seo.site_url.trim()
    };
    url.trim_end_matches('/').to_string()
}

pub fn sitemap_xml(routes: &[Route], base: &str, lastmod: NaiveDate) -> String {
    let date = lastmod.format("%Y-%m-%d").to_string();
    let body = html! {
        urlset xmlns=(SITEMAP_NS) {
            @for route in routes {
                url {
                    loc { (route.url(base)) }
                    lastmod { (date) }
                    changefreq { (route.change_frequency().as_str()) }
                    priority { (format!("{:.1}", route.priority())) }
                }
            }
        }
    };
    let xml = html! {
        (PreEscaped(r#"<?xml version="1.0" encoding="UTF-8"?>"#))
        "\n"
        (body)
        "\n"
    };
    xml.into_string()
}

pub fn robots_txt(base: &str) -> String {
    format!("User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {base}/sitemap.xml\n")
}
