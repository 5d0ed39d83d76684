//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what an entity *is* (service title, area name, page
//! route) and shows paths and URLs as secondary context on indented lines,
//! so the output reads as a content inventory.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Coastline Hair Co (HairSalon)
//!     Southport, QLD
//!
//! Services
//! 001 Women's Cut & Style
//!     Route: /services/womens-cut
//!     Price: From $85
//!
//! Areas
//! 001 Southport
//!     Route: /areas/southport
//!
//! Content
//!     4 testimonials, 1 team member, 2 FAQ entries, 4 gallery items
//! ```
//!
//! ## Build
//!
//! ```text
//! / → index.html
//! /services/balayage → services/balayage/index.html
//! ...
//! Generated 12 pages, copied 1 public file
//! ```
//!
//! ## Images
//!
//! ```text
//! Generating 22 images
//!     Skipped (exists): hero/salon-hero.jpg
//!     Generating: services/womens-cut.jpg
//!         Rate limited, waiting 30s (attempt 1/3)
//!     Saved: services/womens-cut.jpg (jpeg, 184213 bytes)
//!
//! Success: 22/22
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::content::ContentStore;
use crate::generate::BuildReport;
use crate::imagegen::{ImageEvent, RunSummary};
use crate::routes::Route;
use crate::scaffold::ScaffoldInput;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 page`, `2 pages`.
fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

// ============================================================================
// Check
// ============================================================================

/// Content inventory for `sitesmith check`.
pub fn format_check_output(store: &ContentStore) -> Vec<String> {
    let mut lines = Vec::new();
    let business = &store.business;

    lines.push(format!(
        "{} ({})",
        business.name, store.schema.business_type
    ));
    let place: Vec<&str> = [business.city.as_str(), business.state.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !place.is_empty() {
        lines.push(format!("{}{}", indent(1), place.join(", ")));
    }
    if let Some(year) = business.established {
        lines.push(format!("{}Established: {}", indent(1), year));
    }

    lines.push(String::new());
    lines.push("Services".to_string());
    for (i, service) in store.services.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), service.title));
        lines.push(format!(
            "{}Route: {}",
            indent(1),
            Route::Service(service.slug.clone()).path()
        ));
        if !service.price.is_empty() {
            lines.push(format!("{}Price: {}", indent(1), service.price));
        }
    }

    lines.push(String::new());
    lines.push("Areas".to_string());
    for (i, area) in store.service_areas.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), area.name));
        lines.push(format!(
            "{}Route: {}",
            indent(1),
            Route::Area(area.slug.clone()).path()
        ));
    }

    lines.push(String::new());
    lines.push("Content".to_string());
    lines.push(format!(
        "{}{}, {}, {}, {}",
        indent(1),
        plural(store.testimonials.len(), "testimonial", "testimonials"),
        plural(store.team.len(), "team member", "team members"),
        plural(store.faq.len(), "FAQ entry", "FAQ entries"),
        plural(store.gallery.len(), "gallery item", "gallery items"),
    ));
    let categories = store.gallery_categories();
    if !categories.is_empty() {
        lines.push(format!(
            "{}Gallery categories: {}",
            indent(1),
            categories.join(", ")
        ));
    }
    if store.seo.site_url.is_empty() {
        lines.push(format!(
            "{}Site URL: not set (sitemap uses the configured default)",
            indent(1)
        ));
    } else {
        lines.push(format!("{}Site URL: {}", indent(1), store.seo.site_url));
    }

    lines
}

pub fn print_check_output(store: &ContentStore) {
    for line in format_check_output(store) {
        println!("{}", line);
    }
}

// ============================================================================
// Routes
// ============================================================================

/// One line per route: path, output file, then the absolute URL.
pub fn format_routes(routes: &[Route], base_url: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for route in routes {
        lines.push(format!("{} \u{2192} {}", route.path(), route.output_file()));
        lines.push(format!("{}{}", indent(1), route.url(base_url)));
    }
    lines
}

pub fn print_routes(routes: &[Route], base_url: &str) {
    for line in format_routes(routes, base_url) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    for page in &report.pages {
        let route = match page.strip_suffix("index.html") {
            Some("") => "/".to_string(),
            Some(dir) => format!("/{}", dir.trim_end_matches('/')),
            None => format!("/{page}"),
        };
        lines.push(format!("{} \u{2192} {}", route, page));
    }
    lines.push("sitemap.xml, robots.txt".to_string());
    lines.push(format!(
        "Generated {}, copied {}",
        plural(report.pages.len(), "page", "pages"),
        plural(report.public_files, "public file", "public files"),
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Scaffold
// ============================================================================

pub fn format_scaffold_summary(input: &ScaffoldInput, path: &Path) -> Vec<String> {
    vec![
        format!(
            "Generated {} for {}",
            path.file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            input.business_name
        ),
        format!("- Service: {}", input.service),
        format!("- Location: {}", input.location),
        format!("- Phone: {}", input.phone),
        format!("- Email: {}", input.email),
    ]
}

pub fn print_scaffold_summary(input: &ScaffoldInput, path: &Path) {
    for line in format_scaffold_summary(input, path) {
        println!("{}", line);
    }
}

// ============================================================================
// Images
// ============================================================================

/// Format a single image generation event as display lines.
pub fn format_image_event(event: &ImageEvent) -> Vec<String> {
    match event {
        ImageEvent::Started { total } => {
            vec![format!("Generating {}", plural(*total, "image", "images"))]
        }
        ImageEvent::Skipped { filename } => {
            vec![format!("{}Skipped (exists): {}", indent(1), filename)]
        }
        ImageEvent::Generating { filename } => {
            vec![format!("{}Generating: {}", indent(1), filename)]
        }
        ImageEvent::RateLimited {
            attempt,
            max_retries,
            wait,
            ..
        } => vec![format!(
            "{}Rate limited, waiting {}s (attempt {}/{})",
            indent(2),
            wait.as_secs(),
            attempt,
            max_retries
        )],
        ImageEvent::Throttled { wait } => {
            vec![format!("{}Pausing {}s", indent(1), wait.as_secs())]
        }
        ImageEvent::Saved {
            filename,
            format,
            bytes,
        } => {
            let kind = format.as_deref().unwrap_or("unknown format");
            vec![format!(
                "{}Saved: {} ({}, {} bytes)",
                indent(1),
                filename,
                kind,
                bytes
            )]
        }
        ImageEvent::Failed { filename, error } => {
            vec![format!("{}Failed: {} - {}", indent(1), filename, error)]
        }
    }
}

pub fn format_image_summary(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("Success: {}/{}", summary.succeeded(), summary.total),
    ];
    if !summary.failed.is_empty() {
        lines.push(format!("Failed: {}/{}", summary.failed.len(), summary.total));
        for (filename, error) in &summary.failed {
            lines.push(format!("{}{}: {}", indent(1), filename, error));
        }
    }
    lines
}

pub fn print_image_summary(summary: &RunSummary) {
    for line in format_image_summary(summary) {
        println!("{}", line);
    }
}
