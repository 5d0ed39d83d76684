//! HTML site generation.
//!
//! Renders every route of the content store to a static file and assembles
//! the deployable site directory.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, services, about excerpt, team, gallery,
//!   testimonials, service areas, FAQ and a call to action
//! - **About** (`/about/index.html`): story (markdown), mission, features, values
//! - **Contact** (`/contact/index.html`): details, opening hours, enquiry form
//! - **Gallery** (`/gallery/index.html`): items grouped by category
//! - **Service pages** (`/services/{slug}/index.html`): one per service
//! - **Area pages** (`/areas/{slug}/index.html`): one per service area
//! - **Not found** (`/404.html`)
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── sitemap.xml
//! ├── robots.txt
//! ├── about/index.html
//! ├── contact/index.html
//! ├── gallery/index.html
//! ├── services/
//! │   └── balayage/index.html
//! ├── areas/
//! │   └── southport/index.html
//! └── images/...                 # Copied from public/
//! ```
//!
//! ## Head Metadata
//!
//! Every page carries a title, description, keywords, canonical link, Open
//! Graph tags, the brand colours as CSS custom properties, and the
//! LocalBusiness and FAQPage JSON-LD blocks. Service pages add Service and
//! BreadcrumbList blocks, area pages add BreadcrumbList.
//!
//! ## Images
//!
//! Local image paths may not exist yet on a freshly scaffolded site. Every
//! `<img>` carries an `onerror` handler that swaps in a deterministic
//! picsum.photos placeholder (see [`crate::placeholder`]).
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::SiteConfig;
use crate::content::{
    Colors, ContentError, ContentStore, DayHours, GalleryItem, Service, ServiceArea, TeamMember,
    Testimonial,
};
use crate::placeholder;
use crate::routes::{self, Route};
use crate::schema;
use crate::types::{Breadcrumb, NAVIGATION};
use chrono::{Datelike, NaiveDate};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("No {kind} with slug '{slug}'")]
    UnknownSlug { kind: &'static str, slug: String },
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What a build wrote, for the CLI summary.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// Page files relative to the output directory, in write order.
    pub pages: Vec<String>,
    /// Files copied from the public directory.
    pub public_files: usize,
    pub base_url: String,
}

/// Load the project's content and build the site into `output_dir`.
pub fn build(
    project: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<BuildReport, GenerateError> {
    let store = ContentStore::load(&project.join(&config.content_file))?;
    let today = chrono::Local::now().date_naive();
    generate(
        &store,
        config,
        &project.join(&config.public_dir),
        output_dir,
        today,
    )
}

/// Render every route plus 404, sitemap and robots, and copy `public_dir`.
///
/// `today` stamps the sitemap and the fallback footer copyright.
pub fn generate(
    store: &ContentStore,
    config: &SiteConfig,
    public_dir: &Path,
    output_dir: &Path,
    today: NaiveDate,
) -> Result<BuildReport, GenerateError> {
    let store = with_resolved_site_url(store, config);
    let store = &*store;
    let site = Site::new(store, config, today)?;
    fs::create_dir_all(output_dir)?;

    let public_files = if public_dir.is_dir() {
        copy_public(public_dir, output_dir)?
    } else {
        debug!(dir = %public_dir.display(), "no public directory");
        0
    };

    let routes = routes::all(store);
    let mut pages = Vec::with_capacity(routes.len() + 1);
    for route in &routes {
        let markup = render_route(&site, route)?;
        let file = route.output_file();
        write_page(output_dir, &file, markup)?;
        debug!(page = %file, "rendered");
        pages.push(file);
    }

    write_page(output_dir, "404.html", render_not_found(&site))?;
    pages.push("404.html".to_string());

    fs::write(
        output_dir.join("sitemap.xml"),
        routes::sitemap_xml(&routes, &site.base_url, today),
    )?;
    fs::write(
        output_dir.join("robots.txt"),
        routes::robots_txt(&site.base_url),
    )?;

    info!(
        pages = pages.len(),
        public_files,
        output = %output_dir.display(),
        "site generated"
    );

    Ok(BuildReport {
        output_dir: output_dir.to_path_buf(),
        pages,
        public_files,
        base_url: site.base_url,
    })
}

fn write_page(output_dir: &Path, relative: &str, markup: Markup) -> Result<(), GenerateError> {
    let path = output_dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, markup.into_string())?;
    Ok(())
}

/// Copy the public directory verbatim into the output root. Returns the
/// number of files copied.
fn copy_public(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn render_route(site: &Site, route: &Route) -> Result<Markup, GenerateError> {
    let store = site.store;
    Ok(match route {
        Route::Home => render_home(site),
        Route::About => render_about(site),
        Route::Contact => render_contact(site),
        Route::Gallery => render_gallery(site),
        Route::Service(slug) => {
            let service = store.service(slug).ok_or_else(|| GenerateError::UnknownSlug {
                kind: "service",
                slug: slug.clone(),
            })?;
            render_service(site, service)?
        }
        Route::Area(slug) => {
            let area = store
                .service_area(slug)
                .ok_or_else(|| GenerateError::UnknownSlug {
                    kind: "service area",
                    slug: slug.clone(),
                })?;
            render_area(site, area)?
        }
    })
}

// ============================================================================
// Site context
// ============================================================================

/// The store with `seo.siteUrl` replaced by the resolved base URL, so
/// structured data agrees with canonical links and the sitemap.
fn with_resolved_site_url<'a>(
    store: &'a ContentStore,
    config: &SiteConfig,
) -> Cow<'a, ContentStore> {
    let base = routes::base_url(store, config);
    if store.seo.site_url == base {
        Cow::Borrowed(store)
    } else {
        let mut resolved = store.clone();
        resolved.seo.site_url = base;
        Cow::Owned(resolved)
    }
}

/// Everything shared by all pages of one build.
struct Site<'a> {
    store: &'a ContentStore,
    config: &'a SiteConfig,
    base_url: String,
    css: String,
    business_json_ld: String,
    faq_json_ld: Option<String>,
    year: i32,
}

impl<'a> Site<'a> {
    fn new(
        store: &'a ContentStore,
        config: &'a SiteConfig,
        today: NaiveDate,
    ) -> Result<Self, GenerateError> {
        let faq_json_ld = if store.faq.is_empty() {
            None
        } else {
            Some(schema::to_json_ld(&schema::faq_page(store))?)
        };
        Ok(Self {
            store,
            config,
            base_url: routes::base_url(store, config),
            css: format!("{}\n\n{}", color_css(&store.colors), CSS_STATIC),
            business_json_ld: schema::to_json_ld(&schema::local_business(store))?,
            faq_json_ld,
            year: today.year(),
        })
    }

    /// Absolute URL for a site-relative path; absolute URLs pass through.
    fn absolute(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{url}", self.base_url)
        } else {
            url.to_string()
        }
    }

    fn name(&self) -> &str {
        &self.store.business.name
    }
}

/// Per-page head data.
struct Page {
    /// `None` for the 404 page, which has no canonical URL.
    route: Option<Route>,
    title: String,
    description: String,
    og_image: String,
    /// Page-specific JSON-LD documents, already serialized.
    json_ld: Vec<String>,
}

/// Keep only characters that can appear in a CSS colour value.
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "#(),.% -".contains(*c))
        .collect()
}

/// `:root` block with the brand colours as custom properties.
pub fn color_css(colors: &Colors) -> String {
    format!(
        ":root {{\n  --color-primary: {};\n  --color-primary-light: {};\n  --color-secondary: {};\n  --color-accent: {};\n}}",
        css_value(&colors.primary),
        css_value(&colors.primary_light),
        css_value(&colors.secondary),
        css_value(&colors.accent),
    )
}

pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// First `max` characters plus an ellipsis when the text is longer.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn tel_href(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{digits}")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(site: &Site, page: &Page, content: Markup) -> Markup {
    let store = site.store;
    let canonical = page.route.as_ref().map(|r| r.url(&site.base_url));
    let site_name = if store.seo.site_name.is_empty() {
        site.name()
    } else {
        &store.seo.site_name
    };
    let keywords = store.seo.keywords.join(", ");
    let current = page.route.as_ref().map(Route::path);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="generator" content={ "sitesmith " (crate::version_string()) };
                title { (page.title) }
                meta name="description" content=(page.description);
                @if !keywords.is_empty() {
                    meta name="keywords" content=(keywords);
                }
                @if let Some(url) = &canonical {
                    link rel="canonical" href=(url);
                    meta property="og:url" content=(url);
                }
                meta property="og:type" content="website";
                meta property="og:locale" content="en_AU";
                meta property="og:site_name" content=(site_name);
                meta property="og:title" content=(page.title);
                meta property="og:description" content=(page.description);
                meta property="og:image" content=(site.absolute(&page.og_image));
                meta name="twitter:card" content="summary_large_image";
                style { (PreEscaped(&site.css)) }
                script type="application/ld+json" { (PreEscaped(&site.business_json_ld)) }
                @if let Some(faq) = &site.faq_json_ld {
                    script type="application/ld+json" { (PreEscaped(faq)) }
                }
                @for doc in &page.json_ld {
                    script type="application/ld+json" { (PreEscaped(doc)) }
                }
            }
            body {
                (site_header(site, current.as_deref()))
                main { (content) }
                (site_footer(site))
            }
        }
    }
}

fn site_header(site: &Site, current: Option<&str>) -> Markup {
    html! {
        header.site-header {
            div.container {
                a.brand href="/" { (site.name()) }
                nav.site-nav {
                    ul {
                        @for link in NAVIGATION {
                            li class=[(current == Some(link.href)).then_some("current")] {
                                a href=(link.href) { (link.label) }
                            }
                        }
                    }
                }
                a.button.header-cta href=(tel_href(&site.store.business.phone)) {
                    (site.store.business.phone)
                }
            }
        }
    }
}

fn site_footer(site: &Site) -> Markup {
    let store = site.store;
    let business = &store.business;
    let fallback_copyright = format!("© {} {}. All rights reserved.", site.year, site.name());
    let copyright = store
        .footer
        .as_ref()
        .map(|f| f.copyright.as_str())
        .filter(|c| !c.is_empty())
        .unwrap_or(&fallback_copyright);

    html! {
        footer.site-footer {
            div.container {
                div.columns {
                    div {
                        h3 { (site.name()) }
                        @if !business.tagline.is_empty() {
                            p { (business.tagline) }
                        }
                        @if let Some(footer) = &store.footer {
                            @if !footer.areas.is_empty() {
                                p { (footer.areas) }
                            }
                        }
                    }
                    div {
                        h3 { "Services" }
                        ul {
                            @for service in &store.services {
                                li { a href={ "/services/" (service.slug) } { (service.title) } }
                            }
                        }
                    }
                    div {
                        h3 { "Contact" }
                        ul {
                            li { a href=(tel_href(&business.phone)) { (business.phone) } }
                            li { a href={ "mailto:" (business.email) } { (business.email) } }
                            @if !business.address.is_empty() {
                                li { (business.address) }
                            }
                            @if let Some(footer) = &store.footer {
                                @if !footer.hours.is_empty() {
                                    li { (footer.hours) }
                                }
                            }
                        }
                        @if !business.social_media.is_empty() {
                            ul.social {
                                @for (platform, url) in business.social_media.iter() {
                                    li { a href=(url) rel="noopener" target="_blank" { (platform) } }
                                }
                            }
                        }
                    }
                }
                p.copyright { (copyright) }
            }
        }
    }
}

/// `<img>` that falls back to `fallback` if `src` fails to load.
fn image(src: &str, alt: &str, fallback: &str) -> Markup {
    // JSON string syntax is a valid JS string literal.
    let literal = serde_json::to_string(fallback).unwrap_or_else(|_| "\"\"".to_string());
    let onerror = format!("this.onerror=null;this.src={literal};");
    html! {
        img src=(src) alt=(alt) loading="lazy" onerror=(onerror);
    }
}

fn breadcrumb_nav(items: &[Breadcrumb]) -> Markup {
    html! {
        nav.breadcrumb aria-label="Breadcrumb" {
            @for (idx, crumb) in items.iter().enumerate() {
                @if idx > 0 { span { "/" } }
                @if idx + 1 == items.len() {
                    span aria-current="page" { (crumb.name) }
                } @else {
                    a href=(crumb.url) { (crumb.name) }
                }
            }
        }
    }
}

fn service_card(service: &Service, idx: usize) -> Markup {
    html! {
        a.card href={ "/services/" (service.slug) } {
            (image(&service.image, &service.title, &placeholder::service_image(&service.title, idx)))
            div.card-body {
                h3 { (service.title) }
                p { (service.short_description) }
                @if !service.price.is_empty() {
                    span.price { (service.price) }
                }
            }
        }
    }
}

fn testimonial_card(testimonial: &Testimonial) -> Markup {
    html! {
        blockquote.testimonial {
            div.stars aria-label={ (testimonial.rating) " out of 5 stars" } { (stars(testimonial.rating)) }
            p { "\u{201c}" (testimonial.text) "\u{201d}" }
            footer {
                strong { (testimonial.name) }
                @if !testimonial.location.is_empty() { ", " (testimonial.location) }
                @if !testimonial.service.is_empty() { br; (testimonial.service) }
            }
        }
    }
}

fn team_card(member: &TeamMember) -> Markup {
    html! {
        div.team-member {
            (image(&member.image, &member.name, &placeholder::team_image(&member.name)))
            h3 { (member.name) }
            p.role { (member.role) }
            @if !member.bio.is_empty() { p { (member.bio) } }
            @if !member.specialties.is_empty() {
                ul.tags {
                    @for specialty in &member.specialties { li { (specialty) } }
                }
            }
        }
    }
}

fn gallery_figure(item: &GalleryItem, idx: usize) -> Markup {
    html! {
        figure {
            (image(&item.image, &item.alt, &placeholder::gallery_image(&item.category, idx)))
            @if !item.alt.is_empty() { figcaption { (item.alt) } }
        }
    }
}

fn area_links<'a>(areas: impl IntoIterator<Item = &'a ServiceArea>) -> Markup {
    html! {
        ul.area-list {
            @for area in areas {
                li { a href={ "/areas/" (area.slug) } { (area.name) } }
            }
        }
    }
}

fn faq_section(site: &Site) -> Markup {
    html! {
        @if !site.store.faq.is_empty() {
            section.faq #faq {
                div.container {
                    div.section-title { h2 { "Frequently Asked Questions" } }
                    @for item in &site.store.faq {
                        details {
                            summary { (item.question) }
                            p { (item.answer) }
                        }
                    }
                }
            }
        }
    }
}

fn cta_section(site: &Site, heading: &str) -> Markup {
    html! {
        section.cta {
            div.container {
                h2 { (heading) }
                p { "Call " (site.store.business.phone) " or send us a message." }
                a.button href="/contact" { "Book Your Appointment" }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(site: &Site) -> Markup {
    let store = site.store;
    let business = &store.business;
    let related = &site.config.related;
    let excerpt = store.about.excerpt();

    let content = html! {
        section.hero {
            (image(store.images.hero(), site.name(), &placeholder::hero_image(&business.service)))
            div.container {
                h1 { (business.tagline) }
                p { (store.seo.description) }
                div.actions {
                    a.button href="/contact" { "Book Now" }
                    a.button.outline href=(tel_href(&business.phone)) { "Call " (business.phone) }
                }
            }
        }
        section #services {
            div.container {
                div.section-title {
                    h2 { "Our Services" }
                    p { "Everything " (site.name()) " offers, from quick tidy-ups to full transformations." }
                }
                div.grid {
                    @for (idx, service) in store.services.iter().take(related.home_services).enumerate() {
                        (service_card(service, idx))
                    }
                }
            }
        }
        @if !excerpt.is_empty() {
            section.alt #about {
                div.container.about-split {
                    div {
                        h2 { (store.about.title) }
                        (PreEscaped(markdown_to_html(excerpt)))
                        a href="/about" { "Read our story" }
                    }
                    (image(store.images.about(), &store.about.title, &placeholder::fallback_image("about", 800, 600)))
                }
            }
        }
        @if !store.team.is_empty() {
            section #team {
                div.container {
                    div.section-title { h2 { "Meet the Team" } }
                    div.grid {
                        @for member in &store.team { (team_card(member)) }
                    }
                }
            }
        }
        @if !store.gallery.is_empty() {
            section.alt #gallery {
                div.container {
                    div.section-title { h2 { "Our Work" } }
                    div.gallery-grid {
                        @for (idx, item) in store.gallery.iter().take(8).enumerate() {
                            (gallery_figure(item, idx))
                        }
                    }
                    p { a href="/gallery" { "View the full gallery" } }
                }
            }
        }
        @if !store.testimonials.is_empty() {
            section #testimonials {
                div.container {
                    div.section-title { h2 { "What Our Clients Say" } }
                    div.grid {
                        @for t in store.testimonials.iter().take(related.home_testimonials) {
                            (testimonial_card(t))
                        }
                    }
                }
            }
        }
        section.alt #areas {
            div.container {
                div.section-title {
                    h2 { "Areas We Serve" }
                    p { "Proudly serving clients across these locations." }
                }
                (area_links(&store.service_areas))
            }
        }
        (faq_section(site))
        (cta_section(site, "Ready for a fresh look?"))
    };

    let page = Page {
        route: Some(Route::Home),
        title: store.seo.title.clone(),
        description: store.seo.description.clone(),
        og_image: store.images.hero().to_string(),
        json_ld: Vec::new(),
    };
    base_document(site, &page, content)
}

fn render_about(site: &Site) -> Markup {
    let store = site.store;
    let about = &store.about;
    let title = if about.title.is_empty() {
        format!("About {}", site.name())
    } else {
        about.title.clone()
    };

    let content = html! {
        section.hero.page-hero {
            div.container {
                (breadcrumb_nav(&[Breadcrumb::new("Home", "/"), Breadcrumb::new("About", "/about")]))
                h1 { (title) }
                @if let Some(year) = store.business.established {
                    p { "Serving " (store.business.city) " since " (year) "." }
                }
            }
        }
        section {
            div.container.about-split {
                article.about-content {
                    (PreEscaped(markdown_to_html(&about.story)))
                    @if !about.mission.is_empty() {
                        p.mission { (about.mission) }
                    }
                }
                (image(store.images.about(), &title, &placeholder::fallback_image("about", 800, 600)))
            }
        }
        @if !about.features.is_empty() {
            section.alt {
                div.container {
                    div.section-title { h2 { "Why Choose Us" } }
                    div.grid {
                        @for feature in &about.features {
                            div.card { div.card-body { h3 { (feature.title) } p { (feature.description) } } }
                        }
                    }
                }
            }
        }
        @if !about.values.is_empty() {
            section {
                div.container {
                    div.section-title { h2 { "Our Values" } }
                    div.grid {
                        @for value in &about.values {
                            div.card { div.card-body { h3 { (value.title) } p { (value.description) } } }
                        }
                    }
                }
            }
        }
        @if !store.team.is_empty() {
            section.alt {
                div.container {
                    div.section-title { h2 { "Meet the Team" } }
                    div.grid {
                        @for member in &store.team { (team_card(member)) }
                    }
                }
            }
        }
        (cta_section(site, "Come and meet us"))
    };

    let description = if about.mission.is_empty() {
        store.seo.description.clone()
    } else {
        about.mission.clone()
    };
    let page = Page {
        route: Some(Route::About),
        title: format!("About Us | {}", site.name()),
        description,
        og_image: store.images.about().to_string(),
        json_ld: Vec::new(),
    };
    base_document(site, &page, content)
}

fn render_contact(site: &Site) -> Markup {
    let store = site.store;
    let business = &store.business;

    let content = html! {
        section.hero.page-hero {
            div.container {
                (breadcrumb_nav(&[Breadcrumb::new("Home", "/"), Breadcrumb::new("Contact", "/contact")]))
                h1 { "Contact & Book" }
                p { "We'd love to hear from you." }
            }
        }
        section {
            div.container.contact-split {
                div {
                    h2 { "Get in Touch" }
                    p { "Phone: " a href=(tel_href(&business.phone)) { (business.phone) } }
                    p { "Email: " a href={ "mailto:" (business.email) } { (business.email) } }
                    @if !business.address.is_empty() {
                        p {
                            "Address: " (business.address)
                            @if !business.city.is_empty() && business.city != business.address { ", " (business.city) }
                            @if !business.state.is_empty() { " " (business.state) }
                            @if !business.postcode.is_empty() { " " (business.postcode) }
                        }
                    }
                    @if !business.opening_hours.is_empty() {
                        h3 { "Opening Hours" }
                        table.hours {
                            tbody {
                                @for (day, hours) in business.hours() {
                                    tr {
                                        td { (day) }
                                        @match hours {
                                            DayHours::Closed => {
                                                td.closed { "Closed" }
                                            }
                                            DayHours::Open { opens, closes: Some(closes) } => {
                                                td { (opens) " - " (closes) }
                                            }
                                            DayHours::Open { opens, closes: None } => {
                                                td { (opens) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                // Markup only: nothing handles the submission.
                form.contact-form action="#" method="post" {
                    h2 { "Send an Enquiry" }
                    label { "Name" input type="text" name="name" required; }
                    label { "Email" input type="email" name="email" required; }
                    label { "Phone" input type="tel" name="phone"; }
                    label {
                        "Service"
                        select name="service" {
                            option value="" { "Select a service" }
                            @for service in &store.services {
                                option value=(service.slug) { (service.title) }
                            }
                        }
                    }
                    label { "Message" textarea name="message" rows="4" {} }
                    button.button type="submit" { "Send Enquiry" }
                }
            }
        }
        (faq_section(site))
    };

    let mut location = business.city.clone();
    if location.is_empty() {
        location = business.address.clone();
    }
    let page = Page {
        route: Some(Route::Contact),
        title: format!("Contact & Book | {}", site.name()),
        description: format!(
            "Book your appointment at {}. Located in {}. Call {} or book online.",
            site.name(),
            location,
            business.phone
        ),
        og_image: store.images.hero().to_string(),
        json_ld: Vec::new(),
    };
    base_document(site, &page, content)
}

fn render_gallery(site: &Site) -> Markup {
    let store = site.store;

    let content = html! {
        section.hero.page-hero {
            div.container {
                (breadcrumb_nav(&[Breadcrumb::new("Home", "/"), Breadcrumb::new("Gallery", "/gallery")]))
                h1 { "Our Work" }
                p { "A selection of recent work from the " (site.name()) " team." }
            }
        }
        @if store.gallery.is_empty() {
            section { div.container { p { "New photos coming soon." } } }
        }
        @for category in store.gallery_categories() {
            section.gallery-category {
                div.container {
                    h2 { (category) }
                    div.gallery-grid {
                        @for (idx, item) in store.gallery_in(category).into_iter().enumerate() {
                            (gallery_figure(item, idx))
                        }
                    }
                }
            }
        }
        (cta_section(site, "Love what you see?"))
    };

    let page = Page {
        route: Some(Route::Gallery),
        title: format!("Gallery | {}", site.name()),
        description: format!(
            "View our portfolio of recent transformations from {}.",
            site.name()
        ),
        og_image: store
            .gallery
            .first()
            .map(|g| g.image.clone())
            .unwrap_or_else(|| store.images.hero().to_string()),
        json_ld: Vec::new(),
    };
    base_document(site, &page, content)
}

fn render_service(site: &Site, service: &Service) -> Result<Markup, GenerateError> {
    let store = site.store;
    let related = &site.config.related;
    let city = &store.business.city;
    let route = Route::Service(service.slug.clone());
    let crumbs = [
        Breadcrumb::new("Home", "/"),
        Breadcrumb::new("Services", "/#services"),
        Breadcrumb::new(service.title.as_str(), route.path()),
    ];
    let testimonials = store.service_testimonials(service, related.service_testimonials);
    let others = store.other_services(&service.slug, related.other_services);

    let content = html! {
        section.hero.page-hero {
            (image(&service.image, &service.title, &placeholder::service_image(&service.title, 0)))
            div.container {
                (breadcrumb_nav(&crumbs))
                h1 { (service.title) @if !city.is_empty() { " in " (city) } }
                p { (service.short_description) }
                div.actions {
                    @if !service.price.is_empty() { span.button.outline { (service.price) } }
                    a.button href="/contact" { "Book Now" }
                }
            }
        }
        section {
            div.container.about-split {
                div {
                    h2 { "About This Service" }
                    p { (service.description) }
                    @if !service.duration.is_empty() {
                        p.duration { "Duration: " (service.duration) }
                    }
                    @if !service.features.is_empty() {
                        h3 { "What's Included" }
                        ul.features {
                            @for feature in &service.features { li { (feature) } }
                        }
                    }
                }
                (image(&service.image, &service.title, &placeholder::service_image(&service.title, 1)))
            }
        }
        @if !testimonials.is_empty() {
            section.alt {
                div.container {
                    div.section-title { h2 { "What Clients Say" } }
                    div.grid {
                        @for t in &testimonials { (testimonial_card(t)) }
                    }
                }
            }
        }
        @if !others.is_empty() {
            section {
                div.container {
                    div.section-title { h2 { "Other Services" } }
                    div.grid {
                        @for (idx, other) in others.iter().enumerate() { (service_card(other, idx)) }
                    }
                }
            }
        }
        section.alt {
            div.container {
                div.section-title { h2 { (service.title) " Near You" } }
                (area_links(&store.service_areas))
            }
        }
        (cta_section(site, &format!("Book your {} today", service.title.to_lowercase())))
    };

    let title = if city.is_empty() {
        format!("{} | {}", service.title, site.name())
    } else {
        format!("{} {} | {}", service.title, city, site.name())
    };
    let page = Page {
        route: Some(route),
        title,
        description: truncate(&service.description, 155),
        og_image: service.image.clone(),
        json_ld: vec![
            schema::to_json_ld(&schema::service(store, service))?,
            schema::to_json_ld(&schema::breadcrumbs(store, &crumbs))?,
        ],
    };
    Ok(base_document(site, &page, content))
}

fn render_area(site: &Site, area: &ServiceArea) -> Result<Markup, GenerateError> {
    let store = site.store;
    let related = &site.config.related;
    let route = Route::Area(area.slug.clone());
    let crumbs = [
        Breadcrumb::new("Home", "/"),
        Breadcrumb::new("Service Areas", "/#areas"),
        Breadcrumb::new(area.name.as_str(), route.path()),
    ];
    let testimonials = store.area_testimonials(area, related.area_testimonials);
    let others = store.other_areas(&area.slug, related.other_areas);

    let content = html! {
        section.hero.page-hero {
            div.container {
                (breadcrumb_nav(&crumbs))
                h1 { (store.business.service) " in " (area.name) }
                p { (area.description) }
                div.actions {
                    a.button href="/contact" { "Book Now" }
                    a.button.outline href=(tel_href(&store.business.phone)) { "Call " (store.business.phone) }
                }
            }
        }
        section {
            div.container {
                div.section-title {
                    h2 { "Services in " (area.name) }
                    p { (site.name()) " brings the full menu to clients in " (area.name) "." }
                }
                div.grid {
                    @for (idx, service) in store.services.iter().enumerate() { (service_card(service, idx)) }
                }
            }
        }
        @if !testimonials.is_empty() {
            section.alt {
                div.container {
                    div.section-title { h2 { "Clients from " (area.name) } }
                    div.grid {
                        @for t in &testimonials { (testimonial_card(t)) }
                    }
                }
            }
        }
        @if !others.is_empty() {
            section {
                div.container {
                    div.section-title { h2 { "Other Areas We Serve" } }
                    (area_links(others))
                }
            }
        }
        (cta_section(site, &format!("Looking for a salon in {}?", area.name)))
    };

    let page = Page {
        route: Some(route),
        title: format!("{} {} | Professional Services", site.name(), area.name),
        description: format!("Professional services in {}. {}", area.name, area.description),
        og_image: store.images.hero().to_string(),
        json_ld: vec![schema::to_json_ld(&schema::breadcrumbs(store, &crumbs))?],
    };
    Ok(base_document(site, &page, content))
}

fn render_not_found(site: &Site) -> Markup {
    let content = html! {
        section.not-found {
            div.container {
                p.code { "404" }
                h1 { "Page not found" }
                p { "The page you're looking for doesn't exist or has moved." }
                a.button href="/" { "Back to home" }
            }
        }
    };
    let page = Page {
        route: None,
        title: format!("Page Not Found | {}", site.name()),
        description: site.store.seo.description.clone(),
        og_image: site.store.images.hero().to_string(),
        json_ld: Vec::new(),
    };
    base_document(site, &page, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{find_area, find_service, read_output, sample_store, setup_project};
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn with_site<T>(f: impl FnOnce(&Site) -> T) -> T {
        let store = sample_store();
        let config = SiteConfig::default();
        let site = Site::new(&store, &config, date()).unwrap();
        f(&site)
    }

    #[test]
    fn color_css_emits_custom_properties() {
        let css = color_css(&Colors::default());
        assert!(css.contains("--color-primary: #2563eb;"));
        assert!(css.contains("--color-accent: #f59e0b;"));
    }

    #[test]
    fn color_css_strips_injection() {
        let colors = Colors {
            primary: "red;}</style><script>".to_string(),
            ..Colors::default()
        };
        let css = color_css(&colors);
        assert!(!css.contains('<'));
        assert_eq!(css.matches(';').count(), 4);
    }

    #[test]
    fn markdown_story_renders() {
        let html = markdown_to_html("We are a **lot** of fun.\n\nSecond.");
        assert!(html.contains("<strong>lot</strong>"));
        assert_eq!(html.matches("<p>").count(), 2);
    }

    #[test]
    fn truncate_adds_ellipsis_only_when_needed() {
        assert_eq!(truncate("short", 155), "short");
        let long = "a".repeat(200);
        let cut = truncate(&long, 155);
        assert_eq!(cut.len(), 158);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn stars_cap_at_five() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn base_document_head_metadata() {
        let html = with_site(|site| render_home(site).into_string());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://coastlinehair.com.au">"#));
        assert!(html.contains(r#"property="og:title""#));
        assert!(html.contains(r#"name="keywords""#));
        assert!(html.contains("--color-primary: #db2777;"));
        assert!(html.contains(r#""@type":"HairSalon""#));
        assert!(html.contains(r#""@type":"FAQPage""#));
    }

    #[test]
    fn images_carry_fallbacks() {
        let html = with_site(|site| render_home(site).into_string());
        assert!(html.contains("/images/hero/salon-hero.jpg"));
        assert!(html.contains("https://picsum.photos/seed/hero-hair-salon/1920/1080"));
        assert!(html.contains("onerror="));
    }

    fn onerror_handlers(html: &str) -> Vec<String> {
        html.split(r#"onerror=""#)
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(|h| h.replace("&quot;", "\"").replace("&amp;", "&"))
            .collect()
    }

    #[test]
    fn fallback_handlers_survive_apostrophes() {
        let store = sample_store();
        let gallery = with_site(|site| render_gallery(site).into_string());
        let card = service_card(find_service(&store, "mens-cut"), 1).into_string();

        let handlers: Vec<String> = onerror_handlers(&gallery)
            .into_iter()
            .chain(onerror_handlers(&card))
            .collect();
        assert!(!handlers.is_empty());
        for handler in &handlers {
            assert!(!handler.contains('\''), "{handler}");
            assert!(
                handler.starts_with(r#"this.onerror=null;this.src="https://picsum.photos/seed/"#),
                "{handler}"
            );
            assert!(handler.ends_with(r#"";"#), "{handler}");
        }
        assert!(gallery.contains("/seed/gallery-men-s-0/600/600"));
        assert!(card.contains("/seed/men-s-cut-1/800/600"));
    }

    #[test]
    fn nav_marks_current_page() {
        let html = with_site(|site| render_about(site).into_string());
        assert!(html.contains(r#"<li class="current"><a href="/about">About</a></li>"#));
    }

    #[test]
    fn service_page_embeds_service_and_breadcrumb_json_ld() {
        let store = sample_store();
        let config = SiteConfig::default();
        let site = Site::new(&store, &config, date()).unwrap();
        let html = render_service(&site, find_service(&store, "balayage"))
            .unwrap()
            .into_string();

        assert!(html.contains(r#""@type":"Service""#));
        assert!(html.contains(r#""serviceType":"Balayage""#));
        assert!(html.contains(r#""@type":"BreadcrumbList""#));
        assert!(html.contains("https://coastlinehair.com.au/services/balayage"));
        // Balayage testimonial from Emma R. matches on the title's first word.
        assert!(html.contains("Emma R."));
        assert!(html.contains("Other Services"));
    }

    #[test]
    fn area_page_lists_area_testimonials_and_other_areas() {
        let store = sample_store();
        let config = SiteConfig::default();
        let site = Site::new(&store, &config, date()).unwrap();
        let html = render_area(&site, find_area(&store, "southport"))
            .unwrap()
            .into_string();

        assert!(html.contains("Emma R."));
        assert!(html.contains("Sophie C."));
        assert!(!html.contains("Michael T."));
        assert!(html.contains(r#"href="/areas/broadbeach""#));
        assert!(html.contains(r#""@type":"BreadcrumbList""#));
    }

    #[test]
    fn about_page_renders_story_markdown() {
        let html = with_site(|site| render_about(site).into_string());
        assert!(html.contains("<strong>lot</strong>"));
        assert!(html.contains("mission"));
    }

    #[test]
    fn contact_page_lists_hours() {
        let html = with_site(|site| render_contact(site).into_string());
        assert!(html.contains("thursday"));
        assert!(html.contains("09:00 - 20:00"));
        assert!(html.contains(r#"<td class="closed">Closed</td>"#));
        assert!(html.contains("contact-form"));
    }

    #[test]
    fn gallery_groups_by_category() {
        let html = with_site(|site| render_gallery(site).into_string());
        assert_eq!(html.matches("<h2>Colour</h2>").count(), 1);
        assert!(html.contains("<h2>Bridal</h2>"));
    }

    #[test]
    fn footer_falls_back_to_build_year() {
        let mut store = sample_store();
        store.footer = None;
        let config = SiteConfig::default();
        let site = Site::new(&store, &config, date()).unwrap();
        let html = render_not_found(&site).into_string();
        assert!(html.contains("© 2026 Coastline Hair Co. All rights reserved."));
        assert!(!html.contains(r#"rel="canonical""#));
    }

    #[test]
    fn json_ld_cannot_close_script() {
        let mut store = sample_store();
        store.faq[0].answer = "</script><script>alert(1)</script>".to_string();
        let config = SiteConfig::default();
        let site = Site::new(&store, &config, date()).unwrap();
        let html = render_home(&site).into_string();
        assert!(!html.contains("</script><script>alert"));
    }

    #[test]
    fn unknown_slug_is_an_error() {
        with_site(|site| {
            let err = render_route(site, &Route::Service("nope".into())).unwrap_err();
            assert!(matches!(err, GenerateError::UnknownSlug { kind: "service", .. }));
        });
    }

    #[test]
    fn generate_writes_every_route() {
        let project = setup_project();
        let out = TempDir::new().unwrap();
        let store = sample_store();
        let config = SiteConfig::default();

        let report = generate(
            &store,
            &config,
            &project.path().join("public"),
            out.path(),
            date(),
        )
        .unwrap();

        for route in routes::all(&store) {
            assert!(out.path().join(route.output_file()).exists(), "{route:?}");
        }
        assert!(out.path().join("404.html").exists());
        assert_eq!(report.pages.len(), routes::all(&store).len() + 1);
        assert!(report.public_files >= 1);
        assert!(out.path().join("images/hero/salon-hero.jpg").exists());

        let sitemap = read_output(out.path(), "sitemap.xml");
        assert!(sitemap.contains("<lastmod>2026-10-18</lastmod>"));
        let robots = read_output(out.path(), "robots.txt");
        assert!(robots.contains("Sitemap: https://coastlinehair.com.au/sitemap.xml"));
    }

    #[test]
    fn generate_without_public_dir() {
        let out = TempDir::new().unwrap();
        let store = sample_store();
        let report = generate(
            &store,
            &SiteConfig::default(),
            &out.path().join("missing"),
            &out.path().join("dist"),
            date(),
        )
        .unwrap();
        assert_eq!(report.public_files, 0);
        assert!(out.path().join("dist/index.html").exists());
    }

    #[test]
    fn structured_data_uses_default_site_url_when_unset() {
        let out = TempDir::new().unwrap();
        let mut store = sample_store();
        store.seo.site_url = String::new();
        let config = SiteConfig {
            default_site_url: "https://preview.test/".to_string(),
            ..SiteConfig::default()
        };

        generate(&store, &config, &out.path().join("missing"), out.path(), date()).unwrap();

        let home = read_output(out.path(), "index.html");
        assert!(home.contains(r#""url":"https://preview.test""#));
        let service = read_output(out.path(), "services/balayage/index.html");
        assert!(service.contains(r#""item":"https://preview.test/services/balayage""#));
        assert!(!service.contains(r#""item":"/"#));
        let sitemap = read_output(out.path(), "sitemap.xml");
        assert!(sitemap.contains("<loc>https://preview.test/services/balayage</loc>"));
    }
}
