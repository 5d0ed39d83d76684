//! Content scaffolding for a new customer.
//!
//! `sitesmith scaffold "Business Name" "Service" "Location" [phone] [email]`
//! synthesizes a complete, valid [`ContentStore`] by filling fixed templates
//! with the inputs, then writes it to the project's content file. Any
//! existing file is overwritten.
//!
//! [`generate_content`] is pure: the year is passed in, so the same inputs
//! and year always produce the same document.

use crate::config::SiteConfig;
use crate::content::{
    About, Business, Colors, ContentError, ContentStore, Faq, Footer, GalleryItem, Highlight,
    ImageOverrides, KeyedList, SchemaSettings, Seo, Service, ServiceArea, TeamMember,
    Testimonial,
};
use chrono::Datelike;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const USAGE: &str =
    r#"Usage: sitesmith scaffold "Business Name" "Service" "Location" ["Phone"] ["Email"]"#;

const DEFAULT_PHONE: &str = "1300 000 000";

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Validated scaffold inputs with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldInput {
    pub business_name: String,
    pub service: String,
    pub location: String,
    pub phone: String,
    pub email: String,
}

impl ScaffoldInput {
    /// Build from raw CLI arguments. Empty strings count as missing.
    pub fn from_args(
        business_name: Option<String>,
        service: Option<String>,
        location: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Result<Self, ScaffoldError> {
        let business_name = required(business_name, "business name")?;
        let service = required(service, "service")?;
        let location = required(location, "location")?;
        let phone = non_empty(phone).unwrap_or_else(|| DEFAULT_PHONE.to_string());
        let email = non_empty(email).unwrap_or_else(|| default_email(&business_name));
        Ok(Self {
            business_name,
            service,
            location,
            phone,
            email,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ScaffoldError> {
    non_empty(value).ok_or(ScaffoldError::MissingArgument(name))
}

/// `hello@<name lowercased, whitespace removed>.com.au`
pub fn default_email(business_name: &str) -> String {
    let local: String = business_name
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!("hello@{local}.com.au")
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Slugify `text`, falling back when nothing URL-safe is left.
fn slug_or(text: &str, fallback: String) -> String {
    let slug = slug::slugify(text);
    if slug.is_empty() { fallback } else { slug }
}

/// Build the whole content document from the inputs.
pub fn generate_content(input: &ScaffoldInput, year: i32) -> ContentStore {
    let name = input.business_name.as_str();
    let service = input.service.as_str();
    let location = input.location.as_str();
    let service_lower = service.to_lowercase();
    let location_lower = location.to_lowercase();
    let established = year - 10;
    let handle: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    let business = Business {
        name: name.to_string(),
        tagline: format!("{location}'s Most Trusted {service} - Quality You Can Count On"),
        phone: input.phone.clone(),
        email: input.email.clone(),
        address: location.to_string(),
        city: location.to_string(),
        state: String::new(),
        postcode: String::new(),
        country: "AU".to_string(),
        established: Some(established),
        opening_hours: [
            ("monday", "Closed"),
            ("tuesday", "09:00 - 18:00"),
            ("wednesday", "09:00 - 18:00"),
            ("thursday", "09:00 - 20:00"),
            ("friday", "09:00 - 18:00"),
            ("saturday", "09:00 - 18:00"),
            ("sunday", "Closed"),
        ]
        .into_iter()
        .map(|(day, hours)| (day.to_string(), hours.to_string()))
        .collect(),
        social_media: [
            ("instagram", format!("https://instagram.com/{handle}")),
            ("facebook", format!("https://facebook.com/{handle}")),
        ]
        .into_iter()
        .map(|(platform, url)| (platform.to_string(), url))
        .collect(),
        service: service.to_string(),
        geo: None,
    };

    let services = scaffold_services(location);
    let service_areas = scaffold_areas(location);

    let testimonials = vec![
        testimonial(
            "Emma Richardson",
            location,
            format!(
                "I've been coming to {name} for 3 years and wouldn't go anywhere else. The team \
                 really listens and always delivers exactly what I'm looking for. Best \
                 {service_lower} in {location}!"
            ),
            "Balayage & Cut",
        ),
        testimonial(
            "Sophie Chen",
            location,
            format!(
                "Found my forever salon! The attention to detail is incredible, and the \
                 atmosphere is so relaxing. My colour has never looked better. Highly recommend \
                 to anyone in {location}."
            ),
            "Full Colour",
        ),
        testimonial(
            "Michael Torres",
            location,
            "Finally a barber-quality cut in a salon environment. Quick, professional, and they \
             actually remember how I like my hair. Great value for the quality."
                .to_string(),
            "Men's Cut & Style",
        ),
        testimonial(
            "Jessica Williams",
            location,
            format!(
                "{name} did my bridal hair and I couldn't have been happier. They made me feel \
                 so beautiful on my big day. The trial was thorough and the day-of service was \
                 flawless."
            ),
            "Bridal Package",
        ),
    ];

    let team = vec![
        team_member(
            "Sarah",
            "Owner & Senior Stylist",
            format!("Sarah founded {name} in {established} and still takes clients every week."),
            &["Precision cuts", "Bridal"],
        ),
        team_member(
            "James",
            "Colour Specialist",
            "James lives for lived-in colour and seamless blends.".to_string(),
            &["Balayage", "Colour correction"],
        ),
        team_member(
            "Emma",
            "Stylist",
            "Emma brings the latest trends to every appointment.".to_string(),
            &["Curls", "Extensions"],
        ),
    ];

    let faq = vec![
        Faq {
            question: "What are your opening hours?".to_string(),
            answer: "We're open Tuesday to Saturday, 9am-6pm, with late nights on Thursday \
                     until 8pm. Closed Sunday and Monday."
                .to_string(),
        },
        Faq {
            question: "Do I need to book an appointment?".to_string(),
            answer: "We recommend booking in advance to secure your preferred time, but we do \
                     accept walk-ins when availability allows."
                .to_string(),
        },
        Faq {
            question: "What products do you use?".to_string(),
            answer: "We exclusively use premium, salon-quality products that are gentle on your \
                     hair and the environment."
                .to_string(),
        },
        Faq {
            question: "Do you offer parking?".to_string(),
            answer: "Yes! Free parking is available directly behind our salon, with additional \
                     street parking nearby."
                .to_string(),
        },
    ];

    let gallery = [
        ("balayage-1", "Blonde balayage on long waves", "Colour"),
        ("mens-fade-1", "Modern men's fade", "Men's"),
        ("bridal-1", "Romantic bridal updo", "Bridal"),
        ("bob-1", "Precision bob", "Cuts"),
        ("vivid-1", "Vivid fashion colour", "Colour"),
        ("extensions-1", "Seamless extensions", "Extensions"),
        ("colour-2", "Glossy brunette colour", "Colour"),
        ("curls-1", "Defined natural curls", "Cuts"),
    ]
    .into_iter()
    .map(|(file, alt, category)| GalleryItem {
        image: format!("/images/gallery/{file}.jpg"),
        alt: alt.to_string(),
        category: category.to_string(),
    })
    .collect();

    let seo = Seo {
        title: format!("{name} | Best {service} in {location} | Book Online"),
        description: format!(
            "{location}'s top-rated {service_lower} salon. Expert cuts, colour, and styling \
             with 10+ years experience. 5-star reviews. Book your appointment today!"
        ),
        keywords: vec![
            format!("{service_lower} {location_lower}"),
            format!("best {service_lower} {location_lower}"),
            format!("{location_lower} {service_lower}"),
            format!("hair salon {location_lower}"),
            format!("{service_lower} near me"),
            format!("{location_lower} hair colour"),
            format!("balayage {location_lower}"),
            name.to_string(),
        ],
        site_url: String::new(),
        site_name: name.to_string(),
    };

    let about = About {
        title: format!("Why {location} Chooses {name}"),
        story: format!(
            "Since {established}, **{name}** has been {location}'s destination for exceptional \
             {service_lower} services.\n\nOur passionate team combines artistic vision with \
             technical expertise to help you look and feel your absolute best. We believe great \
             hair starts with understanding your lifestyle, preferences, and goals."
        ),
        mission: "Our mission is simple: deliver salon experiences that exceed expectations, \
                  using sustainable practices and premium products that are kind to your hair \
                  and the environment."
            .to_string(),
        features: vec![
            highlight(
                "Licensed Professionals",
                "Fully qualified stylists with ongoing training",
            ),
            highlight(
                "Premium Products",
                "We only use salon-quality, sustainable products",
            ),
            highlight(
                "Hygiene Guaranteed",
                "Strict sanitization protocols for your safety",
            ),
            highlight(
                "Free Consultations",
                "Every visit starts with understanding your needs",
            ),
        ],
        values: vec![
            highlight("Craft", "Every cut and colour is done by hand, never rushed"),
            highlight("Care", "Your hair's health comes before any trend"),
        ],
    };

    let footer = Footer {
        copyright: format!("© {year} {name}. All rights reserved. ABN pending."),
        areas: format!("Proudly serving {location}, and surrounding suburbs"),
        hours: "Tue-Sat 9am-6pm | Thu late night 8pm".to_string(),
    };

    ContentStore {
        business,
        services,
        service_areas,
        testimonials,
        team,
        faq,
        gallery,
        seo,
        colors: Colors {
            primary: "#f97316".to_string(),
            primary_light: "#fb923c".to_string(),
            secondary: "#1f2937".to_string(),
            accent: "#fbbf24".to_string(),
        },
        images: ImageOverrides {
            hero: Some("/images/hero/salon-hero.jpg".to_string()),
            about: Some("/images/about/salon-interior.jpg".to_string()),
        },
        about,
        schema: SchemaSettings::default(),
        footer: Some(footer),
    }
}

fn scaffold_services(location: &str) -> Vec<Service> {
    [
        (
            "Cuts & Styling",
            format!(
                "Expert cuts and styling tailored to your unique features. Our {location} \
                 stylists stay current with the latest trends while creating timeless looks."
            ),
            "From $45",
            "45-60 mins",
            "womens-cut",
            ["Consultation", "Wash & blow-dry", "Styling advice"],
        ),
        (
            "Colour & Highlights",
            "Full colour, balayage, highlights and colour correction. We use premium products \
             for vibrant, long-lasting results that protect your hair."
                .to_string(),
            "From $120",
            "2-3 hours",
            "full-colour",
            ["Colour consultation", "Toner", "Gloss finish"],
        ),
        (
            "Treatments & Care",
            "Revitalize damaged hair with our luxury treatments. Keratin smoothing, deep \
             conditioning, and scalp therapy for healthy, beautiful hair."
                .to_string(),
            "From $80",
            "60-90 mins",
            "keratin",
            ["Hair analysis", "Deep conditioning", "Scalp massage"],
        ),
        (
            "Bridal & Events",
            "Make your special day unforgettable. Bridal packages include trial sessions, \
             day-of styling, and group bookings for the whole wedding party."
                .to_string(),
            "From $250",
            "Half day",
            "bridal",
            ["Trial session", "Day-of styling", "Group bookings"],
        ),
    ]
    .into_iter()
    .enumerate()
    .map(
        |(i, (title, description, price, duration, image, features))| Service {
            slug: slug_or(title, format!("service-{}", i + 1)),
            title: title.to_string(),
            short_description: description
                .split(". ")
                .next()
                .unwrap_or_default()
                .trim_end_matches('.')
                .to_string()
                + ".",
            description,
            price: price.to_string(),
            duration: duration.to_string(),
            image: format!("/images/services/{image}.jpg"),
            features: features.iter().map(|f| f.to_string()).collect(),
        },
    )
    .collect()
}

/// The location itself plus placeholder suburbs around it.
fn scaffold_areas(location: &str) -> Vec<ServiceArea> {
    let names = [
        location.to_string(),
        format!("{location} CBD"),
        format!("North {location}"),
        format!("South {location}"),
        format!("East {location}"),
        format!("West {location}"),
    ];
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| ServiceArea {
            slug: slug_or(&name, format!("area-{}", i + 1)),
            description: format!(
                "Looking for a trusted salon in {name}? Our team is just a short trip away."
            ),
            name,
        })
        .collect()
}

fn testimonial(name: &str, location: &str, text: String, service: &str) -> Testimonial {
    Testimonial {
        name: name.to_string(),
        location: location.to_string(),
        text,
        rating: 5,
        service: service.to_string(),
    }
}

fn team_member(name: &str, role: &str, bio: String, specialties: &[&str]) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        role: role.to_string(),
        bio,
        image: format!("/images/team/{}.jpg", name.to_lowercase()),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
    }
}

fn highlight(title: &str, description: &str) -> Highlight {
    Highlight {
        title: title.to_string(),
        description: description.to_string(),
    }
}

/// Generate and write the content file under `project`. Returns its path.
pub fn scaffold(
    project: &Path,
    config: &SiteConfig,
    input: &ScaffoldInput,
    year: i32,
) -> Result<PathBuf, ScaffoldError> {
    let store = generate_content(input, year);
    // Validating here catches an input that slugifies into a collision.
    store.validate()?;
    let path = project.join(&config.content_file);
    store.save(&path)?;
    info!(path = %path.display(), business = %input.business_name, "wrote content");
    Ok(path)
}
