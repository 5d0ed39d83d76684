//! The list of image slots to fill.
//!
//! The built-in manifest covers every `/images/...` path a scaffolded site
//! references. A JSON file of the same shape can replace it.

use super::ImageGenError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Destination relative to the images output directory.
    pub filename: String,
    pub prompt: String,
    /// Provider aspect ratio label, e.g. `"16:9"`.
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
}

fn default_aspect_ratio() -> String {
    "4:3".to_string()
}

impl ManifestEntry {
    fn new(filename: &str, aspect_ratio: &str, prompt: &str) -> Self {
        Self {
            filename: filename.to_string(),
            prompt: prompt.to_string(),
            aspect_ratio: aspect_ratio.to_string(),
        }
    }
}

/// Read a manifest from a JSON array of entries.
pub fn load_manifest(path: &Path) -> Result<Vec<ManifestEntry>, ImageGenError> {
    let json = fs::read_to_string(path)?;
    let entries: Vec<ManifestEntry> = serde_json::from_str(&json)?;
    Ok(entries)
}

/// The 22 stock slots: hero, services, team, gallery, about.
pub fn default_manifest() -> Vec<ManifestEntry> {
    vec![
        ManifestEntry::new(
            "hero/salon-hero.jpg",
            "16:9",
            "Luxurious modern hair salon interior, bright natural lighting, stylish chairs and \
             mirrors, fresh flowers, premium hair products on shelves, clean minimalist design, \
             Gold Coast Australia aesthetic, professional photography",
        ),
        ManifestEntry::new(
            "services/womens-cut.jpg",
            "4:3",
            "Professional hairdresser cutting woman's hair in upscale salon, precision scissors, \
             mirror reflection, modern styling chair, soft lighting, Australian hair salon, \
             editorial photography style",
        ),
        ManifestEntry::new(
            "services/mens-cut.jpg",
            "4:3",
            "Barber giving stylish men's haircut, modern fade technique, male client in salon \
             chair, professional clippers and scissors, masculine decor, Australian men's \
             grooming, professional photography",
        ),
        ManifestEntry::new(
            "services/full-colour.jpg",
            "4:3",
            "Woman getting hair coloured in professional salon, foils in hair, colour bowls and \
             brushes, stylist working, warm salon lighting, premium hair colour service, \
             Australian salon",
        ),
        ManifestEntry::new(
            "services/balayage.jpg",
            "4:3",
            "Beautiful balayage hair result, sun-kissed highlights on long wavy hair, natural \
             looking hair colour, soft golden tones, beach waves styling, Gold Coast hair salon \
             result",
        ),
        ManifestEntry::new(
            "services/keratin.jpg",
            "4:3",
            "Smooth shiny hair after keratin treatment, sleek straight hair, healthy glossy \
             finish, before and after hair transformation, salon professional treatment result",
        ),
        ManifestEntry::new(
            "services/bridal.jpg",
            "4:3",
            "Elegant bridal hairstyle, romantic updo with soft curls, wedding hair with delicate \
             flowers, bride getting ready, natural makeup, wedding day hair styling",
        ),
        ManifestEntry::new(
            "services/extensions.jpg",
            "4:3",
            "Long flowing hair extensions, natural looking tape-in extensions, blonde \
             highlights, volume and length, professional hair extension result, Australian woman",
        ),
        ManifestEntry::new(
            "services/scalp.jpg",
            "4:3",
            "Scalp treatment in progress, spa-like hair treatment, relaxing head massage, \
             professional trichology treatment, healthy scalp care, wellness salon service",
        ),
        ManifestEntry::new(
            "team/sarah.jpg",
            "1:1",
            "Professional headshot of female hair salon owner, confident smile, stylish short \
             blonde hair, age 40s, wearing black, modern salon background, Australian \
             professional woman",
        ),
        ManifestEntry::new(
            "team/james.jpg",
            "1:1",
            "Professional headshot of male hair colourist, friendly expression, modern \
             hairstyle, age 30s, wearing black, salon background, Australian Asian man, \
             professional portrait",
        ),
        ManifestEntry::new(
            "team/emma.jpg",
            "1:1",
            "Professional headshot of young female hair stylist, warm smile, long brown hair, \
             age 20s, wearing black, salon background, Australian woman, friendly portrait",
        ),
        ManifestEntry::new(
            "gallery/balayage-1.jpg",
            "1:1",
            "Stunning blonde balayage on long wavy hair, natural sun-kissed highlights, beach \
             waves, hair colour result, Gold Coast hair salon work",
        ),
        ManifestEntry::new(
            "gallery/mens-fade-1.jpg",
            "1:1",
            "Modern men's fade haircut, clean lines, textured top, fresh barbershop style, \
             Australian men's haircut",
        ),
        ManifestEntry::new(
            "gallery/bridal-1.jpg",
            "1:1",
            "Romantic bridal updo hairstyle, elegant wedding hair, soft curls and braids, \
             wedding day beauty",
        ),
        ManifestEntry::new(
            "gallery/bob-1.jpg",
            "1:1",
            "Precision bob haircut, sleek modern bob, sharp lines, professional women's \
             haircut, salon quality cut",
        ),
        ManifestEntry::new(
            "gallery/vivid-1.jpg",
            "1:1",
            "Vibrant fashion hair colour, bold creative colour, pink and purple tones, artistic \
             hair colouring, statement hair",
        ),
        ManifestEntry::new(
            "gallery/extensions-1.jpg",
            "1:1",
            "Natural looking hair extensions result, long blonde hair, seamless blend, volume \
             and length, professional extension work",
        ),
        ManifestEntry::new(
            "gallery/colour-2.jpg",
            "1:1",
            "Rich brunette hair colour, glossy chocolate brown hair, healthy shine, \
             professional colour result",
        ),
        ManifestEntry::new(
            "gallery/curls-1.jpg",
            "1:1",
            "Beautiful natural curly hair, bouncy defined curls, curly hair styling, textured \
             hair specialist result",
        ),
        ManifestEntry::new(
            "about/salon-interior.jpg",
            "16:9",
            "Modern hair salon interior, styling stations with mirrors, comfortable chairs, \
             plants and decor, bright welcoming space, premium hair salon Gold Coast",
        ),
        ManifestEntry::new(
            "about/salon-team.jpg",
            "16:9",
            "Hair salon team photo, three stylists in black uniforms, friendly professional \
             group, modern salon background, Australian team",
        ),
    ]
}
