//! Small shared types used by the schema generators, routes and renderers.

use serde::{Deserialize, Serialize};

/// One step of a breadcrumb trail. `url` is site-relative (`/`, `/about`,
/// `/#services`); it is resolved against the site URL when emitted as
/// structured data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Header navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// Header navigation, in display order.
pub const NAVIGATION: &[NavLink] = &[
    NavLink {
        label: "Services",
        href: "/#services",
    },
    NavLink {
        label: "About",
        href: "/about",
    },
    NavLink {
        label: "Gallery",
        href: "/gallery",
    },
    NavLink {
        label: "Areas",
        href: "/#areas",
    },
    NavLink {
        label: "Contact",
        href: "/contact",
    },
];
