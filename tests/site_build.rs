//! End-to-end builds through the library API.

use sitesmith::config;
use sitesmith::generate;
use sitesmith::scaffold::{self, ScaffoldInput};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn copy_fixtures(dst: &Path) {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    for entry in walkdir::WalkDir::new(&src) {
        let entry = entry.unwrap();
        let target = dst.join(entry.path().strip_prefix(&src).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("could not read {relative}: {e}"))
}

#[test]
fn fixture_project_builds_every_page() {
    let project = TempDir::new().unwrap();
    copy_fixtures(project.path());
    let out = project.path().join("dist");

    let site_config = config::load_config(project.path()).unwrap();
    let report = generate::build(project.path(), &out, &site_config).unwrap();

    for page in [
        "index.html",
        "about/index.html",
        "contact/index.html",
        "gallery/index.html",
        "services/womens-cut/index.html",
        "services/balayage/index.html",
        "areas/surfers-paradise/index.html",
        "404.html",
        "sitemap.xml",
        "robots.txt",
        "images/hero/salon-hero.jpg",
    ] {
        assert!(out.join(page).exists(), "missing {page}");
    }
    assert_eq!(report.base_url, "https://coastlinehair.com.au");

    let sitemap = read(&out, "sitemap.xml");
    assert_eq!(sitemap.matches("<url>").count(), 4 + 4 + 3);
    assert_eq!(
        sitemap
            .matches("<loc>https://coastlinehair.com.au/services/balayage</loc>")
            .count(),
        1
    );

    let service = read(&out, "services/balayage/index.html");
    assert!(service.contains(r#""@type":"Service""#));
    assert!(service.contains(r#""@type":"BreadcrumbList""#));
    assert!(service.contains(r#"<link rel="canonical" href="https://coastlinehair.com.au/services/balayage">"#));
}

#[test]
fn scaffolded_project_builds_with_default_site_url() {
    let project = TempDir::new().unwrap();
    let site_config = config::load_config(project.path()).unwrap();
    let input = ScaffoldInput::from_args(
        Some("Bright Cuts".into()),
        Some("Hair Styling".into()),
        Some("Newtown".into()),
        None,
        None,
    )
    .unwrap();
    scaffold::scaffold(project.path(), &site_config, &input, 2026).unwrap();

    let out = project.path().join("dist");
    let report = generate::build(project.path(), &out, &site_config).unwrap();

    assert_eq!(report.base_url, "https://example.com");
    assert_eq!(report.public_files, 0);
    assert!(out.join("services/cuts-styling/index.html").exists());
    assert!(out.join("areas/newtown/index.html").exists());
    assert!(out.join("areas/newtown-cbd/index.html").exists());

    let home = read(&out, "index.html");
    assert!(home.contains("Bright Cuts"));
    assert!(home.contains("picsum.photos"));
    assert!(read(&out, "robots.txt").contains("Sitemap: https://example.com/sitemap.xml"));
}

#[test]
fn config_file_overrides_content_location() {
    let project = TempDir::new().unwrap();
    copy_fixtures(project.path());
    fs::rename(
        project.path().join("content.json"),
        project.path().join("site.json"),
    )
    .unwrap();
    fs::write(
        project.path().join("config.toml"),
        "content_file = \"site.json\"\n\n[related]\nhome_services = 2\n",
    )
    .unwrap();

    let site_config = config::load_config(project.path()).unwrap();
    assert_eq!(site_config.related.home_services, 2);
    assert_eq!(site_config.related.other_areas, 4);

    let out = project.path().join("dist");
    generate::build(project.path(), &out, &site_config).unwrap();
    assert!(out.join("index.html").exists());
}

#[test]
fn invalid_content_fails_the_build() {
    let project = TempDir::new().unwrap();
    copy_fixtures(project.path());
    let path = project.path().join("content.json");
    let json = fs::read_to_string(&path).unwrap();
    fs::write(&path, json.replace("\"mens-cut\"", "\"womens-cut\"")).unwrap();

    let site_config = config::load_config(project.path()).unwrap();
    let result = generate::build(project.path(), &project.path().join("dist"), &site_config);
    assert!(result.is_err());
    assert!(!project.path().join("dist/index.html").exists());
}
