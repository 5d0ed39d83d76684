//! Shared test utilities for the sitesmith test suite.
//!
//! Provides the fixture content store, an isolated project directory, and
//! lookup helpers that panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let store = sample_store();
//! let service = find_service(&store, "balayage");
//! assert_eq!(service.title, "Balayage");
//!
//! let tmp = setup_project();
//! assert!(tmp.path().join("content.json").exists());
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::content::{ContentStore, Service, ServiceArea};

// =========================================================================
// Fixture setup
// =========================================================================

/// Absolute path of a file under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// The fixture content store (a Gold Coast hair salon), parsed and validated.
pub fn sample_store() -> ContentStore {
    let json = std::fs::read_to_string(fixture_path("content.json")).unwrap();
    ContentStore::from_json(&json).unwrap()
}

/// Copy `fixtures/` to a temp directory laid out as a project:
/// `content.json` plus `public/`.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Store lookups, panicking with a clear message on miss
// =========================================================================

/// Find a service by slug. Panics if not found.
pub fn find_service<'a>(store: &'a ContentStore, slug: &str) -> &'a Service {
    store.service(slug).unwrap_or_else(|| {
        let slugs = store.service_slugs();
        panic!("service '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a service area by slug. Panics if not found.
pub fn find_area<'a>(store: &'a ContentStore, slug: &str) -> &'a ServiceArea {
    store.service_area(slug).unwrap_or_else(|| {
        let slugs = store.area_slugs();
        panic!("area '{slug}' not found. Available: {slugs:?}")
    })
}

/// Read a generated file relative to `root`. Panics with the path on failure.
pub fn read_output(root: &Path, relative: &str) -> String {
    let path = root.join(relative);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("could not read {}: {e}", path.display()))
}
