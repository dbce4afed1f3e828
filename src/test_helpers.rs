//! Shared test utilities for the watchpost test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (tmp, catalog) = load_fixtures();
//! assert_eq!(service_slugs(&catalog)[0], "video-surveillance");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::content::{self, Catalog};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    for entry in WalkDir::new(&fixtures).min_depth(1) {
        let entry = entry.unwrap();
        let target = tmp.path().join(entry.path().strip_prefix(&fixtures).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    tmp
}

/// Fixture copy plus its loaded catalog. Keep the `TempDir` alive for as
/// long as the content files are needed.
pub fn load_fixtures() -> (TempDir, Catalog) {
    let tmp = setup_fixtures();
    let catalog = content::load(tmp.path()).unwrap();
    (tmp, catalog)
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All service slugs in catalog order.
pub fn service_slugs(catalog: &Catalog) -> Vec<&str> {
    catalog.services.iter().map(|s| s.slug.as_str()).collect()
}
