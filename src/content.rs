//! Content loading and slug lookup.
//!
//! Stage 1 of the build. Reads the content directory into a [`Catalog`]:
//! typed, immutable collections keyed by slug.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                          # Site configuration (optional)
//! ├── assets/                              # Copied verbatim to dist/assets/
//! ├── blog/
//! │   └── cannabis-security-nj-pa.md       # +++ TOML front matter +++, markdown body
//! ├── guides/
//! │   └── access-control-buyers-guide.toml # [[sections]] with markdown bodies
//! ├── services/
//! │   ├── 010-video-surveillance.toml      # Numbered = shown in the navbar
//! │   └── structured-cabling.toml          # Unnumbered = page only
//! ├── industries/010-cannabis.toml
//! ├── brands/010-axis-communications.toml
//! ├── locations.toml                       # [[location]] entries, order preserved
//! └── pages/privacy-policy.md              # legal = true → footer link
//! ```
//!
//! Missing directories are empty collections.
//!
//! ## Validation
//!
//! - Slugs must be lowercase kebab-case
//! - Slugs must be unique within their collection
//! - A location lists each local service once
//! - Page slugs must not shadow a top-level route (`blog`, `services`, ...)
//!
//! Cross-references between collections (a location listing a service slug)
//! are not checked here; see [`crate::check`].

use chrono::NaiveDate;
use crate::config::{self, ConfigError, SiteConfig};
use crate::naming::{is_valid_slug, parse_entry_name, slugify};
use crate::routes::RESERVED_SEGMENTS;
use crate::types::{
    BlogPost, Brand, FeaturedImage, Guide, Industry, Location, Page, Service, ServiceCategory,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{}: file must start with a +++ front matter block", .0.display())]
    MissingFrontMatter(PathBuf),
    #[error("{}: front matter is not closed with +++", .0.display())]
    UnterminatedFrontMatter(PathBuf),
    #[error("{}: invalid slug '{slug}' (expected lowercase-kebab-case)", path.display())]
    InvalidSlug { slug: String, path: PathBuf },
    #[error("{}: page slug '{slug}' collides with a built-in route", path.display())]
    ReservedSlug { slug: String, path: PathBuf },
    #[error("Duplicate {kind} slug '{slug}'")]
    DuplicateSlug { kind: ContentKind, slug: String },
    #[error("{}: location '{location}' lists service '{slug}' twice", path.display())]
    DuplicateLocalService {
        location: String,
        slug: String,
        path: PathBuf,
    },
}

/// A slug lookup miss.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No {kind} with slug '{slug}'")]
    NotFound { kind: ContentKind, slug: String },
}

/// The content collections, used to label lookups and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    BlogPost,
    Guide,
    Service,
    Industry,
    Brand,
    Location,
    Page,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentKind::BlogPost => "blog post",
            ContentKind::Guide => "guide",
            ContentKind::Service => "service",
            ContentKind::Industry => "industry",
            ContentKind::Brand => "brand",
            ContentKind::Location => "location",
            ContentKind::Page => "page",
        })
    }
}

/// Everything the site is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub config: SiteConfig,
    /// Newest first.
    pub blog_posts: Vec<BlogPost>,
    /// Newest first.
    pub guides: Vec<Guide>,
    /// Navbar order (numbered first), then slug.
    pub services: Vec<Service>,
    pub industries: Vec<Industry>,
    pub brands: Vec<Brand>,
    /// Authored order.
    pub locations: Vec<Location>,
    /// By slug.
    pub pages: Vec<Page>,
}

fn find<'a, T>(
    items: &'a [T],
    kind: ContentKind,
    slug: &str,
    key: impl Fn(&T) -> &str,
) -> Result<&'a T, LookupError> {
    items
        .iter()
        .find(|item| key(*item) == slug)
        .ok_or_else(|| LookupError::NotFound {
            kind,
            slug: slug.to_string(),
        })
}

impl Catalog {
    pub fn blog_post(&self, slug: &str) -> Result<&BlogPost, LookupError> {
        find(&self.blog_posts, ContentKind::BlogPost, slug, |p| p.slug.as_str())
    }

    pub fn guide(&self, slug: &str) -> Result<&Guide, LookupError> {
        find(&self.guides, ContentKind::Guide, slug, |g| g.slug.as_str())
    }

    pub fn service(&self, slug: &str) -> Result<&Service, LookupError> {
        find(&self.services, ContentKind::Service, slug, |s| s.slug.as_str())
    }

    pub fn industry(&self, slug: &str) -> Result<&Industry, LookupError> {
        find(&self.industries, ContentKind::Industry, slug, |i| i.slug.as_str())
    }

    pub fn brand(&self, slug: &str) -> Result<&Brand, LookupError> {
        find(&self.brands, ContentKind::Brand, slug, |b| b.slug.as_str())
    }

    pub fn location(&self, slug: &str) -> Result<&Location, LookupError> {
        find(&self.locations, ContentKind::Location, slug, |l| l.slug.as_str())
    }

    pub fn page(&self, slug: &str) -> Result<&Page, LookupError> {
        find(&self.pages, ContentKind::Page, slug, |p| p.slug.as_str())
    }

    /// Newest date on any dated record (post and guide `modified`, page
    /// `updated`).
    pub fn last_modified(&self) -> Option<NaiveDate> {
        let posts = self.blog_posts.iter().map(BlogPost::modified);
        let guides = self.guides.iter().map(Guide::modified);
        let pages = self.pages.iter().filter_map(|p| p.updated);
        posts.chain(guides).chain(pages).max()
    }

    /// Services shown in the navbar, grouped by category in a fixed order.
    /// Empty categories are omitted.
    pub fn services_by_category(&self) -> Vec<(ServiceCategory, Vec<&Service>)> {
        ServiceCategory::ALL
            .iter()
            .filter_map(|&category| {
                let services: Vec<&Service> = self
                    .services
                    .iter()
                    .filter(|s| s.in_nav && s.category == category)
                    .collect();
                (!services.is_empty()).then_some((category, services))
            })
            .collect()
    }

    pub fn industries_in_nav(&self) -> impl Iterator<Item = &Industry> {
        self.industries.iter().filter(|i| i.in_nav)
    }

    pub fn brands_in_nav(&self) -> impl Iterator<Item = &Brand> {
        self.brands.iter().filter(|b| b.in_nav)
    }

    pub fn legal_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(|p| p.legal)
    }

    /// Write the catalog as pretty JSON (the load → generate handoff).
    pub fn write_json(&self, path: &Path) -> Result<(), ContentError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn read_json(path: &Path) -> Result<Self, ContentError> {
        let content = fs::read_to_string(path)?;
        let catalog = serde_json::from_str(&content)?;
        Ok(catalog)
    }
}

/// Load the whole content directory.
pub fn load(root: &Path) -> Result<Catalog, ContentError> {
    let config = config::load_config(root)?;
    let assets = root.join(&config.assets_dir);

    let mut blog_posts = load_blog_posts(&root.join("blog"), &assets)?;
    blog_posts.sort_by(|a, b| b.published.cmp(&a.published).then(a.slug.cmp(&b.slug)));
    ensure_unique(ContentKind::BlogPost, &blog_posts, |p| p.slug.as_str())?;

    let mut guides = load_guides(&root.join("guides"), &assets)?;
    guides.sort_by(|a, b| b.published.cmp(&a.published).then(a.slug.cmp(&b.slug)));
    ensure_unique(ContentKind::Guide, &guides, |g| g.slug.as_str())?;

    let services = load_ordered(&root.join("services"), |s: &mut Service, order| {
        (s.sort_key, s.in_nav) = order;
        &mut s.slug
    })?;
    ensure_unique(ContentKind::Service, &services, |s| s.slug.as_str())?;

    let industries = load_ordered(&root.join("industries"), |i: &mut Industry, order| {
        (i.sort_key, i.in_nav) = order;
        &mut i.slug
    })?;
    ensure_unique(ContentKind::Industry, &industries, |i| i.slug.as_str())?;

    let brands = load_ordered(&root.join("brands"), |b: &mut Brand, order| {
        (b.sort_key, b.in_nav) = order;
        &mut b.slug
    })?;
    ensure_unique(ContentKind::Brand, &brands, |b| b.slug.as_str())?;

    let locations = load_locations(&root.join("locations.toml"))?;
    ensure_unique(ContentKind::Location, &locations, |l| l.slug.as_str())?;

    let mut pages = load_pages(&root.join("pages"))?;
    pages.sort_by(|a, b| a.slug.cmp(&b.slug));
    ensure_unique(ContentKind::Page, &pages, |p| p.slug.as_str())?;

    debug!(
        blog_posts = blog_posts.len(),
        guides = guides.len(),
        services = services.len(),
        industries = industries.len(),
        brands = brands.len(),
        locations = locations.len(),
        pages = pages.len(),
        "content loaded"
    );

    Ok(Catalog {
        config,
        blog_posts,
        guides,
        services,
        industries,
        brands,
        locations,
        pages,
    })
}

/// Split a `+++`-delimited TOML front matter block from a markdown body.
///
/// Returns `(front_matter, body)`.
pub fn split_front_matter<'a>(
    text: &'a str,
    path: &Path,
) -> Result<(&'a str, &'a str), ContentError> {
    let text = text.trim_start_matches('\u{feff}');
    let rest = text
        .strip_prefix("+++\n")
        .or_else(|| text.strip_prefix("+++\r\n"))
        .ok_or_else(|| ContentError::MissingFrontMatter(path.to_path_buf()))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "+++" {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(ContentError::UnterminatedFrontMatter(path.to_path_buf()))
}

fn parse_toml<T: DeserializeOwned>(text: &str, path: &Path) -> Result<T, ContentError> {
    toml::from_str(text).map_err(|source| ContentError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Files with the given extension directly inside `dir`, sorted by name.
/// Hidden files are skipped; a missing directory yields nothing.
fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, ContentError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let matches = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if entry.file_type().is_file() && !hidden && matches {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Fill an empty slug from `fallback`, then validate it.
fn resolve_slug(slug: &mut String, fallback: &str, path: &Path) -> Result<(), ContentError> {
    if slug.is_empty() {
        *slug = fallback.to_string();
    }
    if !is_valid_slug(slug) {
        return Err(ContentError::InvalidSlug {
            slug: slug.clone(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn ensure_unique<T>(
    kind: ContentKind,
    items: &[T],
    key: impl Fn(&T) -> &str,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for item in items {
        let slug = key(item);
        if !seen.insert(slug) {
            return Err(ContentError::DuplicateSlug {
                kind,
                slug: slug.to_string(),
            });
        }
    }
    Ok(())
}

/// Read pixel dimensions for images under `/assets/` that exist on disk.
///
/// A missing or unreadable file only loses the `width`/`height` attributes.
fn measure(featured: &mut Option<FeaturedImage>, assets: &Path) {
    let Some(featured) = featured else { return };
    if featured.size.is_some() {
        return;
    }
    let Some(rel) = featured.src.strip_prefix("/assets/") else {
        return;
    };
    let path = assets.join(rel);
    if !path.is_file() {
        warn!(src = %featured.src, "featured image not found in assets");
        return;
    }
    match image::image_dimensions(&path) {
        Ok(size) => featured.size = Some(size),
        Err(err) => warn!(src = %featured.src, %err, "could not read featured image size"),
    }
}

fn load_blog_posts(dir: &Path, assets: &Path) -> Result<Vec<BlogPost>, ContentError> {
    let mut posts = Vec::new();
    for path in files_with_extension(dir, "md")? {
        let text = fs::read_to_string(&path)?;
        let (front, body) = split_front_matter(&text, &path)?;
        let mut post: BlogPost = parse_toml(front, &path)?;
        resolve_slug(&mut post.slug, &file_stem(&path), &path)?;
        post.body = body.trim().to_string();
        measure(&mut post.featured_image, assets);
        debug!(slug = %post.slug, "loaded blog post");
        posts.push(post);
    }
    Ok(posts)
}

fn load_guides(dir: &Path, assets: &Path) -> Result<Vec<Guide>, ContentError> {
    let mut guides = Vec::new();
    for path in files_with_extension(dir, "toml")? {
        let text = fs::read_to_string(&path)?;
        let mut guide: Guide = parse_toml(&text, &path)?;
        resolve_slug(&mut guide.slug, &file_stem(&path), &path)?;
        measure(&mut guide.featured_image, assets);
        debug!(slug = %guide.slug, sections = guide.sections.len(), "loaded guide");
        guides.push(guide);
    }
    Ok(guides)
}

/// Load a directory of `NNN-<slug>.toml` records.
///
/// `apply` stores the `(sort_key, in_nav)` pair on the record and hands back
/// its slug field for resolution. Results are sorted by `(sort_key, slug)`.
fn load_ordered<T, F>(dir: &Path, apply: F) -> Result<Vec<T>, ContentError>
where
    T: DeserializeOwned,
    F: Fn(&mut T, (u32, bool)) -> &mut String,
{
    let mut records = Vec::new();
    for path in files_with_extension(dir, "toml")? {
        let text = fs::read_to_string(&path)?;
        let mut record: T = parse_toml(&text, &path)?;
        let parsed = parse_entry_name(&file_stem(&path));
        let slug = apply(&mut record, (parsed.sort_key(), parsed.in_nav()));
        resolve_slug(slug, &parsed.name, &path)?;
        let key = (parsed.sort_key(), slug.clone());
        records.push((key, record));
    }
    records.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(records.into_iter().map(|(_, record)| record).collect())
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LocationsFile {
    #[serde(default, rename = "location")]
    locations: Vec<Location>,
}

fn load_locations(path: &Path) -> Result<Vec<Location>, ContentError> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)?;
    let file: LocationsFile = parse_toml(&text, path)?;
    let mut locations = file.locations;
    for location in &mut locations {
        let fallback = slugify(&format!("{} {}", location.name, location.state));
        resolve_slug(&mut location.slug, &fallback, path)?;
        let mut seen = HashSet::new();
        for slug in &location.services {
            if !seen.insert(slug.as_str()) {
                return Err(ContentError::DuplicateLocalService {
                    location: location.slug.clone(),
                    slug: slug.clone(),
                    path: path.to_path_buf(),
                });
            }
        }
    }
    Ok(locations)
}

fn load_pages(dir: &Path) -> Result<Vec<Page>, ContentError> {
    let mut pages = Vec::new();
    for path in files_with_extension(dir, "md")? {
        let text = fs::read_to_string(&path)?;
        let (front, body) = split_front_matter(&text, &path)?;
        let mut page: Page = parse_toml(front, &path)?;
        resolve_slug(&mut page.slug, &file_stem(&path), &path)?;
        if RESERVED_SEGMENTS.contains(&page.slug.as_str()) {
            return Err(ContentError::ReservedSlug {
                slug: page.slug,
                path,
            });
        }
        page.body = body.trim().to_string();
        pages.push(page);
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn loads_fixture_collections() {
        let tmp = setup_fixtures();
        let catalog = load(tmp.path()).unwrap();

        assert_eq!(catalog.config.company.name, "Keystone Integrated Security");
        assert_eq!(catalog.blog_posts.len(), 3);
        assert_eq!(catalog.guides.len(), 2);
        assert_eq!(catalog.services.len(), 6);
        assert_eq!(catalog.industries.len(), 3);
        assert_eq!(catalog.brands.len(), 2);
        assert_eq!(catalog.locations.len(), 4);
        assert_eq!(catalog.pages.len(), 3);
    }

    #[test]
    fn blog_posts_newest_first() {
        let tmp = setup_fixtures();
        let catalog = load(tmp.path()).unwrap();
        let dates: Vec<_> = catalog.blog_posts.iter().map(|p| p.published).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn lookup_known_blog_post() {
        let tmp = setup_fixtures();
        let catalog = load(tmp.path()).unwrap();
        let post = catalog
            .blog_post("cannabis-business-security-requirements-nj-pa")
            .unwrap();
        assert!(post.title.contains("Cannabis"));
        assert!(post.body.starts_with("New Jersey and Pennsylvania"));
    }

    #[test]
    fn lookup_missing_slug_is_typed_error() {
        let tmp = setup_fixtures();
        let catalog = load(tmp.path()).unwrap();
        let err = catalog.guide("no-such-guide").unwrap_err();
        assert_eq!(
            err,
            LookupError::NotFound {
                kind: ContentKind::Guide,
                slug: "no-such-guide".to_string()
            }
        );
        assert_eq!(err.to_string(), "No guide with slug 'no-such-guide'");
    }

    #[test]
    fn services_ordered_by_prefix_with_unnumbered_last() {
        let tmp = setup_fixtures();
        let catalog = load(tmp.path()).unwrap();
        assert_eq!(
            service_slugs(&catalog),
            vec![
                "video-surveillance",
                "access-control",
                "intrusion-detection",
                "fire-alarm-systems",
                "remote-monitoring",
                "structured-cabling",
            ]
        );
        let cabling = catalog.service("structured-cabling").unwrap();
        assert!(!cabling.in_nav);
        assert_eq!(cabling.sort_key, u32::MAX);
    }

    #[test]
    fn services_grouped_by_category_skip_hidden() {
        let tmp = setup_fixtures();
        let catalog = load(tmp.path()).unwrap();
        let groups = catalog.services_by_category();
        let categories: Vec<ServiceCategory> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(categories[0], ServiceCategory::VideoSurveillance);
        assert!(!categories.contains(&ServiceCategory::Networking));
    }

    #[test]
    fn location_slug_defaults_to_name_and_state() {
        let tmp = setup_fixtures();
        let catalog = load(tmp.path()).unwrap();
        let loc = catalog.location("cherry-hill-nj").unwrap();
        assert_eq!(loc.county, "Camden");
        assert_eq!(loc.zip, "08002");
    }

    #[test]
    fn legal_pages_filtered() {
        let tmp = setup_fixtures();
        let catalog = load(tmp.path()).unwrap();
        let legal: Vec<&str> = catalog.legal_pages().map(|p| p.slug.as_str()).collect();
        assert_eq!(legal, vec!["privacy-policy", "terms-of-service"]);
    }

    #[test]
    fn featured_image_dimensions_read_from_assets() {
        let tmp = setup_fixtures();
        let catalog = load(tmp.path()).unwrap();
        let post = catalog
            .blog_post("cannabis-business-security-requirements-nj-pa")
            .unwrap();
        let image = post.featured_image.as_ref().unwrap();
        assert_eq!(image.size, Some((64, 36)));
    }

    #[test]
    fn missing_directories_are_empty() {
        let tmp = TempDir::new().unwrap();
        let catalog = load(tmp.path()).unwrap();
        assert!(catalog.blog_posts.is_empty());
        assert!(catalog.locations.is_empty());
    }

    #[test]
    fn catalog_json_handoff() {
        let tmp = setup_fixtures();
        let catalog = load(tmp.path()).unwrap();
        let out = TempDir::new().unwrap();
        let path = out.path().join("catalog.json");
        catalog.write_json(&path).unwrap();
        let back = Catalog::read_json(&path).unwrap();
        assert_eq!(back.services.len(), catalog.services.len());
        assert_eq!(back.blog_posts[0].published, catalog.blog_posts[0].published);
        assert_eq!(
            back.blog_posts[0].featured_image,
            catalog.blog_posts[0].featured_image
        );
    }

    // =========================================================================
    // Front matter
    // =========================================================================

    #[test]
    fn split_front_matter_basic() {
        let text = "+++\ntitle = \"Hi\"\n+++\n\nBody text\n";
        let (front, body) = split_front_matter(text, Path::new("x.md")).unwrap();
        assert_eq!(front, "title = \"Hi\"\n");
        assert_eq!(body.trim(), "Body text");
    }

    #[test]
    fn split_front_matter_crlf() {
        let text = "+++\r\ntitle = \"Hi\"\r\n+++\r\nBody";
        let (front, body) = split_front_matter(text, Path::new("x.md")).unwrap();
        assert_eq!(front, "title = \"Hi\"\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn split_front_matter_missing() {
        let result = split_front_matter("# Just markdown", Path::new("x.md"));
        assert!(matches!(result, Err(ContentError::MissingFrontMatter(_))));
    }

    #[test]
    fn split_front_matter_unterminated() {
        let result = split_front_matter("+++\ntitle = \"Hi\"\n", Path::new("x.md"));
        assert!(matches!(result, Err(ContentError::UnterminatedFrontMatter(_))));
    }

    // =========================================================================
    // Validation errors
    // =========================================================================

    fn write_service(dir: &Path, file: &str, slug_line: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join(file),
            format!(
                "{slug_line}\nname = \"Cameras\"\ncategory = \"video-surveillance\"\nsummary = \"s\"\ndescription = \"d\"\n"
            ),
        )
        .unwrap();
    }

    #[test]
    fn duplicate_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("services");
        write_service(&dir, "010-cameras.toml", "");
        write_service(&dir, "020-other.toml", "slug = \"cameras\"");

        let result = load(tmp.path());
        assert!(matches!(
            result,
            Err(ContentError::DuplicateSlug {
                kind: ContentKind::Service,
                ..
            })
        ));
    }

    #[test]
    fn location_listing_service_twice_is_error() {
        let tmp = setup_fixtures();
        let path = tmp.path().join("locations.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(
            &path,
            text.replace(
                r#"services = ["video-surveillance"]"#,
                r#"services = ["video-surveillance", "video-surveillance"]"#,
            ),
        )
        .unwrap();

        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(
            &err,
            ContentError::DuplicateLocalService { location, slug, .. }
                if location == "princeton-nj" && slug == "video-surveillance"
        ));
        assert!(err.to_string().contains("locations.toml"));
    }

    #[test]
    fn native_toml_dates_in_front_matter() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("blog");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("gate-upgrades.md"),
            "+++\ntitle = \"Gate Upgrades\"\nexcerpt = \"e\"\nauthor = \"a\"\n\
             published = 2024-05-14\n+++\nBody",
        )
        .unwrap();
        let catalog = load(tmp.path()).unwrap();
        assert_eq!(
            catalog.blog_posts[0].published,
            chrono::NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
        );
    }

    #[test]
    fn last_modified_is_newest_content_date() {
        let (_tmp, mut catalog) = load_fixtures();
        let newest = catalog.last_modified().unwrap();
        assert!(catalog.blog_posts.iter().all(|p| p.modified() <= newest));
        assert!(catalog.guides.iter().all(|g| g.modified() <= newest));

        let later = NaiveDate::from_ymd_opt(2031, 2, 3).unwrap();
        catalog.pages[0].updated = Some(later);
        assert_eq!(catalog.last_modified(), Some(later));
    }

    #[test]
    fn invalid_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        write_service(&tmp.path().join("services"), "010-Cameras.toml", "");
        let result = load(tmp.path());
        assert!(matches!(result, Err(ContentError::InvalidSlug { .. })));
    }

    #[test]
    fn unknown_field_reports_path() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("services");
        write_service(&dir, "010-cameras.toml", "colour = \"red\"");
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, ContentError::Toml { .. }));
        assert!(err.to_string().contains("010-cameras.toml"));
    }

    #[test]
    fn reserved_page_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("pages");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("blog.md"),
            "+++\ntitle = \"Blog\"\ndescription = \"d\"\n+++\nbody",
        )
        .unwrap();
        let result = load(tmp.path());
        assert!(matches!(result, Err(ContentError::ReservedSlug { .. })));
    }

    #[test]
    fn hidden_files_ignored() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("blog");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(".draft.md"), "not front matter").unwrap();
        let catalog = load(tmp.path()).unwrap();
        assert!(catalog.blog_posts.is_empty());
    }
}
