//! Content integrity checks.
//!
//! Runs between load and generate. Renders every route in memory and
//! reports:
//!
//! - slugs referenced across collections that do not resolve, and local
//!   services a location lists twice
//! - routes that fail to render
//! - empty or over-long titles and meta descriptions
//! - duplicate titles
//! - internal `href`/`src` targets that are neither a route nor an asset
//! - `#fragment` links with no matching `id` on the page, and repeated ids
//! - JSON-LD blocks that are not valid JSON with `@context` and `@type`
//!
//! Errors always fail a build; warnings fail it only in strict mode.

use crate::assets::Stylesheet;
use crate::content::Catalog;
use crate::generate::render_routes;
use crate::routes::{Route, all_routes};
use crate::schema::{extract_json_ld, validate_json_ld};
use crate::seo::check_meta;
use crate::templates::{RenderContext, SCRIPT_PATH};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    /// Route path, or the content record the issue was found in.
    pub location: String,
    pub message: String,
}

impl Issue {
    fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location: location.into(),
            message: message.into(),
        }
    }

    fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location: location.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub pages_checked: usize,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Whether a build may proceed.
    pub fn passes(&self, strict: bool) -> bool {
        if strict {
            self.issues.is_empty()
        } else {
            !self.has_errors()
        }
    }
}

/// Check the catalog. `content_assets` are the site-absolute paths of the
/// files in the content assets directory (see [`crate::assets::list_assets`]).
pub fn check(catalog: &Catalog, content_assets: &[String]) -> Report {
    let mut issues = Vec::new();
    check_references(catalog, &mut issues);

    let stylesheet = Stylesheet::build(&catalog.config);
    let ctx = RenderContext::new(catalog, &stylesheet.href);
    let routes = all_routes(catalog);

    let mut targets: HashSet<String> = routes.iter().map(Route::path).collect();
    targets.extend(content_assets.iter().cloned());
    targets.insert(stylesheet.href.clone());
    targets.insert(SCRIPT_PATH.to_string());
    targets.insert("/sitemap.xml".to_string());
    targets.insert("/robots.txt".to_string());

    let mut titles: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let rendered = render_routes(&ctx, &routes);
    let pages_checked = rendered.len();

    for (route, result) in rendered {
        let path = route.path();
        let page = match result {
            Ok(page) => page,
            Err(err) => {
                issues.push(Issue::error(&path, format!("render failed: {err}")));
                continue;
            }
        };

        for issue in check_meta(&page.meta, &catalog.config.seo) {
            let message = issue.to_string();
            issues.push(if issue.is_error() {
                Issue::error(&path, message)
            } else {
                Issue::warning(&path, message)
            });
        }
        if !page.meta.noindex {
            titles
                .entry(page.meta.title.clone())
                .or_default()
                .push(path.clone());
        }

        for target in internal_targets(&page.html) {
            if !resolves(target, &targets) {
                issues.push(Issue::error(&path, format!("dead internal link: {target}")));
            }
        }

        for message in fragment_issues(&page.html) {
            issues.push(Issue::error(&path, message));
        }

        for (i, block) in extract_json_ld(&page.html).into_iter().enumerate() {
            if let Err(err) = validate_json_ld(block) {
                issues.push(Issue::error(&path, format!("JSON-LD block {}: {err}", i + 1)));
            }
        }
    }

    for (title, paths) in titles {
        if paths.len() > 1 {
            issues.push(Issue::warning(
                &paths[0],
                format!("title \"{title}\" also used by {}", paths[1..].join(", ")),
            ));
        }
    }

    issues.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.location.cmp(&b.location))
    });
    debug!(pages = pages_checked, issues = issues.len(), "check finished");

    Report {
        pages_checked,
        issues,
    }
}

/// Cross-collection slug references must resolve through the catalog lookups.
fn check_references(catalog: &Catalog, issues: &mut Vec<Issue>) {
    for location in &catalog.locations {
        let mut seen = HashSet::new();
        for slug in &location.services {
            let at = format!("locations.toml: {}", location.slug);
            if let Err(err) = catalog.service(slug) {
                issues.push(Issue::error(at, err.to_string()));
            } else if !seen.insert(slug.as_str()) {
                issues.push(Issue::error(at, format!("service '{slug}' listed twice")));
            }
        }
    }
    for industry in &catalog.industries {
        for slug in &industry.related_services {
            if let Err(err) = catalog.service(slug) {
                issues.push(Issue::error(
                    format!("industry {}", industry.slug),
                    err.to_string(),
                ));
            }
        }
    }
}

/// Values of every `name="..."` attribute in `html`, in document order.
///
/// Relies on the renderer quoting attributes with `"`.
fn attr_values<'a>(html: &'a str, name: &str) -> Vec<&'a str> {
    let needle = format!(" {name}=\"");
    let mut values = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find(&needle) {
        let value_start = &rest[start + needle.len()..];
        let Some(end) = value_start.find('"') else {
            break;
        };
        values.push(&value_start[..end]);
        rest = &value_start[end..];
    }
    values
}

/// Site-absolute `href` and `src` attribute values in `html`.
///
/// Protocol-relative URLs, external URLs and fragment-only links are
/// skipped; see [`fragment_issues`] for the latter.
pub fn internal_targets(html: &str) -> Vec<&str> {
    ["href", "src"]
        .into_iter()
        .flat_map(|attr| attr_values(html, attr))
        .filter(|value| value.starts_with('/') && !value.starts_with("//"))
        .collect()
}

/// Problems with in-page anchors: `href="#x"` links without an element
/// `id="x"`, empty fragments and ids used more than once.
pub fn fragment_issues(html: &str) -> Vec<String> {
    let mut issues = Vec::new();
    let mut ids = HashSet::new();
    for id in attr_values(html, "id") {
        if id.is_empty() {
            issues.push("empty id attribute".to_string());
        } else if !ids.insert(id) {
            issues.push(format!("duplicate id: {id}"));
        }
    }
    for href in attr_values(html, "href") {
        let Some(fragment) = href.strip_prefix('#') else {
            continue;
        };
        if fragment.is_empty() {
            issues.push("empty fragment link: #".to_string());
        } else if !ids.contains(fragment) {
            issues.push(format!("dead fragment link: #{fragment}"));
        }
    }
    issues
}

fn resolves(target: &str, targets: &HashSet<String>) -> bool {
    let path = target.split(['?', '#']).next().unwrap_or_default();
    if targets.contains(path) {
        return true;
    }
    // Routes also answer without the trailing slash or with index.html.
    Route::parse(path).is_some_and(|route| targets.contains(&route.path()))
}
