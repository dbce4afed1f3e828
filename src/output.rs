//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is an inventory of the site's content, not of its files. Every
//! entity leads with its positional index and title; the URL it is served at
//! and other details follow as indented context lines.
//!
//! # Output Format
//!
//! ## Load
//!
//! ```text
//! Services
//! 001 Video Surveillance (3 FAQs)
//!     /services/video-surveillance/
//!     Category: Video Surveillance
//!     Structured Cabling (not in nav)
//!
//! Locations
//! 001 Cherry Hill, NJ
//!     Camden County, 08002
//!     Local pages: video-surveillance, access-control
//!
//! Blog
//! 001 Cannabis Business Security Requirements in NJ and PA
//!     2024-05-14 · Dana Reyes · 4 min read
//! ```
//!
//! ## Check
//!
//! ```text
//! error   /industries/cannabis/  No service with slug 'lasers'
//! warning /services/access-control/  meta description is 171 characters (max 160)
//!
//! Checked 41 pages: 1 error, 1 warning
//! ```
//!
//! ## Generate
//!
//! ```text
//! Access Control → services/access-control/index.html
//! ...
//! Stylesheet /assets/style.3f9a01c2de.css
//! Generated 41 pages, copied 3 assets
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::check::{Report, Severity};
use crate::content::Catalog;
use crate::generate::GenerateSummary;
use crate::routes::Route;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Index + title, with an optional parenthesized detail.
///
/// ```text
/// 001 Access Control (2 FAQs)
/// 002 Brivo
/// ```
fn entity_header(index: usize, title: &str, detail: Option<String>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

fn context(line: impl AsRef<str>) -> String {
    format!("    {}", line.as_ref())
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn faq_detail(n: usize) -> Option<String> {
    (n > 0).then(|| plural(n, "FAQ"))
}

/// Push a section: blank separator (except first), heading, then body lines.
fn section(lines: &mut Vec<String>, heading: &str, body: Vec<String>) {
    if body.is_empty() {
        return;
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(heading.to_string());
    lines.extend(body);
}

/// Records ordered by file prefix come first and are numbered; the rest are
/// listed after them, unnumbered, as `(not in nav)`.
fn ordered<T>(
    items: &[T],
    in_nav: impl Fn(&T) -> bool,
    mut describe: impl FnMut(&T, Option<usize>) -> Vec<String>,
) -> Vec<String> {
    let mut body = Vec::new();
    let mut position = 0;
    for item in items {
        if in_nav(item) {
            position += 1;
            body.extend(describe(item, Some(position)));
        } else {
            body.extend(describe(item, None));
        }
    }
    body
}

// ============================================================================
// Stage 1: Load output
// ============================================================================

/// Format the content inventory of a loaded catalog.
pub fn format_load_output(catalog: &Catalog, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    let services = ordered(
        &catalog.services,
        |s| s.in_nav,
        |s, pos| {
            let mut out = match pos {
                Some(i) => vec![entity_header(i, &s.name, faq_detail(s.faqs.len()))],
                None => vec![context(format!("{} (not in nav)", s.name))],
            };
            out.push(context(Route::Service(s.slug.clone()).path()));
            out.push(context(format!("Category: {}", s.category.label())));
            out
        },
    );
    section(&mut lines, "Services", services);

    let industries = ordered(
        &catalog.industries,
        |i| i.in_nav,
        |i, pos| {
            let mut out = match pos {
                Some(n) => vec![entity_header(n, &i.name, faq_detail(i.faqs.len()))],
                None => vec![context(format!("{} (not in nav)", i.name))],
            };
            out.push(context(Route::Industry(i.slug.clone()).path()));
            if !i.related_services.is_empty() {
                out.push(context(format!(
                    "Related services: {}",
                    i.related_services.join(", ")
                )));
            }
            out
        },
    );
    section(&mut lines, "Industries", industries);

    let brands = ordered(
        &catalog.brands,
        |b| b.in_nav,
        |b, pos| {
            let products = (!b.products.is_empty()).then(|| plural(b.products.len(), "product"));
            let mut out = match pos {
                Some(n) => vec![entity_header(n, &b.name, products)],
                None => vec![context(format!("{} (not in nav)", b.name))],
            };
            out.push(context(Route::Brand(b.slug.clone()).path()));
            out
        },
    );
    section(&mut lines, "Brands", brands);

    let mut locations = Vec::new();
    for (i, location) in catalog.locations.iter().enumerate() {
        locations.push(entity_header(i + 1, &location.display_name(), None));
        locations.push(context(format!(
            "{} County, {}",
            location.county, location.zip
        )));
        if !location.services.is_empty() {
            locations.push(context(format!(
                "Local pages: {}",
                location.services.join(", ")
            )));
        }
    }
    section(&mut lines, "Locations", locations);

    let mut blog = Vec::new();
    for (i, post) in catalog.blog_posts.iter().enumerate() {
        blog.push(entity_header(i + 1, &post.title, None));
        blog.push(context(format!(
            "{} \u{b7} {} \u{b7} {} min read",
            post.published,
            post.author,
            post.reading_minutes()
        )));
    }
    section(&mut lines, "Blog", blog);

    let mut guides = Vec::new();
    for (i, guide) in catalog.guides.iter().enumerate() {
        guides.push(entity_header(
            i + 1,
            &guide.title,
            Some(plural(guide.sections.len(), "section")),
        ));
        guides.push(context(Route::Guide(guide.slug.clone()).path()));
    }
    section(&mut lines, "Guides", guides);

    let mut pages = Vec::new();
    for (i, page) in catalog.pages.iter().enumerate() {
        let detail = page.legal.then(|| "legal".to_string());
        pages.push(entity_header(i + 1, &page.title, detail));
        pages.push(context(Route::Page(page.slug.clone()).path()));
    }
    section(&mut lines, "Pages", pages);

    let mut config = Vec::new();
    if source_root.join("config.toml").is_file() {
        config.push(context("config.toml"));
    } else {
        config.push(context("(stock defaults)"));
    }
    if source_root.join(&catalog.config.assets_dir).is_dir() {
        config.push(context(format!("{}/", catalog.config.assets_dir)));
    }
    section(&mut lines, "Config", config);

    lines
}

pub fn print_load_output(catalog: &Catalog, source_root: &Path) {
    for line in format_load_output(catalog, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Check output
// ============================================================================

/// One line per issue, errors first, then a totals line.
pub fn format_check_report(report: &Report) -> Vec<String> {
    let mut lines: Vec<String> = report
        .issues
        .iter()
        .map(|issue| {
            let label = match issue.severity {
                Severity::Error => "error  ",
                Severity::Warning => "warning",
            };
            format!("{} {}  {}", label, issue.location, issue.message)
        })
        .collect();

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let errors = report.errors().count();
    let warnings = report.warnings().count();
    lines.push(format!(
        "Checked {}: {}, {}",
        plural(report.pages_checked, "page"),
        plural(errors, "error"),
        plural(warnings, "warning")
    ));
    lines
}

pub fn print_check_report(report: &Report) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 3: Generate output
// ============================================================================

pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .pages
        .iter()
        .map(|page| format!("{} \u{2192} {}", page.title, page.file))
        .collect();
    lines.push(String::new());
    lines.push(format!("Stylesheet {}", summary.stylesheet));
    lines.push(format!(
        "Generated {}, copied {}",
        plural(summary.pages.len(), "page"),
        plural(summary.assets_copied, "asset")
    ));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Routes
// ============================================================================

/// `path → output file` for every route.
pub fn format_routes(routes: &[Route]) -> Vec<String> {
    let width = routes.iter().map(|r| r.path().len()).max().unwrap_or(0);
    routes
        .iter()
        .map(|r| format!("{:<width$}  {}", r.path(), r.output_file()))
        .collect()
}

pub fn print_routes(routes: &[Route]) {
    for line in format_routes(routes) {
        println!("{}", line);
    }
}
