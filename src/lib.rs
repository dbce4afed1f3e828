//! # Watchpost
//!
//! A static site generator for a commercial security integrator's marketing
//! and lead-generation site. Services, industries, brands, service-area towns,
//! blog posts, buyer's guides and legal pages are authored as TOML and
//! markdown files; every page is rendered to plain HTML with SEO metadata and
//! schema.org JSON-LD.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Load      content/  →  catalog.json   (files → typed collections)
//! 2. Check     catalog   →  report         (references, SEO limits, links)
//! 3. Generate  catalog   →  dist/          (final HTML site)
//! ```
//!
//! Each stage can be run on its own. The catalog is human-readable JSON, so a
//! failing check can be reproduced by reading the same file the generator
//! reads.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Stage 1: reads the content directory into a [`content::Catalog`]; slug lookups |
//! | [`check`] | Stage 2: renders every route in memory and reports broken references and SEO issues |
//! | [`generate`] | Stage 3: renders routes in parallel and writes the site, sitemap and robots.txt |
//! | [`routes`] | The URL space: one [`routes::Route`] per page, path and output file |
//! | [`templates`] | Maud page templates and shared components (navbar, footer, FAQ accordion) |
//! | [`seo`] | Per-page metadata: title, description, canonical, Open Graph |
//! | [`schema`] | schema.org JSON-LD builders and validation |
//! | [`config`] | `config.toml` loading, validation, stock defaults and color CSS |
//! | [`types`] | Content records serialized in the catalog |
//! | [`naming`] | `NNN-name` file name convention and slug rules |
//! | [`assets`] | Fingerprinted stylesheet, site script and copied asset files |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are
//! ordinary Rust functions, so a page template that needs a service can only
//! be called with one, and every interpolated value is escaped.
//!
//! ## Typed Lookups
//!
//! A slug that does not resolve is a [`content::LookupError`], never a panic.
//! Routes are derived from the catalog, so a miss means a cross-reference in
//! the content is wrong; `check` reports it against the page that made it.
//!
//! ## No Client-Side Framework
//!
//! The mobile menu is a checkbox toggle and FAQ answers are `<details>`
//! elements, so both work without JavaScript. The one script the site ships
//! keeps at most one navbar dropdown open (the last one clicked) and closes
//! them on outside clicks. Escape closes dropdowns and the mobile menu.

pub mod assets;
pub mod check;
pub mod config;
pub mod content;
pub mod generate;
pub mod logging;
pub mod naming;
pub mod output;
pub mod routes;
pub mod schema;
pub mod seo;
pub mod templates;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
