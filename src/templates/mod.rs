//! HTML templates.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating, so
//! every interpolated string is escaped unless wrapped in `PreEscaped`.
//!
//! - [`base_document`]: `<html>` shell with SEO tags, JSON-LD, navbar, footer
//! - [`components`]: navbar, footer, breadcrumbs, FAQ accordion, CTA band, cards
//! - [`pages`]: one template per page type
//!
//! Page templates return a [`PageOutput`] so the checker can inspect the
//! metadata a page was built with, not just its HTML.

pub mod components;
pub mod pages;

use crate::config::SiteConfig;
use crate::content::Catalog;
use crate::routes::Route;
use crate::schema;
use crate::seo::{self, PageMeta};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use serde_json::Value;

pub use components::{breadcrumbs, cta_section, faq_accordion, footer, navbar};
pub use pages::*;

/// Site-absolute path of the navigation script.
pub const SCRIPT_PATH: &str = "/assets/site.js";

/// Everything a template needs besides its own record.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub catalog: &'a Catalog,
    /// Site-absolute path of the fingerprinted stylesheet.
    pub stylesheet: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(catalog: &'a Catalog, stylesheet: &'a str) -> Self {
        Self {
            catalog,
            stylesheet,
        }
    }

    pub fn config(&self) -> &'a SiteConfig {
        &self.catalog.config
    }
}

/// A rendered page along with the metadata it was rendered from.
#[derive(Debug)]
pub struct PageOutput {
    pub meta: PageMeta,
    pub markup: Markup,
}

/// The full HTML document: head (meta tags, stylesheet, JSON-LD) and the
/// navbar/footer chrome around `content`.
///
/// The organization JSON-LD is added to every page; `schemas` holds the
/// page-specific documents.
pub fn base_document(
    ctx: &RenderContext<'_>,
    meta: &PageMeta,
    schemas: &[Value],
    current: &Route,
    content: Markup,
) -> Markup {
    let config = ctx.config();
    html! {
        (DOCTYPE)
        html lang=(config.site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (seo::render_meta(meta, config))
                link rel="stylesheet" href=(ctx.stylesheet);
                (schema::script(&schema::organization(config)))
                @for doc in schemas {
                    (schema::script(doc))
                }
                @if let Some(src) = &config.integrations.analytics_script {
                    script defer src=(src) {}
                }
                script defer src=(SCRIPT_PATH) {}
            }
            body {
                a.skip-link href="#main" { "Skip to content" }
                (navbar(ctx, current))
                main #main {
                    (content)
                }
                (footer(ctx))
            }
        }
    }
}

/// Render markdown to HTML. Tables and strikethrough are enabled.
pub fn markdown(text: &str) -> Markup {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(text, options);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

/// `March 4, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
