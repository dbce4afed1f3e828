//! HTML site generation.
//!
//! Stage 3 of the build. Renders every route of the catalog and writes the
//! static site.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── sitemap.xml
//! ├── robots.txt
//! ├── assets/
//! │   ├── style.3f9a01c2de.css      # Fingerprinted, colors from config
//! │   ├── site.js                   # Dropdown behavior
//! │   └── ...                       # Copied from content/assets/
//! ├── blog/<slug>/index.html
//! ├── services/<slug>/index.html
//! ├── locations/<town>/<service>/index.html
//! └── <page>/index.html
//! ```
//!
//! Rendering is a pure function of the catalog, so pages render in parallel
//! with rayon and are written afterwards.

use crate::assets::{self, AssetError, SITE_JS, Stylesheet};
use crate::content::{Catalog, LookupError};
use crate::routes::{Route, all_routes};
use crate::seo::PageMeta;
use crate::templates::{self, PageOutput, RenderContext};
use chrono::NaiveDate;
use maud::{PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("{route}: {source}")]
    Render {
        route: String,
        #[source]
        source: LookupError,
    },
}

/// One rendered route.
#[derive(Debug)]
pub struct RenderedPage {
    pub route: Route,
    pub meta: PageMeta,
    pub html: String,
}

/// A page file written by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub title: String,
    /// Relative to the output directory.
    pub file: String,
}

/// What a generate run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub pages: Vec<GeneratedPage>,
    pub assets_copied: usize,
    pub stylesheet: String,
}

/// Render one route.
pub fn render_route(ctx: &RenderContext<'_>, route: &Route) -> Result<PageOutput, LookupError> {
    let catalog = ctx.catalog;
    let page = match route {
        Route::Home => templates::home_page(ctx),
        Route::BlogIndex => templates::blog_index(ctx),
        Route::BlogPost(slug) => templates::blog_post_template(ctx, catalog.blog_post(slug)?),
        Route::GuideIndex => templates::guide_index(ctx),
        Route::Guide(slug) => templates::guide_page_template(ctx, catalog.guide(slug)?),
        Route::ServiceIndex => templates::service_index(ctx),
        Route::Service(slug) => templates::service_page_template(ctx, catalog.service(slug)?),
        Route::IndustryIndex => templates::industry_index(ctx),
        Route::Industry(slug) => templates::industry_page_template(ctx, catalog.industry(slug)?)?,
        Route::BrandIndex => templates::brand_index(ctx),
        Route::Brand(slug) => templates::brand_page_template(ctx, catalog.brand(slug)?),
        Route::LocationIndex => templates::location_index(ctx),
        Route::Location(slug) => templates::city_page_template(ctx, catalog.location(slug)?)?,
        Route::ServiceLocation { location, service } => templates::service_location_template(
            ctx,
            catalog.service(service)?,
            catalog.location(location)?,
        ),
        Route::Contact => templates::contact_page(ctx),
        Route::Page(slug) => templates::page_template(ctx, catalog.page(slug)?),
        Route::NotFound => templates::not_found_page(ctx),
    };
    Ok(page)
}

/// Render a list of routes in parallel. Each route keeps its own result so
/// the checker can report every failure, not just the first.
pub fn render_routes(
    ctx: &RenderContext<'_>,
    routes: &[Route],
) -> Vec<(Route, Result<RenderedPage, LookupError>)> {
    routes
        .par_iter()
        .map(|route| {
            let result = render_route(ctx, route).map(|page| RenderedPage {
                route: route.clone(),
                meta: page.meta,
                html: page.markup.into_string(),
            });
            (route.clone(), result)
        })
        .collect()
}

/// Render every route of the catalog, failing on the first dangling slug.
pub fn render_site(
    catalog: &Catalog,
    stylesheet: &Stylesheet,
) -> Result<Vec<RenderedPage>, GenerateError> {
    let ctx = RenderContext::new(catalog, &stylesheet.href);
    render_routes(&ctx, &all_routes(catalog))
        .into_iter()
        .map(|(route, result)| {
            result.map_err(|source| GenerateError::Render {
                route: route.path(),
                source,
            })
        })
        .collect()
}

/// Write the whole site into `output`.
///
/// `source` is the content root; its assets directory is copied verbatim.
pub fn generate(
    catalog: &Catalog,
    source: &Path,
    output: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let stylesheet = Stylesheet::build(&catalog.config);
    let pages = render_site(catalog, &stylesheet)?;

    fs::create_dir_all(output.join("assets"))?;
    let assets_copied = assets::copy_assets(
        &source.join(&catalog.config.assets_dir),
        &output.join("assets"),
    )?;
    fs::write(output.join(stylesheet.output_file()), &stylesheet.css)?;
    fs::write(output.join("assets/site.js"), SITE_JS)?;

    let mut written = Vec::with_capacity(pages.len());
    for page in &pages {
        let file = page.route.output_file();
        let path = output.join(&file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &page.html)?;
        debug!(%file, "wrote page");
        written.push(GeneratedPage {
            title: page.meta.title.clone(),
            file,
        });
    }

    let routes: Vec<Route> = pages.iter().map(|p| p.route.clone()).collect();
    fs::write(output.join("sitemap.xml"), sitemap_xml(catalog, &routes))?;
    fs::write(output.join("robots.txt"), robots_txt(catalog))?;

    info!(
        pages = written.len(),
        assets = assets_copied,
        output = %output.display(),
        "site generated"
    );

    Ok(GenerateSummary {
        pages: written,
        assets_copied,
        stylesheet: stylesheet.href,
    })
}

/// Last-modified date for routes backed by dated content.
fn lastmod(catalog: &Catalog, route: &Route) -> Option<NaiveDate> {
    match route {
        Route::BlogPost(slug) => catalog.blog_post(slug).ok().map(|p| p.modified()),
        Route::Guide(slug) => catalog.guide(slug).ok().map(|g| g.modified()),
        Route::Page(slug) => catalog.page(slug).ok().and_then(|p| p.updated),
        Route::BlogIndex => catalog.blog_posts.iter().map(|p| p.modified()).max(),
        Route::GuideIndex => catalog.guides.iter().map(|g| g.modified()).max(),
        _ => None,
    }
}

pub fn sitemap_xml(catalog: &Catalog, routes: &[Route]) -> String {
    let config = &catalog.config;
    let markup = html! {
        (PreEscaped(r#"<?xml version="1.0" encoding="UTF-8"?>"#))
        "\n"
        urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" {
            @for route in routes.iter().filter(|r| r.in_sitemap()) {
                url {
                    loc { (config.absolute_url(&route.path())) }
                    @if let Some(date) = lastmod(catalog, route) {
                        lastmod { (date.to_string()) }
                    }
                }
            }
        }
    };
    markup.into_string()
}

pub fn robots_txt(catalog: &Catalog) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        catalog.config.absolute_url("/sitemap.xml")
    )
}
