//! The site's URL space.
//!
//! Every generated page corresponds to one [`Route`]. Routes use directory
//! style URLs (`/blog/<slug>/` → `blog/<slug>/index.html`) so the output can
//! be served by any static file host without rewrite rules.
//!
//! ```text
//! /                               Home
//! /blog/  /blog/<slug>/           Blog index, posts
//! /guides/  /guides/<slug>/       Guide index, guides
//! /services/  /services/<slug>/   Service index, services
//! /industries/  /industries/<slug>/
//! /brands/  /brands/<slug>/
//! /locations/  /locations/<slug>/  /locations/<slug>/<service>/
//! /contact/
//! /<page>/                        Standalone and legal pages
//! /404.html
//! ```

use crate::content::Catalog;

/// Top-level path segments owned by built-in routes. Page slugs may not use them.
pub const RESERVED_SEGMENTS: &[&str] = &[
    "assets",
    "blog",
    "brands",
    "contact",
    "guides",
    "industries",
    "locations",
    "services",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Route {
    Home,
    BlogIndex,
    BlogPost(String),
    GuideIndex,
    Guide(String),
    ServiceIndex,
    Service(String),
    IndustryIndex,
    Industry(String),
    BrandIndex,
    Brand(String),
    LocationIndex,
    Location(String),
    /// A service landing page scoped to one town.
    ServiceLocation {
        location: String,
        service: String,
    },
    Contact,
    Page(String),
    NotFound,
}

impl Route {
    /// Site-absolute URL path.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::BlogIndex => "/blog/".to_string(),
            Route::BlogPost(slug) => format!("/blog/{slug}/"),
            Route::GuideIndex => "/guides/".to_string(),
            Route::Guide(slug) => format!("/guides/{slug}/"),
            Route::ServiceIndex => "/services/".to_string(),
            Route::Service(slug) => format!("/services/{slug}/"),
            Route::IndustryIndex => "/industries/".to_string(),
            Route::Industry(slug) => format!("/industries/{slug}/"),
            Route::BrandIndex => "/brands/".to_string(),
            Route::Brand(slug) => format!("/brands/{slug}/"),
            Route::LocationIndex => "/locations/".to_string(),
            Route::Location(slug) => format!("/locations/{slug}/"),
            Route::ServiceLocation { location, service } => {
                format!("/locations/{location}/{service}/")
            }
            Route::Contact => "/contact/".to_string(),
            Route::Page(slug) => format!("/{slug}/"),
            Route::NotFound => "/404.html".to_string(),
        }
    }

    /// Output file path relative to the output directory.
    pub fn output_file(&self) -> String {
        match self {
            Route::NotFound => "404.html".to_string(),
            _ => format!("{}index.html", self.path().trim_start_matches('/')),
        }
    }

    /// Whether the route belongs in `sitemap.xml`.
    pub fn in_sitemap(&self) -> bool {
        !matches!(self, Route::NotFound)
    }

    /// Parse a site-absolute path into a route.
    ///
    /// Query strings and fragments are ignored, the trailing slash is
    /// optional and a final `index.html` is accepted. This only checks the
    /// shape of the path; whether the slug exists is up to the caller.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let rest = path.strip_prefix('/')?;
        let mut segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        if segments.last() == Some(&"index.html") {
            segments.pop();
        }
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["404.html"] => Route::NotFound,
            ["blog"] => Route::BlogIndex,
            ["blog", slug] => Route::BlogPost(slug.to_string()),
            ["guides"] => Route::GuideIndex,
            ["guides", slug] => Route::Guide(slug.to_string()),
            ["services"] => Route::ServiceIndex,
            ["services", slug] => Route::Service(slug.to_string()),
            ["industries"] => Route::IndustryIndex,
            ["industries", slug] => Route::Industry(slug.to_string()),
            ["brands"] => Route::BrandIndex,
            ["brands", slug] => Route::Brand(slug.to_string()),
            ["locations"] => Route::LocationIndex,
            ["locations", slug] => Route::Location(slug.to_string()),
            ["locations", location, service] => Route::ServiceLocation {
                location: location.to_string(),
                service: service.to_string(),
            },
            ["contact"] => Route::Contact,
            [slug] if !RESERVED_SEGMENTS.contains(slug) => Route::Page(slug.to_string()),
            _ => return None,
        };
        Some(route)
    }
}

/// Every route the catalog produces, in sitemap order.
pub fn all_routes(catalog: &Catalog) -> Vec<Route> {
    let mut routes = vec![Route::Home, Route::ServiceIndex];
    routes.extend(
        catalog
            .services
            .iter()
            .map(|s| Route::Service(s.slug.clone())),
    );
    routes.push(Route::IndustryIndex);
    routes.extend(
        catalog
            .industries
            .iter()
            .map(|i| Route::Industry(i.slug.clone())),
    );
    routes.push(Route::LocationIndex);
    for location in &catalog.locations {
        routes.push(Route::Location(location.slug.clone()));
        routes.extend(location.services.iter().map(|service| Route::ServiceLocation {
            location: location.slug.clone(),
            service: service.clone(),
        }));
    }
    routes.push(Route::BrandIndex);
    routes.extend(catalog.brands.iter().map(|b| Route::Brand(b.slug.clone())));
    routes.push(Route::BlogIndex);
    routes.extend(
        catalog
            .blog_posts
            .iter()
            .map(|p| Route::BlogPost(p.slug.clone())),
    );
    routes.push(Route::GuideIndex);
    routes.extend(catalog.guides.iter().map(|g| Route::Guide(g.slug.clone())));
    routes.push(Route::Contact);
    routes.extend(catalog.pages.iter().map(|p| Route::Page(p.slug.clone())));
    routes.push(Route::NotFound);
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;
    use crate::test_helpers::setup_fixtures;

    #[test]
    fn paths_and_output_files() {
        let cases = [
            (Route::Home, "/", "index.html"),
            (
                Route::BlogPost("x".into()),
                "/blog/x/",
                "blog/x/index.html",
            ),
            (
                Route::ServiceLocation {
                    location: "cherry-hill-nj".into(),
                    service: "access-control".into(),
                },
                "/locations/cherry-hill-nj/access-control/",
                "locations/cherry-hill-nj/access-control/index.html",
            ),
            (
                Route::Page("privacy-policy".into()),
                "/privacy-policy/",
                "privacy-policy/index.html",
            ),
            (Route::NotFound, "/404.html", "404.html"),
        ];
        for (route, path, file) in cases {
            assert_eq!(route.path(), path);
            assert_eq!(route.output_file(), file);
        }
    }

    #[test]
    fn parse_inverts_path() {
        let tmp = setup_fixtures();
        let catalog = content::load(tmp.path()).unwrap();
        for route in all_routes(&catalog) {
            assert_eq!(Route::parse(&route.path()), Some(route.clone()), "{route:?}");
        }
    }

    #[test]
    fn parse_tolerates_variants() {
        let expected = Some(Route::Guide("cctv".into()));
        assert_eq!(Route::parse("/guides/cctv"), expected);
        assert_eq!(Route::parse("/guides/cctv/index.html"), expected);
        assert_eq!(Route::parse("/guides/cctv/#pricing"), expected);
        assert_eq!(Route::parse("/guides/cctv/?utm_source=x"), expected);
    }

    #[test]
    fn parse_rejects_unknown_shapes() {
        assert_eq!(Route::parse("guides/cctv/"), None);
        assert_eq!(Route::parse("/blog/a/b/"), None);
        assert_eq!(Route::parse("/assets/"), None);
        assert_eq!(Route::parse("/contact/extra/"), None);
    }

    #[test]
    fn all_routes_has_no_duplicates() {
        let tmp = setup_fixtures();
        let catalog = content::load(tmp.path()).unwrap();
        let routes = all_routes(&catalog);
        let mut paths: Vec<String> = routes.iter().map(Route::path).collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }

    #[test]
    fn all_routes_includes_service_location_pages() {
        let tmp = setup_fixtures();
        let catalog = content::load(tmp.path()).unwrap();
        let routes = all_routes(&catalog);
        assert!(routes.contains(&Route::ServiceLocation {
            location: "cherry-hill-nj".into(),
            service: "access-control".into(),
        }));
        assert!(!routes.iter().any(|r| matches!(
            r,
            Route::ServiceLocation { location, .. } if location == "king-of-prussia-pa"
        )));
    }

    #[test]
    fn not_found_excluded_from_sitemap() {
        assert!(!Route::NotFound.in_sitemap());
        assert!(Route::Contact.in_sitemap());
    }
}
