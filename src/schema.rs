//! schema.org structured data.
//!
//! Builders return `serde_json::Value` documents; [`script`] embeds one in a
//! `<script type="application/ld+json">` tag. Every page carries the
//! [`organization`] document, other builders are added per page type.

use crate::config::SiteConfig;
use crate::types::{Faq, FeaturedImage, Location, Service};
use chrono::NaiveDate;
use maud::{Markup, PreEscaped, html};
use serde_json::{Value, json};
use thiserror::Error;

const CONTEXT: &str = "https://schema.org";

/// One step of a breadcrumb trail. Shared with the visible breadcrumb nav.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

impl Crumb {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

fn organization_id(config: &SiteConfig) -> String {
    format!("{}/#organization", config.base_url())
}

/// The business as a `LocalBusiness` with address and service area.
pub fn organization(config: &SiteConfig) -> Value {
    let company = &config.company;
    let address = &company.address;
    let mut org = json!({
        "@context": CONTEXT,
        "@type": "LocalBusiness",
        "@id": organization_id(config),
        "name": company.name,
        "legalName": company.legal_name(),
        "description": company.tagline,
        "url": config.absolute_url("/"),
        "telephone": company.phone,
        "email": company.email,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": address.street,
            "addressLocality": address.city,
            "addressRegion": address.region,
            "postalCode": address.postal_code,
            "addressCountry": address.country,
        },
        "areaServed": company
            .service_area
            .iter()
            .map(|area| json!({ "@type": "State", "name": area }))
            .collect::<Vec<_>>(),
    });
    if let Some(hours) = &company.hours {
        org["openingHours"] = json!(hours);
    }
    if let Some(image) = &config.site.default_image {
        org["image"] = json!(config.absolute_url(image));
    }
    org
}

pub fn website(config: &SiteConfig) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "WebSite",
        "name": config.company.name,
        "url": config.absolute_url("/"),
        "inLanguage": config.site.language,
        "publisher": { "@id": organization_id(config) },
    })
}

pub fn breadcrumb_list(config: &SiteConfig, crumbs: &[Crumb]) -> Value {
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": crumb.name,
                "item": config.absolute_url(&crumb.path),
            })
        })
        .collect();
    json!({
        "@context": CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// `FAQPage` for pages rendering an FAQ accordion. `None` without questions.
pub fn faq_page(faqs: &[Faq]) -> Option<Value> {
    if faqs.is_empty() {
        return None;
    }
    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": { "@type": "Answer", "text": faq.answer },
            })
        })
        .collect();
    Some(json!({
        "@context": CONTEXT,
        "@type": "FAQPage",
        "mainEntity": questions,
    }))
}

/// Fields shared by blog posts and guides.
pub struct ArticleInfo<'a> {
    /// `BlogPosting` or `Article`.
    pub kind: &'static str,
    pub headline: &'a str,
    pub description: &'a str,
    pub path: &'a str,
    pub author: &'a str,
    pub published: NaiveDate,
    pub modified: NaiveDate,
    pub image: Option<&'a FeaturedImage>,
    pub keywords: &'a [String],
}

pub fn article(config: &SiteConfig, info: &ArticleInfo<'_>) -> Value {
    let url = config.absolute_url(info.path);
    let mut doc = json!({
        "@context": CONTEXT,
        "@type": info.kind,
        "headline": info.headline,
        "description": info.description,
        "url": url,
        "mainEntityOfPage": { "@type": "WebPage", "@id": url },
        "author": { "@type": "Person", "name": info.author },
        "publisher": { "@id": organization_id(config) },
        "datePublished": info.published.to_string(),
        "dateModified": info.modified.to_string(),
    });
    if let Some(image) = info.image {
        let mut obj = json!({
            "@type": "ImageObject",
            "url": config.absolute_url(&image.src),
        });
        if let Some((width, height)) = image.size {
            obj["width"] = json!(width);
            obj["height"] = json!(height);
        }
        doc["image"] = obj;
    }
    if !info.keywords.is_empty() {
        doc["keywords"] = json!(info.keywords.join(", "));
    }
    doc
}

/// A `Service` offered by the business, optionally scoped to one town.
pub fn service(config: &SiteConfig, service: &Service, path: &str, area: Option<&Location>) -> Value {
    let area_served = match area {
        Some(location) => json!({
            "@type": "City",
            "name": location.name,
            "containedInPlace": { "@type": "State", "name": location.state },
        }),
        None => json!(
            config
                .company
                .service_area
                .iter()
                .map(|area| json!({ "@type": "State", "name": area }))
                .collect::<Vec<_>>()
        ),
    };
    json!({
        "@context": CONTEXT,
        "@type": "Service",
        "name": service.name,
        "serviceType": service.category.label(),
        "description": service.summary,
        "url": config.absolute_url(path),
        "provider": { "@id": organization_id(config) },
        "areaServed": area_served,
    })
}

/// Embed a document in a JSON-LD script tag.
///
/// `</` is escaped so content can never close the script element early.
pub fn script(doc: &Value) -> Markup {
    let json = doc.to_string().replace("</", "<\\/");
    html! {
        script type="application/ld+json" { (PreEscaped(json)) }
    }
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("missing @context")]
    MissingContext,
    #[error("missing @type")]
    MissingType,
}

/// Check that a JSON-LD block parses and names its `@context` and `@type`.
/// A top-level array is checked item by item.
pub fn validate_json_ld(text: &str) -> Result<(), SchemaError> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(items) => items.iter().try_for_each(validate_document),
        other => validate_document(&other),
    }
}

fn validate_document(value: &Value) -> Result<(), SchemaError> {
    let obj = value.as_object().ok_or(SchemaError::NotAnObject)?;
    if !obj.get("@context").is_some_and(Value::is_string) {
        return Err(SchemaError::MissingContext);
    }
    if !obj.get("@type").is_some_and(Value::is_string) {
        return Err(SchemaError::MissingType);
    }
    Ok(())
}

/// The bodies of every JSON-LD script tag in a rendered page.
pub fn extract_json_ld(html: &str) -> Vec<&str> {
    const OPEN: &str = r#"<script type="application/ld+json">"#;
    let mut blocks = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find(OPEN) {
        let body = &rest[start + OPEN.len()..];
        let Some(end) = body.find("</script>") else {
            break;
        };
        blocks.push(&body[..end]);
        rest = &body[end..];
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ServiceCategory;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.company.name = "Keystone".into();
        config.company.phone = "(609) 555-0142".into();
        config.company.service_area = vec!["NJ".into(), "PA".into()];
        config.site.base_url = "https://www.keystone.example/".into();
        config
    }

    #[test]
    fn organization_is_local_business() {
        let org = organization(&config());
        assert_eq!(org["@type"], "LocalBusiness");
        assert_eq!(org["@id"], "https://www.keystone.example/#organization");
        assert_eq!(org["telephone"], "(609) 555-0142");
        assert_eq!(org["address"]["@type"], "PostalAddress");
        assert_eq!(org["areaServed"][1]["name"], "PA");
        assert!(org.get("openingHours").is_none());
    }

    #[test]
    fn breadcrumb_positions_start_at_one() {
        let crumbs = [Crumb::new("Home", "/"), Crumb::new("Blog", "/blog/")];
        let doc = breadcrumb_list(&config(), &crumbs);
        let items = doc["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[1]["item"], "https://www.keystone.example/blog/");
    }

    #[test]
    fn faq_page_empty_is_none() {
        assert!(faq_page(&[]).is_none());
        let faqs = [Faq {
            question: "Do you monitor 24/7?".into(),
            answer: "Yes.".into(),
        }];
        let doc = faq_page(&faqs).unwrap();
        assert_eq!(doc["mainEntity"][0]["acceptedAnswer"]["text"], "Yes.");
    }

    #[test]
    fn article_includes_image_size() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let image = FeaturedImage {
            src: "/assets/x.png".into(),
            size: Some((64, 36)),
        };
        let doc = article(
            &config(),
            &ArticleInfo {
                kind: "BlogPosting",
                headline: "H",
                description: "D",
                path: "/blog/h/",
                author: "Dana",
                published: date,
                modified: date,
                image: Some(&image),
                keywords: &[],
            },
        );
        assert_eq!(doc["@type"], "BlogPosting");
        assert_eq!(doc["datePublished"], "2024-05-01");
        assert_eq!(doc["image"]["width"], 64);
        assert!(doc.get("keywords").is_none());
    }

    #[test]
    fn service_scoped_to_city() {
        let svc = Service {
            slug: "access-control".into(),
            name: "Access Control".into(),
            category: ServiceCategory::AccessControl,
            summary: "s".into(),
            description: "d".into(),
            benefits: vec![],
            faqs: vec![],
            technical_details: vec![],
            keywords: vec![],
            sort_key: 10,
            in_nav: true,
        };
        let loc = Location {
            slug: "cherry-hill-nj".into(),
            name: "Cherry Hill".into(),
            state: "NJ".into(),
            county: "Camden".into(),
            zip: "08002".into(),
            description: None,
            services: vec![],
        };
        let doc = service(&config(), &svc, "/x/", Some(&loc));
        assert_eq!(doc["areaServed"]["@type"], "City");
        assert_eq!(doc["areaServed"]["name"], "Cherry Hill");
        let statewide = service(&config(), &svc, "/x/", None);
        assert_eq!(statewide["areaServed"][0]["name"], "NJ");
    }

    #[test]
    fn script_escapes_closing_tags() {
        let doc = json!({ "@context": CONTEXT, "@type": "Thing", "name": "</script><b>" });
        let html = script(&doc).into_string();
        assert_eq!(html.matches("</script>").count(), 1);
        let body = extract_json_ld(&html)[0];
        validate_json_ld(body).unwrap();
        let back: Value = serde_json::from_str(body).unwrap();
        assert_eq!(back["name"], "</script><b>");
    }

    #[test]
    fn validate_rejects_incomplete_documents() {
        assert!(matches!(
            validate_json_ld(r#"{"@type": "Thing"}"#),
            Err(SchemaError::MissingContext)
        ));
        assert!(matches!(
            validate_json_ld(r#"{"@context": "https://schema.org"}"#),
            Err(SchemaError::MissingType)
        ));
        assert!(matches!(validate_json_ld("{"), Err(SchemaError::Json(_))));
        assert!(matches!(validate_json_ld("3"), Err(SchemaError::NotAnObject)));
        validate_json_ld(r#"[{"@context": "c", "@type": "A"}, {"@context": "c", "@type": "B"}]"#)
            .unwrap();
    }

    #[test]
    fn extract_finds_every_block() {
        let html = r#"<head><script type="application/ld+json">{"a":1}</script><script src="x.js"></script><script type="application/ld+json">{"b":2}</script></head>"#;
        assert_eq!(extract_json_ld(html), vec![r#"{"a":1}"#, r#"{"b":2}"#]);
    }
}
