//! Page metadata: `<title>`, meta description, canonical URL, Open Graph.
//!
//! Every page renderer builds a [`PageMeta`]; [`render_meta`] turns it into
//! `<head>` tags and [`check_meta`] validates it against the configured
//! length limits.

use crate::config::{SeoConfig, SiteConfig};
use crate::types::FeaturedImage;
use chrono::NaiveDate;
use maud::{Markup, html};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OgType {
    Website,
    Article,
}

impl OgType {
    fn as_str(self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageMeta {
    /// Page title without the company suffix.
    pub title: String,
    pub description: String,
    /// Route path, joined onto `site.base_url` for the canonical link.
    pub path: String,
    pub keywords: Vec<String>,
    pub image: Option<FeaturedImage>,
    pub og_type: OgType,
    pub published: Option<NaiveDate>,
    pub modified: Option<NaiveDate>,
    pub noindex: bool,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, description: impl Into<String>, path: String) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            path,
            keywords: Vec::new(),
            image: None,
            og_type: OgType::Website,
            published: None,
            modified: None,
            noindex: false,
        }
    }

    pub fn keywords(mut self, keywords: &[String]) -> Self {
        self.keywords = keywords.to_vec();
        self
    }

    pub fn image(mut self, image: Option<&FeaturedImage>) -> Self {
        self.image = image.cloned();
        self
    }

    pub fn article(mut self, published: NaiveDate, modified: NaiveDate) -> Self {
        self.og_type = OgType::Article;
        self.published = Some(published);
        self.modified = Some(modified);
        self
    }

    pub fn noindex(mut self) -> Self {
        self.noindex = true;
        self
    }

    /// The `<title>` text: `Title | Company` when that fits in
    /// `seo.title_max`, otherwise the bare title.
    pub fn document_title(&self, config: &SiteConfig) -> String {
        let company = &config.company.name;
        if self.title.is_empty() {
            return company.clone();
        }
        if self.title.contains(company.as_str()) {
            return self.title.clone();
        }
        let full = format!("{} | {}", self.title, company);
        if full.chars().count() <= config.seo.title_max {
            full
        } else {
            self.title.clone()
        }
    }
}

/// Shorten generated copy to `max` characters at a word boundary, adding `…`.
///
/// Only used for descriptions the generator composes itself; authored
/// descriptions are reported by [`check_meta`] instead of rewritten.
pub fn truncate_description(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for word in text.split_whitespace() {
        let candidate_len = out.chars().count() + word.chars().count() + 1;
        if candidate_len + 1 > max {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    let trimmed = out.trim_end_matches([',', '.', ';', ':']);
    format!("{trimmed}…")
}

/// `<head>` tags for a page. The caller emits stylesheets and scripts.
pub fn render_meta(page: &PageMeta, config: &SiteConfig) -> Markup {
    let title = page.document_title(config);
    let canonical = config.absolute_url(&page.path);
    let image_src = page
        .image
        .as_ref()
        .map(|i| i.src.as_str())
        .or(config.site.default_image.as_deref());
    let image_size = page.image.as_ref().and_then(|i| i.size);

    html! {
        title { (title) }
        meta name="description" content=(page.description);
        @if !page.keywords.is_empty() {
            meta name="keywords" content=(page.keywords.join(", "));
        }
        @if page.noindex {
            meta name="robots" content="noindex";
        } @else {
            link rel="canonical" href=(canonical);
        }
        meta property="og:type" content=(page.og_type.as_str());
        meta property="og:site_name" content=(config.company.name);
        meta property="og:title" content=(title);
        meta property="og:description" content=(page.description);
        meta property="og:url" content=(canonical);
        @if let Some(src) = image_src {
            meta property="og:image" content=(config.absolute_url(src));
            @if let Some((width, height)) = image_size {
                meta property="og:image:width" content=(width);
                meta property="og:image:height" content=(height);
            }
        }
        @if let Some(published) = page.published {
            meta property="article:published_time" content=(published.to_string());
        }
        @if let Some(modified) = page.modified {
            meta property="article:modified_time" content=(modified.to_string());
        }
        meta name="twitter:card" content=(if image_src.is_some() { "summary_large_image" } else { "summary" });
    }
}

/// A metadata problem found by [`check_meta`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaIssue {
    #[error("title is empty")]
    EmptyTitle,
    #[error("meta description is empty")]
    EmptyDescription,
    #[error("title is {len} characters (max {max})")]
    TitleTooLong { len: usize, max: usize },
    #[error("meta description is {len} characters (max {max})")]
    DescriptionTooLong { len: usize, max: usize },
}

impl MetaIssue {
    /// Empty fields break the page's listing; long ones are only truncated
    /// by search engines.
    pub fn is_error(&self) -> bool {
        matches!(self, MetaIssue::EmptyTitle | MetaIssue::EmptyDescription)
    }
}

pub fn check_meta(page: &PageMeta, seo: &SeoConfig) -> Vec<MetaIssue> {
    let mut issues = Vec::new();
    let title_len = page.title.trim().chars().count();
    let desc_len = page.description.trim().chars().count();

    if title_len == 0 {
        issues.push(MetaIssue::EmptyTitle);
    } else if title_len > seo.title_max {
        issues.push(MetaIssue::TitleTooLong {
            len: title_len,
            max: seo.title_max,
        });
    }
    if desc_len == 0 {
        issues.push(MetaIssue::EmptyDescription);
    } else if desc_len > seo.description_max {
        issues.push(MetaIssue::DescriptionTooLong {
            len: desc_len,
            max: seo.description_max,
        });
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.company.name = "Keystone".to_string();
        config.site.base_url = "https://www.keystone.example".to_string();
        config
    }

    #[test]
    fn document_title_adds_company_suffix() {
        let meta = PageMeta::new("Access Control", "d", "/services/access-control/".into());
        assert_eq!(meta.document_title(&config()), "Access Control | Keystone");
    }

    #[test]
    fn document_title_drops_suffix_when_too_long() {
        let title = "A".repeat(55);
        let meta = PageMeta::new(title.clone(), "d", "/".into());
        assert_eq!(meta.document_title(&config()), title);
    }

    #[test]
    fn document_title_no_double_company() {
        let meta = PageMeta::new("About Keystone", "d", "/about/".into());
        assert_eq!(meta.document_title(&config()), "About Keystone");
    }

    #[test]
    fn render_meta_canonical_and_og() {
        let meta = PageMeta::new("Blog", "Security news", "/blog/".into());
        let html = render_meta(&meta, &config()).into_string();
        assert!(html.contains(r#"<link rel="canonical" href="https://www.keystone.example/blog/">"#));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary">"#));
        assert!(!html.contains("robots"));
    }

    #[test]
    fn render_meta_article_with_image() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let image = FeaturedImage {
            src: "/assets/a.png".into(),
            size: Some((1200, 630)),
        };
        let meta = PageMeta::new("Post", "d", "/blog/post/".into())
            .image(Some(&image))
            .article(date, date);
        let html = render_meta(&meta, &config()).into_string();
        assert!(html.contains(r#"content="https://www.keystone.example/assets/a.png""#));
        assert!(html.contains(r#"<meta property="og:image:width" content="1200">"#));
        assert!(html.contains(r#"<meta property="article:published_time" content="2024-03-04">"#));
        assert!(html.contains("summary_large_image"));
    }

    #[test]
    fn render_meta_noindex_skips_canonical() {
        let meta = PageMeta::new("Not found", "d", "/404.html".into()).noindex();
        let html = render_meta(&meta, &config()).into_string();
        assert!(html.contains(r#"<meta name="robots" content="noindex">"#));
        assert!(!html.contains("canonical"));
    }

    #[test]
    fn render_meta_escapes_quotes() {
        let meta = PageMeta::new("Say \"hi\"", "d", "/".into());
        let html = render_meta(&meta, &config()).into_string();
        assert!(html.contains("Say &quot;hi&quot;"));
    }

    #[test]
    fn check_meta_flags_empty_and_long() {
        let seo = SeoConfig {
            title_max: 10,
            description_max: 20,
        };
        let empty = PageMeta::new("", "  ", "/".into());
        assert_eq!(
            check_meta(&empty, &seo),
            vec![MetaIssue::EmptyTitle, MetaIssue::EmptyDescription]
        );

        let long = PageMeta::new("Eleven chrs", "x".repeat(21), "/".into());
        let issues = check_meta(&long, &seo);
        assert_eq!(
            issues,
            vec![
                MetaIssue::TitleTooLong { len: 11, max: 10 },
                MetaIssue::DescriptionTooLong { len: 21, max: 20 },
            ]
        );
        assert!(issues.iter().all(|i| !i.is_error()));
    }

    #[test]
    fn check_meta_counts_characters_not_bytes() {
        let seo = SeoConfig {
            title_max: 5,
            description_max: 5,
        };
        let meta = PageMeta::new("Café!", "ñññññ", "/".into());
        assert!(check_meta(&meta, &seo).is_empty());
    }

    #[test]
    fn truncate_description_word_boundary() {
        let text = "Commercial video surveillance for businesses in Cherry Hill, NJ.";
        let short = truncate_description(text, 40);
        assert!(short.chars().count() <= 40, "{short}");
        assert!(short.ends_with('…'));
        assert!(short.starts_with("Commercial video surveillance"));
        assert_eq!(truncate_description("short", 40), "short");
    }
}
