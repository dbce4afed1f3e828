//! Content records.
//!
//! Every record is authored as a file under the content directory, parsed
//! once by [`crate::content::load`], and serialized into `catalog.json`
//! between the load and generate stages. Fields marked "set by the loader"
//! are derived from the file name or filesystem and ignored if authored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A blog post: `blog/<slug>.md` with TOML front matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlogPost {
    #[serde(default)]
    pub slug: String,
    pub title: String,
    /// One or two sentences; listing cards and the meta description.
    pub excerpt: String,
    pub author: String,
    #[serde(deserialize_with = "content_date::deserialize")]
    pub published: NaiveDate,
    #[serde(
        default,
        deserialize_with = "content_date::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<FeaturedImage>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Markdown body (set by the loader).
    #[serde(default)]
    pub body: String,
}

impl BlogPost {
    /// Estimated reading time at 200 words per minute, at least one minute.
    pub fn reading_minutes(&self) -> usize {
        reading_minutes(&self.body)
    }

    /// Date of the last change: `updated` if set, otherwise `published`.
    pub fn modified(&self) -> NaiveDate {
        self.updated.unwrap_or(self.published)
    }
}

/// A long-form buyer's guide made of titled sections: `guides/<slug>.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Guide {
    #[serde(default)]
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    #[serde(deserialize_with = "content_date::deserialize")]
    pub published: NaiveDate,
    #[serde(
        default,
        deserialize_with = "content_date::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<FeaturedImage>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub sections: Vec<GuideSection>,
}

impl Guide {
    pub fn reading_minutes(&self) -> usize {
        let text: String = self
            .sections
            .iter()
            .map(|s| s.body.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        reading_minutes(&text)
    }

    pub fn modified(&self) -> NaiveDate {
        self.updated.unwrap_or(self.published)
    }

    /// Anchor ids for the in-page table of contents, one per section.
    ///
    /// Ids are slugs of the section titles, unique within the guide: a
    /// repeated slug gets a `-2`, `-3`, ... suffix and a title with nothing
    /// to slug falls back to `section-<n>`.
    pub fn section_anchors(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut anchors = Vec::with_capacity(self.sections.len());
        for (i, section) in self.sections.iter().enumerate() {
            let mut base = crate::naming::slugify(&section.title);
            if base.is_empty() {
                base = format!("section-{}", i + 1);
            }
            let mut anchor = base.clone();
            let mut n = 2;
            while !seen.insert(anchor.clone()) {
                anchor = format!("{base}-{n}");
                n += 1;
            }
            anchors.push(anchor);
        }
        anchors
    }
}

fn reading_minutes(text: &str) -> usize {
    text.split_whitespace().count().div_ceil(200).max(1)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuideSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// Markdown content block.
    pub body: String,
}


/// Icon shown next to a guide section heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Shield,
    Camera,
    Lock,
    Alarm,
    Fire,
    Network,
    Checklist,
    Dollar,
    Wrench,
}

impl Icon {
    /// Glyph rendered inline; keeps the site free of an icon font.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Shield => "\u{1F6E1}",
            Icon::Camera => "\u{1F4F7}",
            Icon::Lock => "\u{1F512}",
            Icon::Alarm => "\u{1F6A8}",
            Icon::Fire => "\u{1F525}",
            Icon::Network => "\u{1F310}",
            Icon::Checklist => "\u{2705}",
            Icon::Dollar => "\u{1F4B2}",
            Icon::Wrench => "\u{1F527}",
        }
    }
}

/// A featured image reference. Authored as a plain path string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FeaturedImageRepr", into = "FeaturedImageRepr")]
pub struct FeaturedImage {
    /// Site-absolute path (`/assets/blog/cannabis.jpg`) or external URL.
    pub src: String,
    /// Pixel dimensions, read from the asset file when it exists (set by the loader).
    pub size: Option<(u32, u32)>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FeaturedImageRepr {
    Path(String),
    Sized { src: String, width: u32, height: u32 },
}

impl From<FeaturedImageRepr> for FeaturedImage {
    fn from(repr: FeaturedImageRepr) -> Self {
        match repr {
            FeaturedImageRepr::Path(src) => Self { src, size: None },
            FeaturedImageRepr::Sized { src, width, height } => Self {
                src,
                size: Some((width, height)),
            },
        }
    }
}

impl From<FeaturedImage> for FeaturedImageRepr {
    fn from(image: FeaturedImage) -> Self {
        match image.size {
            Some((width, height)) => Self::Sized {
                src: image.src,
                width,
                height,
            },
            None => Self::Path(image.src),
        }
    }
}

/// Service line, used to group the services dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    VideoSurveillance,
    AccessControl,
    IntrusionDetection,
    FireAndLifeSafety,
    Networking,
    Monitoring,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::VideoSurveillance,
        ServiceCategory::AccessControl,
        ServiceCategory::IntrusionDetection,
        ServiceCategory::FireAndLifeSafety,
        ServiceCategory::Networking,
        ServiceCategory::Monitoring,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::VideoSurveillance => "Video Surveillance",
            ServiceCategory::AccessControl => "Access Control",
            ServiceCategory::IntrusionDetection => "Intrusion Detection",
            ServiceCategory::FireAndLifeSafety => "Fire & Life Safety",
            ServiceCategory::Networking => "Networking & Cabling",
            ServiceCategory::Monitoring => "Monitoring",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TechnicalDetail {
    pub label: String,
    pub value: String,
}

/// A service offering: `services/NNN-<slug>.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    #[serde(default)]
    pub slug: String,
    pub name: String,
    pub category: ServiceCategory,
    /// Meta description and listing card copy.
    pub summary: String,
    /// Intro paragraphs (markdown).
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub technical_details: Vec<TechnicalDetail>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Set by the loader from the file's `NNN-` prefix.
    #[serde(default = "unordered")]
    pub sort_key: u32,
    #[serde(default)]
    pub in_nav: bool,
}

/// A service-area town: one `[[location]]` entry of `locations.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    /// Defaults to `slugify("<name> <state>")`.
    #[serde(default)]
    pub slug: String,
    pub name: String,
    /// Two-letter state code.
    pub state: String,
    pub county: String,
    pub zip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Service slugs that get a `/locations/<slug>/<service>/` landing page.
    #[serde(default)]
    pub services: Vec<String>,
}

impl Location {
    /// `Cherry Hill, NJ`
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.state)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrandProduct {
    pub name: String,
    pub description: String,
}

/// A manufacturer the integrator is certified on: `brands/NNN-<slug>.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Brand {
    #[serde(default)]
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub products: Vec<BrandProduct>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default = "unordered")]
    pub sort_key: u32,
    #[serde(default)]
    pub in_nav: bool,
}

/// An industry vertical: `industries/NNN-<slug>.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Industry {
    #[serde(default)]
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub description: String,
    #[serde(default)]
    pub challenges: Vec<String>,
    /// Service slugs linked from the industry page.
    #[serde(default)]
    pub related_services: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default = "unordered")]
    pub sort_key: u32,
    #[serde(default)]
    pub in_nav: bool,
}

/// A standalone page: `pages/<slug>.md` with TOML front matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Page {
    #[serde(default)]
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Legal pages (privacy, terms) are linked from the footer.
    #[serde(default)]
    pub legal: bool,
    #[serde(
        default,
        deserialize_with = "content_date::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<NaiveDate>,
    #[serde(default)]
    pub body: String,
}

fn unordered() -> u32 {
    u32::MAX
}

/// Dates are accepted as native TOML dates (`published = 2024-05-14`) or as
/// `YYYY-MM-DD` strings, the form they take in `catalog.json`.
mod content_date {
    use chrono::NaiveDate;
    use serde::Deserialize;
    use serde::de::{Deserializer, Error};
    use toml::value::Datetime;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(NaiveDate),
        Toml(Datetime),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        match Repr::deserialize(deserializer) {
            Ok(Repr::Text(date)) => Ok(date),
            Ok(Repr::Toml(datetime)) => {
                let date = datetime.date.ok_or_else(|| {
                    D::Error::custom(format!("expected a date, found time {datetime}"))
                })?;
                NaiveDate::from_ymd_opt(date.year.into(), date.month.into(), date.day.into())
                    .ok_or_else(|| D::Error::custom(format!("invalid date {datetime}")))
            }
            Err(_) => Err(D::Error::custom(
                "expected a date (2024-05-14 or \"2024-05-14\")",
            )),
        }
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        deserialize(deserializer).map(Some)
    }
}
