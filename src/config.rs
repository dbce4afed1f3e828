//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root; every value has a stock default, so a config file only
//! needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! assets_dir = "assets"            # Copied to dist/assets/
//!
//! [company]
//! name = "Example Security Integrators"
//! tagline = "Commercial security systems, designed and installed"
//! phone = "(555) 010-0100"
//! email = "info@example.com"
//! service_area = ["NJ", "PA"]
//!
//! [company.address]
//! street = "100 Main Street"
//! city = "Springfield"
//! region = "NJ"
//! postal_code = "07081"
//! country = "US"
//!
//! [site]
//! base_url = "https://www.example.com"
//! language = "en"
//!
//! [integrations]
//! form_url = "https://forms.example.net/f/abc"   # Lead form (opaque)
//! maps_embed_url = "https://maps.example.net/embed?q=..."
//! analytics_script = "https://analytics.example.net/script.js"
//!
//! [seo]
//! title_max = 60
//! description_max = 160
//!
//! [colors.light]
//! background = "#ffffff"
//! accent = "#b91c1c"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory (relative to the content root) copied to `dist/assets/`.
    pub assets_dir: String,
    /// Business identity: name, phone, address. Feeds the header, footer,
    /// contact CTAs and the Organization schema.
    pub company: CompanyConfig,
    /// Public URL and document language.
    pub site: SiteSettings,
    /// Opaque third-party endpoints (lead form, map embed, analytics).
    pub integrations: IntegrationsConfig,
    /// Length limits enforced by `check`.
    pub seo: SeoConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            company: CompanyConfig::default(),
            site: SiteSettings::default(),
            integrations: IntegrationsConfig::default(),
            seo: SeoConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.company.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company.name must not be empty".into(),
            ));
        }
        if self.company.phone.chars().filter(char::is_ascii_digit).count() < 7 {
            return Err(ConfigError::Validation(
                "company.phone must contain at least 7 digits".into(),
            ));
        }
        if !is_http_url(&self.site.base_url) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if self.seo.title_max == 0 || self.seo.description_max == 0 {
            return Err(ConfigError::Validation(
                "seo.title_max and seo.description_max must be non-zero".into(),
            ));
        }
        for (key, value) in [
            ("integrations.form_url", &self.integrations.form_url),
            ("integrations.maps_embed_url", &self.integrations.maps_embed_url),
            ("integrations.analytics_script", &self.integrations.analytics_script),
        ] {
            if let Some(url) = value
                && !is_http_url(url)
            {
                return Err(ConfigError::Validation(format!(
                    "{key} must start with http:// or https://"
                )));
            }
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.site.base_url.trim_end_matches('/')
    }

    /// Join a site-absolute path (`/blog/`) onto the base URL.
    pub fn absolute_url(&self, path: &str) -> String {
        if is_http_url(path) {
            return path.to_string();
        }
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("https://") || s.starts_with("http://")
}

/// Business identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanyConfig {
    pub name: String,
    /// Registered name for the footer copyright line. Falls back to `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    pub tagline: String,
    /// Display form of the phone number, e.g. `(555) 010-0100`.
    pub phone: String,
    pub email: String,
    /// Free-form opening hours line shown in the footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    /// States or regions served, listed in the Organization schema.
    pub service_area: Vec<String>,
    pub address: AddressConfig,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "Example Security Integrators".to_string(),
            legal_name: None,
            tagline: "Commercial security systems, designed and installed".to_string(),
            phone: "(555) 010-0100".to_string(),
            email: "info@example.com".to_string(),
            hours: None,
            service_area: Vec::new(),
            address: AddressConfig::default(),
        }
    }
}

impl CompanyConfig {
    /// `tel:` link target: digits only, with a leading `+` kept if present.
    pub fn phone_href(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }

    pub fn mailto_href(&self) -> String {
        format!("mailto:{}", self.email)
    }

    pub fn legal_name(&self) -> &str {
        self.legal_name.as_deref().unwrap_or(&self.name)
    }
}

/// Postal address, rendered in the footer and as a schema.org `PostalAddress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AddressConfig {
    pub street: String,
    pub city: String,
    /// State or province code.
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            street: "100 Main Street".to_string(),
            city: "Springfield".to_string(),
            region: "NJ".to_string(),
            postal_code: "07081".to_string(),
            country: "US".to_string(),
        }
    }
}

impl AddressConfig {
    /// Single-line form: `100 Main Street, Springfield, NJ 07081`.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.region, self.postal_code
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Public origin used for canonical URLs, the sitemap and JSON-LD ids.
    pub base_url: String,
    /// Value of `<html lang>`.
    pub language: String,
    /// Site-absolute path of the Open Graph image used when a page has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_image: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.example.com".to_string(),
            language: "en".to_string(),
            default_image: None,
        }
    }
}

/// Third-party endpoints. All optional; sections that need them are
/// omitted when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_embed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_script: Option<String>,
}

/// Length limits for `<title>` and meta descriptions, in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeoConfig {
    pub title_max: usize,
    pub description_max: usize,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            title_max: 60,
            description_max: 160,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Background of alternating sections and cards.
    pub surface: String,
    pub text: String,
    /// Secondary text (breadcrumbs, dates, captions).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Brand color for CTA buttons and highlights.
    pub accent: String,
    /// Text drawn on top of `accent`.
    pub accent_text: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f4f5f7".to_string(),
            text: "#111827".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#e5e7eb".to_string(),
            link: "#1d4ed8".to_string(),
            link_hover: "#1e3a8a".to_string(),
            accent: "#b91c1c".to_string(),
            accent_text: "#ffffff".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b0f19".to_string(),
            surface: "#151b2b".to_string(),
            text: "#f3f4f6".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#273044".to_string(),
            link: "#93c5fd".to_string(),
            link_hover: "#dbeafe".to_string(),
            accent: "#ef4444".to_string(),
            accent_text: "#ffffff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# watchpost configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Place this file at the root of the content directory.
# Unknown keys will cause an error.

# Directory (relative to the content root) copied to dist/assets/.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Company identity: header, footer, contact CTAs, Organization schema
# ---------------------------------------------------------------------------
[company]
name = "Example Security Integrators"
# legal_name = "Example Security Integrators LLC"
tagline = "Commercial security systems, designed and installed"
phone = "(555) 010-0100"
email = "info@example.com"
# hours = "Mon-Fri 8am-6pm, 24/7 monitoring"
# States or regions served (schema.org areaServed).
service_area = []

[company.address]
street = "100 Main Street"
city = "Springfield"
region = "NJ"
postal_code = "07081"
country = "US"

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Public origin for canonical URLs, sitemap.xml and JSON-LD.
base_url = "https://www.example.com"
language = "en"
# Open Graph image for pages without a featured image.
# default_image = "/assets/og-default.jpg"

# ---------------------------------------------------------------------------
# Third-party endpoints (passed through as-is)
# ---------------------------------------------------------------------------
[integrations]
# form_url = "https://forms.example.net/f/quote"
# maps_embed_url = "https://maps.example.net/embed?q=Springfield+NJ"
# analytics_script = "https://analytics.example.net/script.js"

# ---------------------------------------------------------------------------
# SEO limits checked by `watchpost check`
# ---------------------------------------------------------------------------
[seo]
title_max = 60
description_max = 160

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f4f5f7"
text = "#111827"
text_muted = "#6b7280"
border = "#e5e7eb"
link = "#1d4ed8"
link_hover = "#1e3a8a"
accent = "#b91c1c"        # CTA buttons
accent_text = "#ffffff"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b0f19"
surface = "#151b2b"
text = "#f3f4f6"
text_muted = "#9ca3af"
border = "#273044"
link = "#93c5fd"
link_hover = "#dbeafe"
accent = "#ef4444"
accent_text = "#ffffff"
"##
}

fn scheme_vars(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("bg", &scheme.background),
        ("surface", &scheme.surface),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("border", &scheme.border),
        ("link", &scheme.link),
        ("link-hover", &scheme.link_hover),
        ("accent", &scheme.accent),
        ("accent-text", &scheme.accent_text),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{light}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{dark}\n    }}\n}}",
        light = scheme_vars(&colors.light, "    "),
        dark = scheme_vars(&colors.dark, "        "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_validates() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[company]
name = "Keystone Integrated Security"

[colors.light]
accent = "#0f766e"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.company.name, "Keystone Integrated Security");
        assert_eq!(config.colors.light.accent, "#0f766e");
        // Defaults preserved
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.seo.title_max, 60);
        assert_eq!(config.company.address.country, "US");
    }

    #[test]
    fn phone_href_strips_formatting() {
        let mut company = CompanyConfig::default();
        company.phone = "+1 (609) 555-0142".to_string();
        assert_eq!(company.phone_href(), "tel:+16095550142");
    }

    #[test]
    fn legal_name_falls_back_to_name() {
        let mut company = CompanyConfig::default();
        assert_eq!(company.legal_name(), "Example Security Integrators");
        company.legal_name = Some("Example Security Integrators LLC".to_string());
        assert_eq!(company.legal_name(), "Example Security Integrators LLC");
    }

    #[test]
    fn absolute_url_joins_without_double_slash() {
        let mut config = SiteConfig::default();
        config.site.base_url = "https://www.example.com/".to_string();
        assert_eq!(
            config.absolute_url("/blog/"),
            "https://www.example.com/blog/"
        );
        assert_eq!(
            config.absolute_url("https://cdn.example.net/x.jpg"),
            "https://cdn.example.net/x.jpg"
        );
    }

    #[test]
    fn address_one_line() {
        let address = AddressConfig::default();
        assert_eq!(address.one_line(), "100 Main Street, Springfield, NJ 07081");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.company.name, "Example Security Integrators");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[company]
phone = "(609) 555-0142"

[integrations]
form_url = "https://forms.example.net/f/quote"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.company.phone, "(609) 555-0142");
        assert_eq!(
            config.integrations.form_url.as_deref(),
            Some("https://forms.example.net/f/quote")
        );
        assert_eq!(config.company.email, "info@example.com");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
base_url = "www.example.com"
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_empty_company_name() {
        let mut config = SiteConfig::default();
        config.company.name = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("company.name"));
    }

    #[test]
    fn validate_short_phone() {
        let mut config = SiteConfig::default();
        config.company.phone = "555".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_seo_limits() {
        let mut config = SiteConfig::default();
        config.seo.description_max = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_integration_urls() {
        let mut config = SiteConfig::default();
        config.integrations.maps_embed_url = Some("maps.example.net".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("integrations.maps_embed_url"));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[company]
nmae = "Typo"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[seoo]
title_max = 70
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[seo]
title_max = 60
description_max = 160
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[seo]
title_max = 70
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let seo = merged.get("seo").unwrap();
        assert_eq!(seo.get("title_max").unwrap().as_integer(), Some(70));
        assert_eq!(seo.get("description_max").unwrap().as_integer(), Some(160));
    }

    #[test]
    fn merge_toml_array_replaced_not_appended() {
        let base: toml::Value = toml::from_str(r#"service_area = ["NJ"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"service_area = ["PA", "DE"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("service_area").unwrap().as_array().unwrap().len(), 2);
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str(
            r#"
[company.address]
city = "Trenton"
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.company.address.city, "Trenton");
        assert_eq!(config.company.address.region, "NJ");
    }

    // =========================================================================
    // stock_config_toml / CSS tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.company.name, defaults.company.name);
        assert_eq!(config.site.base_url, defaults.site.base_url);
        assert_eq!(config.seo.description_max, defaults.seo.description_max);
        assert_eq!(config.colors.dark.accent, defaults.colors.dark.accent);
        assert!(config.integrations.form_url.is_none());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for section in ["company", "site", "integrations", "seo", "colors"] {
            assert!(val.get(section).is_some(), "missing [{section}]");
        }
    }

    #[test]
    fn generate_css_includes_both_schemes() {
        let mut colors = ColorConfig::default();
        colors.light.accent = "#123456".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-accent: #123456;"));
        assert!(css.contains("--color-accent: #ef4444;"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
        assert!(css.contains("--color-text-muted:"));
    }
}
