//! Slugs and the `NNN-name` file naming convention.
//!
//! Services, industries and brands are ordered in navigation by a numeric
//! file prefix: `010-access-control.toml` sorts before
//! `020-video-surveillance.toml`. Files without a prefix still produce pages
//! but are left out of the navbar dropdowns.
//!
//! The part after the prefix is the record's slug unless the record sets one
//! explicitly.

/// Result of parsing a file stem like `020-video-surveillance`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-video-surveillance`)
    pub number: Option<u32>,
    /// Name after `NNN-`. For unprefixed entries, the full input.
    pub name: String,
}

impl ParsedName {
    /// Sort key: prefixed entries by number, unprefixed ones last.
    pub fn sort_key(&self) -> u32 {
        self.number.unwrap_or(u32::MAX)
    }

    pub fn in_nav(&self) -> bool {
        self.number.is_some()
    }
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"020-video-surveillance"` → number=Some(20), name="video-surveillance"
/// - `"access-control"` → number=None, name="access-control"
/// - `"2024-recap"` → number=Some(2024), name="recap"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-')
        && !prefix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_digit())
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(num),
            name: rest.to_string(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
    }
}

/// Whether `slug` is lowercase kebab-case: `[a-z0-9]+(-[a-z0-9]+)*`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Turn a display name into a slug.
///
/// Lowercases ASCII letters, maps every other character to a dash, collapses
/// runs of dashes and trims them from both ends.
///
/// - `"Cherry Hill NJ"` → `"cherry-hill-nj"`
/// - `"Fire & Life Safety"` → `"fire-life-safety"`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_entry() {
        let p = parse_entry_name("020-video-surveillance");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.name, "video-surveillance");
        assert!(p.in_nav());
        assert_eq!(p.sort_key(), 20);
    }

    #[test]
    fn unnumbered_entry() {
        let p = parse_entry_name("access-control");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "access-control");
        assert!(!p.in_nav());
        assert_eq!(p.sort_key(), u32::MAX);
    }

    #[test]
    fn zero_prefix() {
        let p = parse_entry_name("000-monitoring");
        assert_eq!(p.number, Some(0));
        assert_eq!(p.name, "monitoring");
    }

    #[test]
    fn number_without_dash_is_not_a_prefix() {
        let p = parse_entry_name("911");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "911");
    }

    #[test]
    fn signed_prefix_rejected() {
        let p = parse_entry_name("+10-alarm");
        assert_eq!(p.number, None);
    }

    #[test]
    fn valid_slugs() {
        assert!(is_valid_slug("cannabis-business-security-requirements-nj-pa"));
        assert!(is_valid_slug("a1"));
    }

    #[test]
    fn invalid_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Access-Control"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("under_score"));
    }

    #[test]
    fn slugify_location_name() {
        assert_eq!(slugify("Cherry Hill NJ"), "cherry-hill-nj");
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Fire & Life Safety"), "fire-life-safety");
        assert_eq!(slugify("  --King of Prussia, PA--  "), "king-of-prussia-pa");
    }

    #[test]
    fn slugify_output_is_valid() {
        for name in ["Mount Laurel NJ", "St. Davids PA", "Route 1 Corridor"] {
            assert!(is_valid_slug(&slugify(name)), "{name}");
        }
    }
}
