//! Static assets: the embedded stylesheet and script, and the content
//! `assets/` directory.
//!
//! The stylesheet is written under a content-hashed name
//! (`assets/style.<hash>.css`) so it can be served with a long cache
//! lifetime. Its contents are the color variables from config followed by
//! `static/style.css`.

use crate::config::{self, SiteConfig};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

const CSS_STATIC: &str = include_str!("../static/style.css");
pub const SITE_JS: &str = include_str!("../static/site.js");

/// Hex digits of the content hash kept in fingerprinted file names.
const FINGERPRINT_LEN: usize = 10;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// The site stylesheet and the path it is served from.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Site-absolute path, e.g. `/assets/style.3f9a01c2de.css`.
    pub href: String,
    pub css: String,
}

impl Stylesheet {
    pub fn build(config: &SiteConfig) -> Self {
        let css = format!(
            "{}\n\n{}",
            config::generate_color_css(&config.colors),
            CSS_STATIC
        );
        let href = format!("/assets/style.{}.css", fingerprint(css.as_bytes()));
        Self { href, css }
    }

    /// Output path relative to the output directory.
    pub fn output_file(&self) -> &str {
        self.href.trim_start_matches('/')
    }
}

/// Short SHA-256 hex prefix of `bytes`.
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let hex = format!("{:x}", digest);
    hex[..FINGERPRINT_LEN].to_string()
}

/// Site-absolute paths (`/assets/...`) of every file under `dir`.
/// A missing directory has no assets.
pub fn list_assets(dir: &Path) -> Result<Vec<String>, AssetError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        paths.push(format!("/assets/{rel}"));
    }
    Ok(paths)
}

/// Copy the content assets directory into `dst`, returning the file count.
pub fn copy_assets(src: &Path, dst: &Path) -> Result<usize, AssetError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            debug!(file = %rel.display(), "copied asset");
            copied += 1;
        }
    }
    Ok(copied)
}
