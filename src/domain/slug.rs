//! Content slugs
//!
//! Slug format:
//! - One or more `/`-separated segments (e.g. `first-post`, `2024/recap`)
//! - Each segment is lowercase alphanumerics joined by single hyphens
//!
//! Slugs are derived from a content file's path relative to its collection
//! directory, so `blog/Hello World.md` becomes `hello-world`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,

    #[error("invalid slug '{0}': segments must be lowercase alphanumerics separated by single hyphens")]
    InvalidSegment(String),

    #[error("cannot derive a slug from path '{0}'")]
    InvalidPath(String),
}

/// Lowercases `text` and collapses every run of non-alphanumeric characters
/// into a single hyphen.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('-')
        && !segment.ends_with('-')
        && !segment.contains("--")
        && segment
            .chars()
            .all(|c| c == '-' || (c.is_alphanumeric() && !c.is_uppercase()))
}

/// Identifier of a record within its collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Derives a slug from a path relative to the collection directory
    pub fn from_path(relative: &Path) -> Result<Self, SlugError> {
        let stem = relative.with_extension("");
        let mut segments = Vec::new();

        for component in stem.components() {
            let text = component
                .as_os_str()
                .to_str()
                .ok_or_else(|| SlugError::InvalidPath(relative.display().to_string()))?;
            let segment = slugify(text);
            if segment.is_empty() {
                return Err(SlugError::InvalidPath(relative.display().to_string()));
            }
            segments.push(segment);
        }

        if segments.is_empty() {
            return Err(SlugError::InvalidPath(relative.display().to_string()));
        }

        Ok(Self(segments.join("/")))
    }

    /// Derives a slug from a free-form title
    pub fn from_title(title: &str) -> Result<Self, SlugError> {
        let slug = slugify(title);
        if slug.is_empty() {
            return Err(SlugError::Empty);
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_matches('/');
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if !s.split('/').all(is_valid_segment) {
            return Err(SlugError::InvalidSegment(s.to_string()));
        }

        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}
