//! folio - content engine for a personal portfolio site
//!
//! folio validates the site's content collections (blog posts, projects,
//! work history, garden notes), projects them into the ordered listings the
//! pages show, and generates the RSS feed and sitemap from the same
//! listings.

pub mod domain;
pub mod storage;
pub mod render;
pub mod cli;

pub use domain::{BlogPost, Collections, ContentKind, GardenNote, Project, Slug, ValidationError, WorkEntry};
