//! # Storage Layer
//!
//! Filesystem side of folio: reading content, configuration, and writing
//! generated documents.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Content | Markdown/MDX + YAML frontmatter | `content/{kind}/{slug}.md` |
//! | Site config | TOML | `folio.toml` |
//! | Global config | TOML | `~/.config/folio/config.toml` |
//! | Feed, sitemap | XML (generated) | `dist/rss.xml`, `dist/sitemap.xml` |
//!
//! ## Site Structure
//!
//! ```text
//! site/
//! ├── folio.toml
//! ├── content/
//! │   ├── blog/          # Blog posts
//! │   ├── projects/      # Portfolio projects
//! │   ├── work/          # Work history
//! │   └── garden/        # Digital garden notes
//! └── dist/              # Generated output (gitignored)
//! ```
//!
//! ## Key Types
//!
//! - [`Site`] - Entry point for accessing a folio site
//! - [`ContentStore`] - Read/write content as markdown files
//! - [`Config`] - Loads site and global configuration

mod content;
mod config;
mod site;

pub use content::{parse_document, render_document, ContentScan, ContentStore};
pub use config::{Config, ConfigError, FeedSection, GlobalConfig, OutputFormat, SiteConfig, SiteSection, SitemapSection, CONFIG_FILE};
pub use site::{Site, SiteError};
