//! Configuration handling for folio
//!
//! Configuration is stored in `folio.toml` at the site root and
//! `~/.config/folio/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::FeedMeta;

/// Name of the site configuration file; its directory is the site root
pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Site-wide settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteSection {
    /// Absolute base URL of the deployed site
    pub url: String,

    /// Language tag announced by the feed
    pub language: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            url: "https://example.com".to_string(),
            language: "en-us".to_string(),
        }
    }
}

/// RSS channel metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedSection {
    pub title: String,
    pub description: String,
}

impl Default for FeedSection {
    fn default() -> Self {
        Self {
            title: "Liam Nguyen | Blog".to_string(),
            description: "Thoughts on software engineering, technology, and continuous learning."
                .to_string(),
        }
    }
}

/// Sitemap settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SitemapSection {
    pub changefreq: String,

    pub priority: f64,

    /// URLs containing this substring are left out of the sitemap
    pub exclude: String,
}

impl Default for SitemapSection {
    fn default() -> Self {
        Self {
            changefreq: "weekly".to_string(),
            priority: 0.7,
            exclude: "/draft".to_string(),
        }
    }
}

const CHANGEFREQS: &[&str] = &["always", "hourly", "daily", "weekly", "monthly", "yearly", "never"];

/// Site configuration (`folio.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Content directory, relative to the site root
    pub content_dir: PathBuf,

    /// Output directory for generated documents, relative to the site root
    pub out_dir: PathBuf,

    pub site: SiteSection,

    pub feed: FeedSection,

    pub sitemap: SitemapSection,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            out_dir: PathBuf::from("dist"),
            site: SiteSection::default(),
            feed: FeedSection::default(),
            sitemap: SitemapSection::default(),
        }
    }
}

impl SiteConfig {
    /// Checks values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.site.url;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "site.url must be an absolute http(s) URL, got '{}'",
                url
            )));
        }

        if !(0.0..=1.0).contains(&self.sitemap.priority) {
            return Err(ConfigError::Invalid(format!(
                "sitemap.priority must be between 0.0 and 1.0, got {}",
                self.sitemap.priority
            )));
        }

        if !CHANGEFREQS.contains(&self.sitemap.changefreq.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "sitemap.changefreq must be one of {}, got '{}'",
                CHANGEFREQS.join(", "),
                self.sitemap.changefreq
            )));
        }

        Ok(())
    }

    /// Channel metadata for the RSS feed
    pub fn feed_meta(&self) -> FeedMeta {
        FeedMeta {
            title: self.feed.title.clone(),
            description: self.feed.description.clone(),
            site_url: self.site.url.clone(),
            language: self.site.language.clone(),
        }
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Loaders for `folio.toml` and the global user config
pub struct Config;

impl Config {
    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "folio", "folio").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads and validates the site configuration of the site at `site_root`
    pub fn load_site(site_root: &Path) -> Result<SiteConfig> {
        let config_path = site_root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(SiteConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read site config: {}", config_path.display()))?;

        let config: SiteConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse site config")?;

        config
            .validate()
            .with_context(|| format!("Invalid site config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds the site root by looking for `folio.toml` from the current directory up
    pub fn find_site_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_site_root_from(&current)
    }

    /// Finds the site root by looking for `folio.toml` from `start` up
    pub fn find_site_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(CONFIG_FILE).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = SiteConfig::default();

        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.site.language, "en-us");
        assert_eq!(config.sitemap.changefreq, "weekly");
        assert_eq!(config.sitemap.exclude, "/draft");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_site_config() {
        let toml = r#"
out_dir = "public"

[site]
url = "https://liam.dev"

[feed]
title = "Liam's Blog"
"#;

        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("public"));
        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.site.url, "https://liam.dev");
        assert_eq!(config.site.language, "en-us");
        assert_eq!(config.feed.title, "Liam's Blog");
        assert_eq!(config.feed.description, FeedSection::default().description);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_global_config() {
        let config: GlobalConfig = toml::from_str("default_format = \"json\"").unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn rejects_relative_site_url() {
        let mut config = SiteConfig::default();
        config.site.url = "example.com".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_out_of_range_priority() {
        let mut config = SiteConfig::default();
        config.sitemap.priority = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_changefreq() {
        let mut config = SiteConfig::default();
        config.sitemap.changefreq = "sometimes".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn feed_meta_from_config() {
        let meta = SiteConfig::default().feed_meta();
        assert_eq!(meta.site_url, "https://example.com");
        assert_eq!(meta.language, "en-us");
        assert_eq!(meta.title, "Liam Nguyen | Blog");
    }

    #[test]
    fn find_site_root_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "").unwrap();

        let sub_dir = dir.path().join("content").join("blog");
        fs::create_dir_all(&sub_dir).unwrap();

        assert_eq!(Config::find_site_root_from(&sub_dir), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn find_site_root_outside_site() {
        let dir = TempDir::new().unwrap();
        // The temp dir itself has no folio.toml; an ancestor might, so only
        // check that the result is not inside the temp dir
        let found = Config::find_site_root_from(dir.path());
        assert!(found.map_or(true, |root| !root.starts_with(dir.path())));
    }

    #[test]
    fn load_site_reads_folio_toml() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load_site(dir.path()).unwrap(), SiteConfig::default());

        fs::write(dir.path().join(CONFIG_FILE), "[sitemap]\npriority = 0.75\n").unwrap();
        let config = Config::load_site(dir.path()).unwrap();
        assert_eq!(config.sitemap.priority, 0.75);
        assert_eq!(config.sitemap.changefreq, "weekly");
    }

    #[test]
    fn invalid_site_config_fails_to_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[sitemap]\npriority = 3.0\n").unwrap();
        assert!(Config::load_site(dir.path()).is_err());

        fs::write(dir.path().join(CONFIG_FILE), "content_dir = [").unwrap();
        assert!(Config::load_site(dir.path()).is_err());
    }
}
