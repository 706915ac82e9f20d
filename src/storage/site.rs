//! Site management
//!
//! Handles site initialization and provides access to content and output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::{Config, SiteConfig, CONFIG_FILE};
use super::content::ContentStore;
use crate::domain::{Collections, ContentKind, InvalidContent};

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Not in a folio site. Run 'folio init' first.")]
    NotInSite,
}

/// A folio site: a directory holding `folio.toml` and the content tree
pub struct Site {
    root: PathBuf,
    config: SiteConfig,
}

impl Site {
    /// Opens an existing site at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(CONFIG_FILE).is_file() {
            return Err(SiteError::NotInSite.into());
        }

        let config = Config::load_site(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the site at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_site_root().ok_or(SiteError::NotInSite)?;

        Self::open(root)
    }

    /// Initializes a new site at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create site directory: {}", root.display()))?;

        // Create default config
        let config_path = root.join(CONFIG_FILE);
        let site_config = if config_path.exists() {
            Config::load_site(&root)?
        } else {
            let default_config = SiteConfig::default();
            let body = toml::to_string_pretty(&default_config)
                .context("Failed to serialize site config")?;
            let content = format!("# folio site configuration\n\n{}", body);
            fs::write(&config_path, content)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
            default_config
        };

        // Create one directory per collection
        let store = ContentStore::new(root.join(&site_config.content_dir));
        for &kind in ContentKind::all() {
            let dir = store.kind_dir(kind);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create content directory: {}", dir.display()))?;
        }

        // Generated output stays out of version control
        let gitignore_path = root.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = format!("# Generated by 'folio build'\n/{}/\n", site_config.out_dir.display());
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the site root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the site configuration (`folio.toml`)
    pub fn site_config(&self) -> &SiteConfig {
        &self.config
    }

    /// Returns the content directory
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.config.content_dir)
    }

    /// Returns the output directory
    pub fn out_dir(&self) -> PathBuf {
        self.root.join(&self.config.out_dir)
    }

    /// Returns the content store
    pub fn content_store(&self) -> ContentStore {
        ContentStore::new(self.content_dir())
    }

    /// Reads and validates all content
    ///
    /// Fails with [`InvalidContent`] listing every malformed or invalid
    /// record; no collection is returned in that case.
    pub fn load(&self) -> Result<Collections> {
        let scan = self.content_store().scan()?;
        let mut errors = scan.malformed;

        match Collections::validate(&scan.records) {
            Ok(collections) if errors.is_empty() => Ok(collections),
            Ok(_) => Err(InvalidContent(errors).into()),
            Err(InvalidContent(invalid)) => {
                errors.extend(invalid);
                Err(InvalidContent(errors).into())
            }
        }
    }

    /// Writes a generated document into the output directory
    pub fn write_output(&self, name: &str, content: &str) -> Result<PathBuf> {
        let out_dir = self.out_dir();
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

        let path = out_dir.join(name);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }

    /// Returns a relative path from the site root
    pub fn relative_path(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(&self.root).ok().map(|p| p.to_path_buf())
    }
}
