//! Publish commands (feed, sitemap, build)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde_json::json;

use super::output::Output;
use crate::domain::Collections;
use crate::render::rss::{feed_items, render_rss};
use crate::render::sitemap::{excluded_routes, render_sitemap, site_routes};
use crate::render::SitemapOptions;
use crate::storage::Site;

/// A generated document and how many entries it holds
struct Document {
    xml: String,
    entries: usize,
}

fn feed_document(site: &Site, collections: &Collections) -> Document {
    let items = feed_items(&collections.blog);
    Document {
        xml: render_rss(&site.site_config().feed_meta(), &items),
        entries: items.len(),
    }
}

fn sitemap_document(site: &Site, collections: &Collections) -> Document {
    let config = site.site_config();
    let routes = site_routes(collections);
    let excluded = excluded_routes(&config.site.url, &routes, &config.sitemap.exclude).len();

    let options = SitemapOptions {
        changefreq: config.sitemap.changefreq.clone(),
        priority: config.sitemap.priority,
        exclude: config.sitemap.exclude.clone(),
        lastmod: Local::now().date_naive(),
    };

    Document {
        xml: render_sitemap(&config.site.url, &routes, &options),
        entries: routes.len() - excluded,
    }
}

/// Prints the document, or writes it to `path`
fn emit(output: &Output, what: &str, document: &Document, path: Option<&Path>) -> Result<()> {
    match path {
        None => print!("{}", document.xml),
        Some(path) => {
            fs::write(path, &document.xml)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            if output.is_json() {
                output.data(&json!({
                    "path": path.display().to_string(),
                    "entries": document.entries,
                }));
            } else {
                output.success(&format!(
                    "Wrote {} with {} entries to {}",
                    what,
                    document.entries,
                    path.display()
                ));
            }
        }
    }
    Ok(())
}

/// Generates the RSS feed
pub fn feed(output: &Output, path: Option<&Path>) -> Result<()> {
    let site = Site::open_current()?;
    let collections = site.load()?;

    let document = feed_document(&site, &collections);
    output.verbose_ctx("feed", &format!("{} published post(s)", document.entries));

    emit(output, "feed", &document, path)
}

/// Generates the sitemap
pub fn sitemap(output: &Output, path: Option<&Path>) -> Result<()> {
    let site = Site::open_current()?;
    let collections = site.load()?;

    let document = sitemap_document(&site, &collections);
    output.verbose_ctx("sitemap", &format!("{} listed URL(s)", document.entries));

    emit(output, "sitemap", &document, path)
}

/// Validates content and writes `rss.xml` and `sitemap.xml`
pub fn build(output: &Output) -> Result<()> {
    let site = Site::open_current()?;
    output.verbose_ctx("build", &format!("Building site at: {}", site.root().display()));

    let collections = site.load()?;
    for warning in collections.warnings() {
        output.warning(&format!("{}: {}", warning.record, warning.message));
    }

    let feed = feed_document(&site, &collections);
    let feed_path = site.write_output("rss.xml", &feed.xml)?;
    output.verbose_ctx("build", &format!("Wrote {}", feed_path.display()));

    let sitemap = sitemap_document(&site, &collections);
    let sitemap_path = site.write_output("sitemap.xml", &sitemap.xml)?;
    output.verbose_ctx("build", &format!("Wrote {}", sitemap_path.display()));

    if output.is_json() {
        output.data(&json!({
            "feed": { "path": feed_path.display().to_string(), "items": feed.entries },
            "sitemap": { "path": sitemap_path.display().to_string(), "urls": sitemap.entries },
        }));
    } else {
        output.success(&format!(
            "Built {} feed item(s) and {} sitemap URL(s) into {}",
            feed.entries,
            sitemap.entries,
            site.out_dir().display()
        ));
    }

    Ok(())
}
