//! Sitemap for search engines
//!
//! Every public route of the site is listed, except URLs containing the
//! configured exclusion marker (`/draft` by default). Draft posts never
//! produce routes in the first place; the marker is an extra guard for
//! pages that live outside the content collections.

use chrono::NaiveDate;

use super::nav::static_routes;
use super::{absolute_url, escape_xml};
use crate::domain::projection::{garden_index, published_posts};
use crate::domain::Collections;

/// Per-URL sitemap attributes
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapOptions {
    pub changefreq: String,
    pub priority: f64,

    /// URLs containing this substring are left out
    pub exclude: String,

    /// Date stamped on every URL
    pub lastmod: NaiveDate,
}

/// All public routes of the site, as site-relative paths
pub fn site_routes(collections: &Collections) -> Vec<String> {
    let mut routes = static_routes();
    routes.extend(published_posts(&collections.blog).iter().map(|p| p.link()));
    routes.extend(garden_index(&collections.garden, None).iter().map(|n| n.link()));
    routes
}

/// Returns true if the sitemap should list `url`
pub fn is_listed(url: &str, exclude: &str) -> bool {
    exclude.is_empty() || !url.contains(exclude)
}

/// Routes of published content that the exclusion marker would drop
pub fn excluded_routes<'a>(site_url: &str, routes: &'a [String], exclude: &str) -> Vec<&'a str> {
    routes
        .iter()
        .filter(|route| !is_listed(&absolute_url(site_url, route), exclude))
        .map(String::as_str)
        .collect()
}

/// Shortest decimal form of `priority`, keeping at least one fractional digit
fn format_priority(priority: f64) -> String {
    let text = priority.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{:.1}", priority)
    }
}

/// Renders the sitemap document for the given routes
pub fn render_sitemap(site_url: &str, routes: &[String], options: &SitemapOptions) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    let lastmod = options.lastmod.format("%Y-%m-%d").to_string();
    let priority = format_priority(options.priority);

    for route in routes {
        let url = absolute_url(site_url, route);
        if !is_listed(&url, &options.exclude) {
            continue;
        }

        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            escape_xml(&options.changefreq)
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
