//! # Rendering
//!
//! Serializers that consume projected listings. Page templating belongs to
//! the site's web framework; this module only produces the machine-facing
//! documents.
//!
//! | Document | Module | Input |
//! |----------|--------|-------|
//! | `rss.xml` | [`rss`] | [`published_posts`](crate::domain::projection::published_posts) |
//! | `sitemap.xml` | [`sitemap`] | [`site_routes`](sitemap::site_routes) |

pub mod nav;
pub mod rss;
pub mod sitemap;

pub use nav::{NavLink, NAV_LINKS};
pub use rss::{FeedItem, FeedMeta};
pub use sitemap::SitemapOptions;

/// Escapes text for use in XML element content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Joins a site URL and a site-relative path with exactly one slash
pub fn absolute_url(site_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        site_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_xml(r#"Tom & Jerry <"cat's">"#),
            "Tom &amp; Jerry &lt;&quot;cat&apos;s&quot;&gt;"
        );
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn joins_urls() {
        assert_eq!(absolute_url("https://example.com", "/blog/a/"), "https://example.com/blog/a/");
        assert_eq!(absolute_url("https://example.com/", "blog/a/"), "https://example.com/blog/a/");
        assert_eq!(absolute_url("https://example.com/", "/"), "https://example.com/");
    }
}
