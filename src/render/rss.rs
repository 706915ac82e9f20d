//! RSS 2.0 feed for the blog
//!
//! Items come from [`published_posts`], the same projection as the blog
//! listing page, so the feed and the page always agree on which posts are
//! out and in which order.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use super::{absolute_url, escape_xml};
use crate::domain::projection::published_posts;
use crate::domain::BlogPost;

/// Channel-level metadata, fixed by configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedMeta {
    pub title: String,
    pub description: String,
    pub site_url: String,
    pub language: String,
}

/// One `<item>` of the feed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    pub pub_date: NaiveDate,

    /// Site-relative link, `/blog/{slug}/`
    pub link: String,

    /// The post's tags
    pub categories: Vec<String>,
}

impl From<&BlogPost> for FeedItem {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            pub_date: post.pub_date,
            link: post.link(),
            categories: post.tags.clone(),
        }
    }
}

/// Feed items for a blog collection: published only, newest first
pub fn feed_items(posts: &[BlogPost]) -> Vec<FeedItem> {
    published_posts(posts).into_iter().map(FeedItem::from).collect()
}

/// Formats a date as an RFC 822 timestamp at midnight UTC
fn rfc822(date: NaiveDate) -> String {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Renders the feed document
pub fn render_rss(meta: &FeedMeta, items: &[FeedItem]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\">\n");
    xml.push_str("  <channel>\n");
    xml.push_str(&format!("    <title>{}</title>\n", escape_xml(&meta.title)));
    xml.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&meta.description)
    ));
    xml.push_str(&format!(
        "    <link>{}</link>\n",
        escape_xml(&absolute_url(&meta.site_url, "/"))
    ));
    xml.push_str(&format!("    <language>{}</language>\n", escape_xml(&meta.language)));

    for item in items {
        let link = escape_xml(&absolute_url(&meta.site_url, &item.link));

        xml.push_str("    <item>\n");
        xml.push_str(&format!("      <title>{}</title>\n", escape_xml(&item.title)));
        xml.push_str(&format!("      <link>{}</link>\n", link));
        xml.push_str(&format!("      <guid isPermaLink=\"true\">{}</guid>\n", link));
        xml.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(&item.description)
        ));
        xml.push_str(&format!("      <pubDate>{}</pubDate>\n", rfc822(item.pub_date)));
        for category in &item.categories {
            xml.push_str(&format!("      <category>{}</category>\n", escape_xml(category)));
        }
        xml.push_str("    </item>\n");
    }

    xml.push_str("  </channel>\n");
    xml.push_str("</rss>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> FeedMeta {
        FeedMeta {
            title: "Liam Nguyen | Blog".to_string(),
            description: "Thoughts & notes".to_string(),
            site_url: "https://example.com/".to_string(),
            language: "en-us".to_string(),
        }
    }

    fn post(slug: &str, day: u32, draft: bool, tags: &[&str]) -> BlogPost {
        BlogPost {
            slug: slug.parse().unwrap(),
            title: format!("Post {}", slug),
            description: format!("About {}", slug),
            pub_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            updated_date: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            draft,
            body: String::new(),
        }
    }

    #[test]
    fn items_follow_blog_listing() {
        let posts = vec![
            post("a", 1, false, &["rust"]),
            post("b", 3, true, &[]),
            post("c", 2, false, &[]),
        ];

        let items = feed_items(&posts);
        let links: Vec<_> = items.iter().map(|i| i.link.as_str()).collect();
        assert_eq!(links, vec!["/blog/c/", "/blog/a/"]);
        assert_eq!(items[1].categories, vec!["rust"]);
    }

    #[test]
    fn empty_feed_is_still_a_channel() {
        let xml = render_rss(&meta(), &[]);
        assert!(xml.contains("<channel>"));
        assert!(xml.contains("<language>en-us</language>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn renders_items() {
        let items = feed_items(&[post("hello", 15, false, &["rust", "a&b"])]);
        let xml = render_rss(&meta(), &items);

        assert!(xml.contains("<title>Liam Nguyen | Blog</title>"));
        assert!(xml.contains("<description>Thoughts &amp; notes</description>"));
        assert!(xml.contains("<link>https://example.com/</link>"));
        assert!(xml.contains("<link>https://example.com/blog/hello/</link>"));
        assert!(xml.contains("<pubDate>Mon, 15 Jan 2024 00:00:00 GMT</pubDate>"));
        assert!(xml.contains("<category>rust</category>"));
        assert!(xml.contains("<category>a&amp;b</category>"));
    }

    #[test]
    fn rfc822_dates() {
        assert_eq!(
            rfc822(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
            "Thu, 01 Feb 2024 00:00:00 GMT"
        );
    }
}
