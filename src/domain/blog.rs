//! Blog post domain model
//!
//! Blog posts are the only syndicated collection: published posts appear in
//! the blog listing and in the RSS feed, in the same order.

use chrono::NaiveDate;
use serde::Serialize;

use super::kind::ContentKind;
use super::schema::{RawRecord, Schema, ValidationError};
use super::slug::Slug;

/// A validated blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Unique within the blog collection; used in `/blog/{slug}/`
    pub slug: Slug,

    pub title: String,

    pub description: String,

    pub pub_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<NaiveDate>,

    pub tags: Vec<String>,

    /// Drafts are excluded from every public listing and feed
    pub draft: bool,

    /// Markdown body content (excluding frontmatter)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl BlogPost {
    /// Returns true if this post is visible publicly
    pub fn is_published(&self) -> bool {
        !self.draft
    }

    /// Site-relative link to the post page
    pub fn link(&self) -> String {
        format!("/blog/{}/", self.slug)
    }

    /// Returns true if the post carries `tag` (case-insensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl Schema for BlogPost {
    const KIND: ContentKind = ContentKind::Blog;

    fn validate(record: &RawRecord) -> Result<Self, ValidationError> {
        let fields = record.reader();

        Ok(Self {
            slug: fields.slug()?,
            title: fields.text("title")?,
            description: fields.text("description")?,
            pub_date: fields.date("pubDate")?,
            updated_date: fields.opt_date("updatedDate")?,
            tags: fields.text_list("tags")?,
            draft: fields.flag_or("draft", false)?,
            body: record.body.clone(),
        })
    }

    fn slug(&self) -> &Slug {
        &self.slug
    }

    fn warnings(&self) -> Vec<String> {
        match self.updated_date {
            Some(updated) if updated < self.pub_date => vec![format!(
                "updatedDate {} is before pubDate {}",
                updated, self.pub_date
            )],
            _ => Vec::new(),
        }
    }
}
