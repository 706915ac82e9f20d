//! Digital garden notes

use serde::Serialize;

use super::kind::ContentKind;
use super::schema::{Choice, RawRecord, Schema, ValidationError};
use super::slug::Slug;

/// How complete a garden note is. Display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    Seedling,
    Budding,
    Evergreen,
}

impl Choice for Maturity {
    const ALLOWED: &'static [&'static str] = &["seedling", "budding", "evergreen"];

    fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "seedling" => Some(Maturity::Seedling),
            "budding" => Some(Maturity::Budding),
            "evergreen" => Some(Maturity::Evergreen),
            _ => None,
        }
    }
}

impl std::fmt::Display for Maturity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Maturity::Seedling => write!(f, "seedling"),
            Maturity::Budding => write!(f, "budding"),
            Maturity::Evergreen => write!(f, "evergreen"),
        }
    }
}

impl std::str::FromStr for Maturity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_literal(&s.to_lowercase())
            .ok_or_else(|| format!("Unknown maturity: {} (expected seedling, budding or evergreen)", s))
    }
}

/// A validated garden note
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenNote {
    pub slug: Slug,

    pub title: String,

    pub description: String,

    pub maturity: Maturity,

    pub tags: Vec<String>,

    /// Related notes or external references
    pub links: Vec<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl GardenNote {
    /// Site-relative link to the note page
    pub fn link(&self) -> String {
        format!("/garden/{}/", self.slug)
    }
}

impl Schema for GardenNote {
    const KIND: ContentKind = ContentKind::Garden;

    fn validate(record: &RawRecord) -> Result<Self, ValidationError> {
        let fields = record.reader();

        Ok(Self {
            slug: record.slug.clone(),
            title: fields.text("title")?,
            description: fields.text("description")?,
            maturity: fields.choice("maturity")?,
            tags: fields.text_list("tags")?,
            links: fields.text_list_or_default("links")?,
            body: record.body.clone(),
        })
    }

    fn slug(&self) -> &Slug {
        &self.slug
    }
}
