//! Work history domain model

use chrono::NaiveDate;
use serde::Serialize;

use super::kind::ContentKind;
use super::schema::{RawRecord, Schema, ValidationError};
use super::slug::Slug;

/// A validated work history entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub slug: Slug,

    pub company: String,

    pub role: String,

    pub start_date: NaiveDate,

    /// Absent for the current position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    pub achievements: Vec<String>,

    pub tech_stack: Vec<String>,

    /// Reference to a company logo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl WorkEntry {
    /// Returns true if this is a current position (no end date)
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }

    /// Human-readable period, e.g. `2021-03 – present`
    pub fn period(&self) -> String {
        let end = self
            .end_date
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_else(|| "present".to_string());
        format!("{} – {}", self.start_date.format("%Y-%m"), end)
    }
}

impl Schema for WorkEntry {
    const KIND: ContentKind = ContentKind::Work;

    fn validate(record: &RawRecord) -> Result<Self, ValidationError> {
        let fields = record.reader();

        Ok(Self {
            slug: record.slug.clone(),
            company: fields.text("company")?,
            role: fields.text("role")?,
            start_date: fields.date("startDate")?,
            end_date: fields.opt_date("endDate")?,
            achievements: fields.text_list("achievements")?,
            tech_stack: fields.text_list("techStack")?,
            logo: fields.opt_text("logo")?,
            body: record.body.clone(),
        })
    }

    fn slug(&self) -> &Slug {
        &self.slug
    }

    fn warnings(&self) -> Vec<String> {
        match self.end_date {
            Some(end) if end < self.start_date => vec![format!(
                "endDate {} is before startDate {}",
                end, self.start_date
            )],
            _ => Vec::new(),
        }
    }
}
