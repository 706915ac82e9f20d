//! Validated content collections
//!
//! [`Collections`] is the in-memory snapshot every listing, feed and sitemap
//! is projected from. It only exists if every raw record passed its schema:
//! validation errors from all records are gathered and returned together,
//! and no partial snapshot is ever produced.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use super::blog::BlogPost;
use super::garden::GardenNote;
use super::kind::ContentKind;
use super::project::Project;
use super::schema::{Problem, RawRecord, Schema, ValidationError};
use super::work::WorkEntry;

/// One or more content records failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} content record(s) failed validation:\n{}", .0.len(), summarize(.0))]
pub struct InvalidContent(pub Vec<ValidationError>);

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A schema expectation that a record does not meet, short of an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// `{kind}/{slug}` of the record
    pub record: String,
    pub message: String,
}

/// All validated collections of a site
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Collections {
    pub blog: Vec<BlogPost>,
    pub projects: Vec<Project>,
    pub work: Vec<WorkEntry>,
    pub garden: Vec<GardenNote>,
}

impl Collections {
    /// Validates raw records of every kind, keeping their input order
    pub fn validate(records: &[RawRecord]) -> Result<Self, InvalidContent> {
        let mut errors = Vec::new();

        let collections = Self {
            blog: validate_kind(records, &mut errors),
            projects: validate_kind(records, &mut errors),
            work: validate_kind(records, &mut errors),
            garden: validate_kind(records, &mut errors),
        };

        if errors.is_empty() {
            Ok(collections)
        } else {
            Err(InvalidContent(errors))
        }
    }

    /// Number of records in a collection
    pub fn count(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::Blog => self.blog.len(),
            ContentKind::Projects => self.projects.len(),
            ContentKind::Work => self.work.len(),
            ContentKind::Garden => self.garden.len(),
        }
    }

    /// Collects soft warnings from every record
    pub fn warnings(&self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        collect_warnings(&self.blog, &mut warnings);
        collect_warnings(&self.projects, &mut warnings);
        collect_warnings(&self.work, &mut warnings);
        collect_warnings(&self.garden, &mut warnings);
        warnings
    }
}

/// Validates a single raw record against the schema of its kind
pub fn validate_record(record: &RawRecord) -> Result<(), ValidationError> {
    match record.kind {
        ContentKind::Blog => BlogPost::validate(record).map(drop),
        ContentKind::Projects => Project::validate(record).map(drop),
        ContentKind::Work => WorkEntry::validate(record).map(drop),
        ContentKind::Garden => GardenNote::validate(record).map(drop),
    }
}

fn validate_kind<T: Schema>(records: &[RawRecord], errors: &mut Vec<ValidationError>) -> Vec<T> {
    let mut valid = Vec::new();
    let mut seen: HashMap<String, &str> = HashMap::new();

    for record in records.iter().filter(|r| r.kind == T::KIND) {
        let item = match T::validate(record) {
            Ok(item) => item,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        let slug = item.slug().to_string();
        if let Some(other) = seen.get(&slug) {
            errors.push(ValidationError::new(
                &record.source,
                "slug",
                Problem::DuplicateSlug {
                    slug,
                    other: other.to_string(),
                },
            ));
            continue;
        }

        seen.insert(slug, &record.source);
        valid.push(item);
    }

    valid
}

fn collect_warnings<T: Schema>(items: &[T], out: &mut Vec<Warning>) {
    for item in items {
        for message in item.warnings() {
            out.push(Warning {
                record: format!("{}/{}", T::KIND, item.slug()),
                message,
            });
        }
    }
}
