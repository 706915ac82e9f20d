//! Schema validation for content records
//!
//! A [`RawRecord`] is the untyped frontmatter of one content file. Each
//! content kind implements [`Schema`] to turn a raw record into a typed,
//! immutable record, filling declared defaults explicitly and rejecting
//! anything malformed with a [`ValidationError`] that names the record and
//! the offending field.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use thiserror::Error;

use super::kind::ContentKind;
use super::slug::{Slug, SlugError};

/// Untyped frontmatter fields
pub type Fields = serde_json::Map<String, Value>;

/// What was wrong with a field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("required field is missing")]
    Missing,

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid date '{0}' (expected YYYY-MM-DD or an RFC 3339 timestamp)")]
    InvalidDate(String),

    #[error("'{value}' is not one of: {}", .allowed.join(", "))]
    InvalidChoice {
        value: String,
        allowed: &'static [&'static str],
    },

    #[error(transparent)]
    InvalidSlug(#[from] SlugError),

    #[error("slug '{slug}' is already used by {other}")]
    DuplicateSlug { slug: String, other: String },

    #[error("malformed document: {0}")]
    Malformed(String),
}

/// A content record that failed its schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{record}: field '{field}': {problem}")]
pub struct ValidationError {
    /// Source of the record, e.g. `blog/first-post.md`
    pub record: String,

    /// Offending field (frontmatter key)
    pub field: String,

    pub problem: Problem,
}

impl ValidationError {
    pub fn new(record: impl Into<String>, field: impl Into<String>, problem: Problem) -> Self {
        Self {
            record: record.into(),
            field: field.into(),
            problem,
        }
    }
}

/// Frontmatter and body of one content file, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub kind: ContentKind,

    /// Path of the file relative to the content directory
    pub source: String,

    /// Slug derived from the file path
    pub slug: Slug,

    /// Markdown body (everything after the frontmatter)
    pub body: String,

    pub fields: Fields,
}

impl RawRecord {
    pub fn new(kind: ContentKind, source: impl Into<String>, slug: Slug, fields: Fields) -> Self {
        Self {
            kind,
            source: source.into(),
            slug,
            body: String::new(),
            fields,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns a typed reader over this record's fields
    pub fn reader(&self) -> FieldReader<'_> {
        FieldReader { record: self }
    }

    /// Slug the record is listed under: the path slug, or for blog posts a
    /// usable `slug` override
    pub fn listed_slug(&self) -> Slug {
        if self.kind == ContentKind::Blog {
            if let Ok(slug) = self.reader().slug() {
                return slug;
            }
        }
        self.slug.clone()
    }
}

/// A validated content record of one kind
pub trait Schema: Sized {
    /// Collection this schema belongs to
    const KIND: ContentKind;

    /// Validates a raw record, filling declared defaults
    fn validate(record: &RawRecord) -> Result<Self, ValidationError>;

    /// Identifier of the record within its collection
    fn slug(&self) -> &Slug;

    /// Expectations the schema does not enforce (e.g. date ordering)
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Enum fields declared as a fixed set of literals
pub trait Choice: Sized + Copy {
    /// Accepted literals, matched exactly
    const ALLOWED: &'static [&'static str];

    fn from_literal(literal: &str) -> Option<Self>;
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "text",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Parses a calendar date, accepting a plain date or an RFC 3339 timestamp
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// Typed access to the fields of a [`RawRecord`]
///
/// An explicit `null` is treated the same as an absent key.
pub struct FieldReader<'a> {
    record: &'a RawRecord,
}

impl<'a> FieldReader<'a> {
    fn error(&self, field: &str, problem: Problem) -> ValidationError {
        ValidationError::new(&self.record.source, field, problem)
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.record.fields.get(field).filter(|v| !v.is_null())
    }

    fn require(&self, field: &str) -> Result<&'a Value, ValidationError> {
        self.get(field).ok_or_else(|| self.error(field, Problem::Missing))
    }

    fn wrong_type(&self, field: &str, expected: &'static str, value: &Value) -> ValidationError {
        self.error(
            field,
            Problem::WrongType {
                expected,
                found: type_name(value),
            },
        )
    }

    fn as_text(&self, field: &str, value: &'a Value) -> Result<String, ValidationError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.wrong_type(field, "text", value))
    }

    fn as_date(&self, field: &str, value: &Value) -> Result<NaiveDate, ValidationError> {
        let text = value
            .as_str()
            .ok_or_else(|| self.wrong_type(field, "date", value))?;
        parse_date(text).ok_or_else(|| self.error(field, Problem::InvalidDate(text.to_string())))
    }

    fn as_text_list(&self, field: &str, value: &Value) -> Result<Vec<String>, ValidationError> {
        let items = value
            .as_array()
            .ok_or_else(|| self.wrong_type(field, "list of text", value))?;

        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.wrong_type(field, "list of text", item))
            })
            .collect()
    }

    /// Required text field
    pub fn text(&self, field: &str) -> Result<String, ValidationError> {
        let value = self.require(field)?;
        self.as_text(field, value)
    }

    /// Optional text field
    pub fn opt_text(&self, field: &str) -> Result<Option<String>, ValidationError> {
        self.get(field).map(|v| self.as_text(field, v)).transpose()
    }

    /// Required date field
    pub fn date(&self, field: &str) -> Result<NaiveDate, ValidationError> {
        let value = self.require(field)?;
        self.as_date(field, value)
    }

    /// Optional date field
    pub fn opt_date(&self, field: &str) -> Result<Option<NaiveDate>, ValidationError> {
        self.get(field).map(|v| self.as_date(field, v)).transpose()
    }

    /// Required list of text (may be empty, but must be present)
    pub fn text_list(&self, field: &str) -> Result<Vec<String>, ValidationError> {
        let value = self.require(field)?;
        self.as_text_list(field, value)
    }

    /// List of text defaulting to empty when absent
    pub fn text_list_or_default(&self, field: &str) -> Result<Vec<String>, ValidationError> {
        self.get(field)
            .map(|v| self.as_text_list(field, v))
            .transpose()
            .map(Option::unwrap_or_default)
    }

    /// Boolean field with a declared default
    pub fn flag_or(&self, field: &str, default: bool) -> Result<bool, ValidationError> {
        match self.get(field) {
            None => Ok(default),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| self.wrong_type(field, "boolean", value)),
        }
    }

    /// Required enum field
    pub fn choice<T: Choice>(&self, field: &str) -> Result<T, ValidationError> {
        let value = self.require(field)?;
        let literal = value
            .as_str()
            .ok_or_else(|| self.wrong_type(field, "text", value))?;

        T::from_literal(literal).ok_or_else(|| {
            self.error(
                field,
                Problem::InvalidChoice {
                    value: literal.to_string(),
                    allowed: T::ALLOWED,
                },
            )
        })
    }

    /// Slug of the record, honouring a `slug` override in the frontmatter
    pub fn slug(&self) -> Result<Slug, ValidationError> {
        match self.opt_text("slug")? {
            None => Ok(self.record.slug.clone()),
            Some(text) => text
                .parse()
                .map_err(|e: SlugError| self.error("slug", e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fields: Value) -> RawRecord {
        let fields = fields.as_object().cloned().unwrap_or_default();
        RawRecord::new(
            ContentKind::Blog,
            "blog/test.md",
            "test".parse().unwrap(),
            fields,
        )
    }

    #[test]
    fn listed_slug_honours_blog_override() {
        assert_eq!(record(json!({})).listed_slug().as_str(), "test");
        assert_eq!(record(json!({ "slug": "custom" })).listed_slug().as_str(), "custom");
        assert_eq!(record(json!({ "slug": "Not Valid" })).listed_slug().as_str(), "test");

        let mut garden = record(json!({ "slug": "custom" }));
        garden.kind = ContentKind::Garden;
        assert_eq!(garden.listed_slug().as_str(), "test");
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Color {
        Red,
        Blue,
    }

    impl Choice for Color {
        const ALLOWED: &'static [&'static str] = &["red", "blue"];

        fn from_literal(literal: &str) -> Option<Self> {
            match literal {
                "red" => Some(Color::Red),
                "blue" => Some(Color::Blue),
                _ => None,
            }
        }
    }

    #[test]
    fn missing_required_text() {
        let rec = record(json!({}));
        let err = rec.reader().text("title").unwrap_err();
        assert_eq!(err.record, "blog/test.md");
        assert_eq!(err.field, "title");
        assert_eq!(err.problem, Problem::Missing);
    }

    #[test]
    fn null_counts_as_missing() {
        let rec = record(json!({ "title": null, "updatedDate": null }));
        assert_eq!(rec.reader().text("title").unwrap_err().problem, Problem::Missing);
        assert_eq!(rec.reader().opt_date("updatedDate").unwrap(), None);
    }

    #[test]
    fn wrong_type_reports_found_type() {
        let rec = record(json!({ "title": 42 }));
        let err = rec.reader().text("title").unwrap_err();
        assert_eq!(
            err.problem,
            Problem::WrongType {
                expected: "text",
                found: "number"
            }
        );
    }

    #[test]
    fn dates() {
        let rec = record(json!({
            "plain": "2024-01-31",
            "stamp": "2024-02-01T10:30:00Z",
            "bad": "2024-02-30",
            "number": 20240101,
        }));
        let reader = rec.reader();

        assert_eq!(
            reader.date("plain").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        assert_eq!(
            reader.date("stamp").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert_eq!(
            reader.date("bad").unwrap_err().problem,
            Problem::InvalidDate("2024-02-30".to_string())
        );
        assert!(matches!(
            reader.date("number").unwrap_err().problem,
            Problem::WrongType { expected: "date", .. }
        ));
        assert_eq!(reader.date("absent").unwrap_err().problem, Problem::Missing);
        assert_eq!(reader.opt_date("absent").unwrap(), None);
    }

    #[test]
    fn text_lists() {
        let rec = record(json!({ "tags": ["a", "b"], "empty": [], "mixed": ["a", 1] }));
        let reader = rec.reader();

        assert_eq!(reader.text_list("tags").unwrap(), vec!["a", "b"]);
        assert!(reader.text_list("empty").unwrap().is_empty());
        assert!(reader.text_list("mixed").is_err());
        assert_eq!(reader.text_list("absent").unwrap_err().problem, Problem::Missing);
        assert!(reader.text_list_or_default("absent").unwrap().is_empty());
    }

    #[test]
    fn flags_default() {
        let rec = record(json!({ "draft": true, "featured": "yes" }));
        let reader = rec.reader();

        assert!(reader.flag_or("draft", false).unwrap());
        assert!(!reader.flag_or("absent", false).unwrap());
        assert!(reader.flag_or("featured", false).is_err());
    }

    #[test]
    fn choices_match_exactly() {
        let rec = record(json!({ "ok": "red", "caps": "Red", "other": "green" }));
        let reader = rec.reader();

        assert_eq!(reader.choice::<Color>("ok").unwrap(), Color::Red);
        assert!(reader.choice::<Color>("caps").is_err());

        let err = reader.choice::<Color>("other").unwrap_err();
        assert_eq!(
            err.to_string(),
            "blog/test.md: field 'other': 'green' is not one of: red, blue"
        );
    }

    #[test]
    fn slug_override() {
        let rec = record(json!({ "slug": "custom-path" }));
        assert_eq!(rec.reader().slug().unwrap().as_str(), "custom-path");

        let rec = record(json!({}));
        assert_eq!(rec.reader().slug().unwrap().as_str(), "test");

        let rec = record(json!({ "slug": "Not Valid" }));
        let err = rec.reader().slug().unwrap_err();
        assert_eq!(err.field, "slug");
        assert!(matches!(err.problem, Problem::InvalidSlug(_)));
    }
}
