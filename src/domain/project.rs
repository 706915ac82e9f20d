//! Portfolio project domain model

use serde::Serialize;

use super::kind::ContentKind;
use super::schema::{Choice, RawRecord, Schema, ValidationError};
use super::slug::Slug;

/// Whether a project was done for work or on the side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Professional,
    Personal,
}

impl Choice for ProjectType {
    const ALLOWED: &'static [&'static str] = &["professional", "personal"];

    fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "professional" => Some(ProjectType::Professional),
            "personal" => Some(ProjectType::Personal),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectType::Professional => write!(f, "professional"),
            ProjectType::Personal => write!(f, "personal"),
        }
    }
}

impl std::str::FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_literal(&s.to_lowercase())
            .ok_or_else(|| format!("Unknown project type: {} (expected professional or personal)", s))
    }
}

/// A validated portfolio project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: Slug,

    pub title: String,

    pub description: String,

    pub tech_stack: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    /// Reference to a cover image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub featured: bool,

    #[serde(rename = "type")]
    pub project_type: ProjectType,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl Schema for Project {
    const KIND: ContentKind = ContentKind::Projects;

    fn validate(record: &RawRecord) -> Result<Self, ValidationError> {
        let fields = record.reader();

        Ok(Self {
            slug: record.slug.clone(),
            title: fields.text("title")?,
            description: fields.text("description")?,
            tech_stack: fields.text_list("techStack")?,
            live_url: fields.opt_text("liveUrl")?,
            repo_url: fields.opt_text("repoUrl")?,
            image: fields.opt_text("image")?,
            featured: fields.flag_or("featured", false)?,
            project_type: fields.choice("type")?,
            body: record.body.clone(),
        })
    }

    fn slug(&self) -> &Slug {
        &self.slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Problem;
    use serde_json::{json, Value};

    fn raw(fields: Value) -> RawRecord {
        RawRecord::new(
            ContentKind::Projects,
            "projects/folio.md",
            "folio".parse().unwrap(),
            fields.as_object().cloned().unwrap_or_default(),
        )
    }

    fn valid_fields() -> Value {
        json!({
            "title": "Folio",
            "description": "Portfolio content engine",
            "techStack": ["Rust", "TOML"],
            "repoUrl": "https://github.com/example/folio",
            "type": "personal",
        })
    }

    #[test]
    fn validates_and_fills_defaults() {
        let project = Project::validate(&raw(valid_fields())).unwrap();

        assert_eq!(project.title, "Folio");
        assert_eq!(project.tech_stack, vec!["Rust", "TOML"]);
        assert_eq!(project.live_url, None);
        assert_eq!(project.repo_url.as_deref(), Some("https://github.com/example/folio"));
        assert!(!project.featured);
        assert_eq!(project.project_type, ProjectType::Personal);
    }

    #[test]
    fn unknown_type_fails() {
        let mut fields = valid_fields();
        fields["type"] = json!("hobby");

        let err = Project::validate(&raw(fields)).unwrap_err();
        assert_eq!(err.field, "type");
        assert_eq!(
            err.problem,
            Problem::InvalidChoice {
                value: "hobby".to_string(),
                allowed: ProjectType::ALLOWED,
            }
        );
    }

    #[test]
    fn missing_type_fails() {
        let mut fields = valid_fields();
        fields.as_object_mut().unwrap().remove("type");

        let err = Project::validate(&raw(fields)).unwrap_err();
        assert_eq!(err.field, "type");
        assert_eq!(err.problem, Problem::Missing);
    }

    #[test]
    fn featured_flag() {
        let mut fields = valid_fields();
        fields["featured"] = json!(true);
        assert!(Project::validate(&raw(fields)).unwrap().featured);
    }

    #[test]
    fn serializes_type_key() {
        let project = Project::validate(&raw(valid_fields())).unwrap();
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["type"], "personal");
        assert_eq!(json["techStack"], json!(["Rust", "TOML"]));
    }

    #[test]
    fn project_type_from_str() {
        assert_eq!("Professional".parse::<ProjectType>().unwrap(), ProjectType::Professional);
        assert!("hobby".parse::<ProjectType>().is_err());
    }
}
