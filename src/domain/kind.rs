//! Content kinds
//!
//! Each kind is an independent collection stored in its own directory
//! under the site's content directory.

use serde::{Deserialize, Serialize};

/// One of the four record categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Blog posts, syndicated through the RSS feed
    Blog,

    /// Portfolio projects
    Projects,

    /// Work history entries
    Work,

    /// Digital garden notes
    Garden,
}

impl ContentKind {
    /// Returns all kinds in load order
    pub fn all() -> &'static [ContentKind] {
        &[
            ContentKind::Blog,
            ContentKind::Projects,
            ContentKind::Work,
            ContentKind::Garden,
        ]
    }

    /// Directory name of this collection, relative to the content directory
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContentKind::Blog => "blog",
            ContentKind::Projects => "projects",
            ContentKind::Work => "work",
            ContentKind::Garden => "garden",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blog" | "post" | "posts" => Ok(ContentKind::Blog),
            "projects" | "project" => Ok(ContentKind::Projects),
            "work" | "job" | "jobs" => Ok(ContentKind::Work),
            "garden" | "note" | "notes" => Ok(ContentKind::Garden),
            _ => Err(format!(
                "Unknown content kind: {} (expected blog, projects, work or garden)",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kinds() {
        assert_eq!("blog".parse::<ContentKind>().unwrap(), ContentKind::Blog);
        assert_eq!("Posts".parse::<ContentKind>().unwrap(), ContentKind::Blog);
        assert_eq!("project".parse::<ContentKind>().unwrap(), ContentKind::Projects);
        assert_eq!("work".parse::<ContentKind>().unwrap(), ContentKind::Work);
        assert_eq!("notes".parse::<ContentKind>().unwrap(), ContentKind::Garden);
        assert!("pages".parse::<ContentKind>().is_err());
    }

    #[test]
    fn display_matches_dir_name() {
        for kind in ContentKind::all() {
            assert_eq!(kind.to_string(), kind.dir_name());
            assert_eq!(kind.to_string().parse::<ContentKind>().unwrap(), *kind);
        }
    }
}
