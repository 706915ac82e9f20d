//! Content commands (new, check, list)

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde_json::json;

use super::output::Output;
use crate::domain::projection::{
    all_posts, garden_index, posts_tagged, project_showcase, published_posts, tag_counts,
    with_tag, work_timeline,
};
use crate::domain::{
    validate_record, BlogPost, Collections, ContentKind, Fields, GardenNote, InvalidContent,
    Maturity, Project, ProjectType, RawRecord, Slug, WorkEntry,
};
use crate::render::sitemap::{excluded_routes, site_routes};
use crate::storage::Site;

/// Frontmatter for a freshly created record of `kind`
pub(crate) fn scaffold(kind: ContentKind, title: &str, today: NaiveDate) -> Fields {
    let today = today.format("%Y-%m-%d").to_string();
    let value = match kind {
        ContentKind::Blog => json!({
            "title": title,
            "description": "",
            "pubDate": today,
            "tags": [],
            "draft": true,
        }),
        ContentKind::Projects => json!({
            "title": title,
            "description": "",
            "techStack": [],
            "featured": false,
            "type": "personal",
        }),
        ContentKind::Work => json!({
            "company": title,
            "role": "",
            "startDate": today,
            "achievements": [],
            "techStack": [],
        }),
        ContentKind::Garden => json!({
            "title": title,
            "description": "",
            "maturity": "seedling",
            "tags": [],
            "links": [],
        }),
    };

    match value {
        serde_json::Value::Object(fields) => fields,
        _ => Fields::new(),
    }
}

/// Creates a new content file
pub fn new_record(output: &Output, kind: ContentKind, title: &str) -> Result<()> {
    let site = Site::open_current()?;
    let store = site.content_store();

    let slug = Slug::from_title(title)?;
    if let Some(source) = store.find(kind, &slug)? {
        anyhow::bail!("{} entry '{}' already exists ({})", kind, slug, source);
    }

    let fields = scaffold(kind, title, Local::now().date_naive());
    let record = RawRecord::new(kind, format!("{}/{}.md", kind, slug), slug.clone(), fields);
    validate_record(&record)?;

    let path = store.create(kind, &slug, &record.fields, "")?;
    output.verbose_ctx("new", &format!("Wrote {}", path.display()));

    let shown = site.relative_path(&path).unwrap_or_else(|| path.clone());

    if output.is_json() {
        output.data(&json!({
            "kind": kind,
            "slug": slug,
            "path": shown.display().to_string(),
        }));
    } else {
        output.success(&format!("Created {} entry: {} ({})", kind, slug, shown.display()));
    }

    Ok(())
}

fn report_invalid(output: &Output, invalid: &InvalidContent) {
    if output.is_json() {
        let errors: Vec<_> = invalid
            .0
            .iter()
            .map(|e| {
                json!({
                    "record": e.record,
                    "field": e.field,
                    "problem": e.problem.to_string(),
                })
            })
            .collect();
        output.data(&json!({ "valid": false, "errors": errors }));
    } else {
        for error in &invalid.0 {
            output.error(&error.to_string());
        }
    }
}

/// Validates all content and reports warnings
pub fn check(output: &Output) -> Result<()> {
    let site = Site::open_current()?;
    output.verbose_ctx(
        "check",
        &format!("Reading content from: {}", site.content_dir().display()),
    );

    let collections = match site.load() {
        Ok(collections) => collections,
        Err(e) => {
            if let Some(invalid) = e.downcast_ref::<InvalidContent>() {
                report_invalid(output, invalid);
                anyhow::bail!("{} content record(s) failed validation", invalid.0.len());
            }
            return Err(e);
        }
    };

    let warnings = collections.warnings();
    let config = site.site_config();
    let routes = site_routes(&collections);
    let hidden = excluded_routes(&config.site.url, &routes, &config.sitemap.exclude);
    let published = published_posts(&collections.blog).len();
    let tags = tag_counts(&collections.blog);

    output.verbose_ctx(
        "check",
        &format!("{} route(s), {} warning(s)", routes.len(), warnings.len()),
    );

    if output.is_json() {
        let counts: serde_json::Map<_, _> = ContentKind::all()
            .iter()
            .map(|kind| (kind.to_string(), json!(collections.count(*kind))))
            .collect();

        output.data(&json!({
            "valid": true,
            "counts": counts,
            "published_posts": published,
            "tags": tags.iter().map(|(tag, n)| json!({ "tag": tag, "posts": n })).collect::<Vec<_>>(),
            "warnings": warnings,
            "sitemap_excluded": hidden,
        }));
    } else {
        output.text("Content OK");
        for kind in ContentKind::all() {
            let count = collections.count(*kind).to_string();
            output.row(&[12], &[&format!("  {}", kind), &count]);
        }
        output.text(&format!("  {} published post(s)", published));
        if !tags.is_empty() {
            let shown: Vec<_> = tags.iter().map(|(tag, n)| format!("{} ({})", tag, n)).collect();
            output.text(&format!("  tags: {}", shown.join(", ")));
        }

        for warning in &warnings {
            output.warning(&format!("{}: {}", warning.record, warning.message));
        }
        for route in &hidden {
            output.warning(&format!(
                "published route {} is excluded from the sitemap by '{}'",
                route, config.sitemap.exclude
            ));
        }
    }

    Ok(())
}

/// Column widths of the `folio list` tables (first column, slug)
const TABLE: [usize; 2] = [14, 30];

/// Filters for `folio list`
#[derive(Debug, Default)]
pub struct ListFilter {
    pub tag: Option<String>,
    pub project_type: Option<ProjectType>,
    pub maturity: Option<Maturity>,
    pub include_drafts: bool,
}

impl ListFilter {
    /// Options given that have no meaning for `kind`
    fn ignored_for(&self, kind: ContentKind) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if kind != ContentKind::Blog {
            if self.tag.is_some() {
                ignored.push("--tag");
            }
            if self.include_drafts {
                ignored.push("--all");
            }
        }
        if kind != ContentKind::Projects && self.project_type.is_some() {
            ignored.push("--type");
        }
        if kind != ContentKind::Garden && self.maturity.is_some() {
            ignored.push("--maturity");
        }
        ignored
    }
}

/// Lists a collection in site order
pub fn list(output: &Output, kind: ContentKind, filter: &ListFilter) -> Result<()> {
    let site = Site::open_current()?;
    let collections: Collections = site.load()?;

    for option in filter.ignored_for(kind) {
        output.warning(&format!("{} does not apply to {}; ignored", option, kind));
    }

    match kind {
        ContentKind::Blog => list_blog(output, &collections.blog, filter),
        ContentKind::Projects => list_projects(output, &collections.projects, filter),
        ContentKind::Work => list_work(output, &collections.work),
        ContentKind::Garden => list_garden(output, &collections.garden, filter),
    }

    Ok(())
}

fn list_blog(output: &Output, posts: &[BlogPost], filter: &ListFilter) {
    let posts = match (&filter.tag, filter.include_drafts) {
        (Some(tag), true) => with_tag(all_posts(posts), tag),
        (Some(tag), false) => posts_tagged(posts, tag),
        (None, true) => all_posts(posts),
        (None, false) => published_posts(posts),
    };

    if output.is_json() {
        let items: Vec<_> = posts
            .iter()
            .map(|p| {
                json!({
                    "slug": p.slug,
                    "title": p.title,
                    "pubDate": p.pub_date,
                    "tags": p.tags,
                    "draft": p.draft,
                    "link": p.link(),
                })
            })
            .collect();
        output.data(&items);
    } else if posts.is_empty() {
        output.text("No blog posts.");
    } else {
        output.text(&format!("Blog posts ({}):", posts.len()));
        output.row(&TABLE, &["DATE", "SLUG", "TITLE"]);
        output.rule(70);
        for post in posts {
            let marker = if post.draft { " [draft]" } else { "" };
            output.row(
                &TABLE,
                &[
                    &post.pub_date.to_string(),
                    post.slug.as_str(),
                    &format!("{}{}", post.title, marker),
                ],
            );
        }
    }
}

fn list_projects(output: &Output, projects: &[Project], filter: &ListFilter) {
    let projects = project_showcase(projects, filter.project_type);

    if output.is_json() {
        output.data(&projects);
    } else if projects.is_empty() {
        output.text("No projects.");
    } else {
        output.text(&format!("Projects ({}):", projects.len()));
        output.row(&TABLE, &["TYPE", "SLUG", "TITLE"]);
        output.rule(70);
        for project in projects {
            let marker = if project.featured { " *" } else { "" };
            output.row(
                &TABLE,
                &[
                    &project.project_type.to_string(),
                    project.slug.as_str(),
                    &format!("{}{}", project.title, marker),
                ],
            );
        }
    }
}

fn list_work(output: &Output, entries: &[WorkEntry]) {
    let entries = work_timeline(entries);

    if output.is_json() {
        output.data(&entries);
    } else if entries.is_empty() {
        output.text("No work history.");
    } else {
        output.text(&format!("Work history ({}):", entries.len()));
        for entry in entries {
            let position = format!("{} @ {}", entry.role, entry.company);
            output.row(&[20], &[&entry.period(), &position]);
        }
    }
}

fn list_garden(output: &Output, notes: &[GardenNote], filter: &ListFilter) {
    let notes = garden_index(notes, filter.maturity);

    if output.is_json() {
        output.data(&notes);
    } else if notes.is_empty() {
        output.text("No garden notes.");
    } else {
        output.text(&format!("Garden notes ({}):", notes.len()));
        output.row(&TABLE, &["MATURITY", "SLUG", "TITLE"]);
        output.rule(70);
        for note in notes {
            output.row(
                &TABLE,
                &[&note.maturity.to_string(), note.slug.as_str(), &note.title],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn scaffolds_pass_their_schema() {
        for &kind in ContentKind::all() {
            let fields = scaffold(kind, "Hello World", today());
            let record = RawRecord::new(kind, "scaffold.md", "hello-world".parse().unwrap(), fields);
            assert!(validate_record(&record).is_ok(), "{} scaffold is invalid", kind);
        }
    }

    #[test]
    fn blog_scaffold_is_a_dated_draft() {
        let fields = scaffold(ContentKind::Blog, "Hello", today());
        assert_eq!(fields["draft"], json!(true));
        assert_eq!(fields["pubDate"], json!("2024-05-01"));
    }

    #[test]
    fn ignored_filters() {
        let filter = ListFilter {
            tag: Some("rust".to_string()),
            maturity: Some(Maturity::Budding),
            ..Default::default()
        };

        assert_eq!(filter.ignored_for(ContentKind::Blog), vec!["--maturity"]);
        assert_eq!(filter.ignored_for(ContentKind::Garden), vec!["--tag"]);
        assert_eq!(filter.ignored_for(ContentKind::Work), vec!["--tag", "--maturity"]);
    }
}
