//! Markdown content storage
//!
//! Content lives in `content/{kind}/`, one markdown (`.md` or `.mdx`) file
//! per record. Each file has YAML frontmatter for fields and a markdown body.
//! Nested directories are allowed; the relative path becomes the slug.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::{ContentKind, Fields, Problem, RawRecord, Slug, SlugError, ValidationError};

const EXTENSIONS: &[&str] = &["md", "mdx"];

/// Raw records read from disk, plus documents that could not be parsed
#[derive(Debug, Default)]
pub struct ContentScan {
    pub records: Vec<RawRecord>,
    pub malformed: Vec<ValidationError>,
}

/// Store for content records as markdown files
pub struct ContentStore {
    /// Directory containing one subdirectory per content kind
    dir: PathBuf,
}

impl ContentStore {
    /// Creates a new content store at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the content directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the directory of one collection
    pub fn kind_dir(&self, kind: ContentKind) -> PathBuf {
        self.dir.join(kind.dir_name())
    }

    fn record_path(&self, kind: ContentKind, slug: &Slug) -> PathBuf {
        self.kind_dir(kind).join(format!("{}.md", slug))
    }

    /// Lists content files of a collection, sorted by path
    fn content_files(&self, kind: ContentKind) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let root = self.kind_dir(kind);

        if !root.exists() {
            return Ok(files);
        }

        let mut pending = vec![root];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)
                .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            {
                let entry = entry.context("Failed to read directory entry")?;
                let path = entry.path();

                if path.is_dir() {
                    pending.push(path);
                } else if path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| EXTENSIONS.contains(&e))
                {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Reads every content file of every kind
    ///
    /// I/O failures abort the scan. Files that were read but cannot be parsed
    /// are reported in [`ContentScan::malformed`].
    pub fn scan(&self) -> Result<ContentScan> {
        let mut scan = ContentScan::default();

        for &kind in ContentKind::all() {
            for path in self.content_files(kind)? {
                match self.read_from_file(kind, &path)? {
                    Ok(record) => scan.records.push(record),
                    Err(e) => scan.malformed.push(e),
                }
            }
        }

        Ok(scan)
    }

    /// Path of a content file relative to the content directory
    fn source_of(&self, path: &Path) -> String {
        path.strip_prefix(&self.dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Slug derived from a content file's path within its collection
    fn path_slug(&self, kind: ContentKind, path: &Path) -> Result<Slug, SlugError> {
        let kind_dir = self.kind_dir(kind);
        Slug::from_path(path.strip_prefix(&kind_dir).unwrap_or(path))
    }

    /// Reads one content file
    fn read_from_file(
        &self,
        kind: ContentKind,
        path: &Path,
    ) -> Result<std::result::Result<RawRecord, ValidationError>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file: {}", path.display()))?;

        let source = self.source_of(path);
        let slug = match self.path_slug(kind, path) {
            Ok(slug) => slug,
            Err(e) => return Ok(Err(ValidationError::new(source, "slug", e.into()))),
        };

        Ok(parse_document(kind, &source, slug, &content))
    }

    /// Finds the record of `kind` listed under `slug`, returning its source
    ///
    /// Any extension, nesting or blog `slug` override counts. A file whose
    /// frontmatter cannot be parsed still claims the slug of its path.
    pub fn find(&self, kind: ContentKind, slug: &Slug) -> Result<Option<String>> {
        for path in self.content_files(kind)? {
            let claimed = match self.read_from_file(kind, &path)? {
                Ok(record) => record.slug == *slug || record.listed_slug() == *slug,
                Err(_) => self.path_slug(kind, &path).ok().as_ref() == Some(slug),
            };

            if claimed {
                return Ok(Some(self.source_of(&path)));
            }
        }

        Ok(None)
    }

    /// Writes a new record atomically (temp file + rename), refusing to
    /// overwrite an existing file. Returns the path written.
    pub fn create(&self, kind: ContentKind, slug: &Slug, fields: &Fields, body: &str) -> Result<PathBuf> {
        let path = self.record_path(kind, slug);
        if path.exists() {
            anyhow::bail!("Content file already exists: {}", path.display());
        }

        let dir = path.parent().unwrap_or(&self.dir);
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let temp_path = path.with_extension("md.tmp");
        let content = render_document(fields, body)?;

        // Write to temp file first
        fs::write(&temp_path, &content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

        // Atomic rename
        fs::rename(&temp_path, &path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        Ok(path)
    }
}

/// Splits a markdown document into frontmatter fields and body
pub fn parse_document(
    kind: ContentKind,
    source: &str,
    slug: Slug,
    content: &str,
) -> std::result::Result<RawRecord, ValidationError> {
    let malformed = |message: String| {
        ValidationError::new(source, "frontmatter", Problem::Malformed(message))
    };

    let content = content.trim_start_matches('\u{feff}').trim_start();

    let rest = content
        .strip_prefix("---")
        .ok_or_else(|| malformed("missing frontmatter (must start with ---)".to_string()))?;

    // The closing delimiter must start a line
    let (yaml, body) = if let Some(rest) = rest.strip_prefix("\n---") {
        ("", rest)
    } else {
        let end = rest
            .find("\n---")
            .ok_or_else(|| malformed("missing frontmatter end delimiter (---)".to_string()))?;
        (&rest[..end], &rest[end + 4..])
    };

    let fields: Fields = if yaml.trim().is_empty() {
        Fields::new()
    } else {
        serde_yaml::from_str(yaml).map_err(|e| malformed(e.to_string()))?
    };

    Ok(RawRecord::new(kind, source, slug, fields).with_body(body.trim()))
}

/// Renders fields and body as a markdown document with frontmatter
pub fn render_document(fields: &Fields, body: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(fields).context("Failed to serialize frontmatter")?;

    let mut content = String::new();
    content.push_str("---\n");
    content.push_str(&yaml);
    content.push_str("---\n\n");
    content.push_str(body);

    if !content.ends_with('\n') {
        content.push('\n');
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn slug(s: &str) -> Slug {
        s.parse().unwrap()
    }

    #[test]
    fn scan_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("content"));

        let scan = store.scan().unwrap();
        assert!(scan.records.is_empty());
        assert!(scan.malformed.is_empty());
    }

    #[test]
    fn parse_frontmatter_and_body() {
        let doc = "---\ntitle: Hello\npubDate: 2024-01-01\ntags: [a, b]\n---\n\n# Heading\n\nText.\n";
        let record = parse_document(ContentKind::Blog, "blog/hello.md", slug("hello"), doc).unwrap();

        assert_eq!(record.fields["title"], json!("Hello"));
        assert_eq!(record.fields["pubDate"], json!("2024-01-01"));
        assert_eq!(record.fields["tags"], json!(["a", "b"]));
        assert_eq!(record.body, "# Heading\n\nText.");
    }

    #[test]
    fn body_may_contain_horizontal_rules() {
        let doc = "---\ntitle: Rules\n---\nabove\n\n---\n\nbelow\n";
        let record = parse_document(ContentKind::Blog, "blog/r.md", slug("r"), doc).unwrap();

        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.body, "above\n\n---\n\nbelow");
    }

    #[test]
    fn empty_frontmatter() {
        let record = parse_document(ContentKind::Garden, "garden/e.md", slug("e"), "---\n---\nbody").unwrap();
        assert!(record.fields.is_empty());
        assert_eq!(record.body, "body");
    }

    #[test]
    fn missing_frontmatter_is_malformed() {
        let err = parse_document(ContentKind::Blog, "blog/x.md", slug("x"), "# No frontmatter").unwrap_err();
        assert_eq!(err.record, "blog/x.md");
        assert_eq!(err.field, "frontmatter");
        assert!(matches!(err.problem, Problem::Malformed(_)));

        let err = parse_document(ContentKind::Blog, "blog/x.md", slug("x"), "---\ntitle: x\n").unwrap_err();
        assert!(matches!(err.problem, Problem::Malformed(_)));
    }

    #[test]
    fn invalid_yaml_is_malformed() {
        let err = parse_document(ContentKind::Blog, "blog/x.md", slug("x"), "---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err.problem, Problem::Malformed(_)));
    }

    #[test]
    fn scan_reads_every_kind() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        write(&content, "blog/First Post.md", "---\ntitle: First\n---\nHi");
        write(&content, "blog/2024/recap.mdx", "---\ntitle: Recap\n---\n");
        write(&content, "garden/ideas.md", "---\ntitle: Ideas\n---\n");
        write(&content, "blog/notes.txt", "ignored");
        write(&content, "work/broken.md", "no frontmatter");

        let store = ContentStore::new(&content);
        let scan = store.scan().unwrap();

        let sources: Vec<_> = scan.records.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["blog/2024/recap.mdx", "blog/First Post.md", "garden/ideas.md"]);

        let slugs: Vec<_> = scan.records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["2024/recap", "first-post", "ideas"]);
        assert_eq!(scan.records[0].kind, ContentKind::Blog);
        assert_eq!(scan.records[2].kind, ContentKind::Garden);

        assert_eq!(scan.malformed.len(), 1);
        assert_eq!(scan.malformed[0].record, "work/broken.md");
    }

    #[test]
    fn create_and_read_back() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("content"));

        let mut fields = Fields::new();
        fields.insert("title".into(), json!("New: a post"));
        fields.insert("tags".into(), json!([]));

        let path = store
            .create(ContentKind::Blog, &slug("new-post"), &fields, "Body text")
            .unwrap();
        assert!(path.ends_with("blog/new-post.md"));
        assert_eq!(
            store.find(ContentKind::Blog, &slug("new-post")).unwrap().as_deref(),
            Some("blog/new-post.md")
        );

        let scan = store.scan().unwrap();
        assert_eq!(scan.records.len(), 1);
        assert_eq!(scan.records[0].fields, fields);
        assert_eq!(scan.records[0].body, "Body text");
    }

    #[test]
    fn find_sees_every_file_that_claims_a_slug() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        write(&content, "blog/hello.mdx", "---\ntitle: Hello\n---\n");
        write(&content, "blog/2024/recap.md", "---\ntitle: Recap\n---\n");
        write(&content, "blog/long-file-name.md", "---\nslug: short\n---\n");
        write(&content, "garden/broken.md", "no frontmatter");
        let store = ContentStore::new(&content);

        let find = |kind, s: &str| store.find(kind, &slug(s)).unwrap();
        assert_eq!(find(ContentKind::Blog, "hello").as_deref(), Some("blog/hello.mdx"));
        assert_eq!(find(ContentKind::Blog, "2024/recap").as_deref(), Some("blog/2024/recap.md"));
        assert_eq!(find(ContentKind::Blog, "short").as_deref(), Some("blog/long-file-name.md"));
        assert_eq!(find(ContentKind::Garden, "broken").as_deref(), Some("garden/broken.md"));
        assert_eq!(find(ContentKind::Blog, "recap"), None);
        assert_eq!(find(ContentKind::Garden, "hello"), None);
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("content"));

        store.create(ContentKind::Garden, &slug("n"), &Fields::new(), "").unwrap();
        assert!(store.create(ContentKind::Garden, &slug("n"), &Fields::new(), "").is_err());
    }

    #[test]
    fn atomic_write_no_temp_file_left() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("content"));

        let path = store.create(ContentKind::Work, &slug("acme"), &Fields::new(), "").unwrap();

        let temp_path = path.with_extension("md.tmp");
        assert!(!temp_path.exists(), "Temp file should be removed after atomic write");
        assert!(path.exists());
    }
}
