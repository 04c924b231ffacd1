//! Blog posts stored as `.mdx` files with YAML frontmatter.
//!
//! The posts themselves are authored outside the admin panel; this module
//! only lists them for the dashboard and deletes them on request.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_yaml::Value;
use tracing::{info, warn};

use crate::error::{FolioError, Result};

const POST_EXTENSION: &str = "mdx";

/// One row of the post listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    /// Frontmatter date as written, "" when absent
    pub date: String,
    pub filename: String,
}

pub struct BlogIndex {
    dir: PathBuf,
}

impl BlogIndex {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All posts, newest first. Posts without a parseable date go last.
    /// A missing directory lists as empty.
    pub fn list(&self) -> Vec<PostSummary> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(dir = %self.dir.display(), error = %e, "cannot read posts directory");
                }
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == POST_EXTENSION))
            .collect();
        paths.sort();

        let mut posts: Vec<(Option<NaiveDate>, PostSummary)> = paths
            .iter()
            .filter_map(|path| match fs::read_to_string(path) {
                Ok(content) => Some(summarize(path, &content)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable post");
                    None
                }
            })
            .map(|post| (parse_post_date(&post.date), post))
            .collect();

        posts.sort_by(|(a, _), (b, _)| b.cmp(a));
        posts.into_iter().map(|(_, post)| post).collect()
    }

    /// Delete `<slug>.mdx`. Any stem `list` reports is accepted; only names
    /// that would leave the posts directory are refused.
    pub fn delete(&self, slug: &str) -> Result<()> {
        if slug.is_empty() || slug == ".." || slug.contains(['/', '\\', '\0']) {
            return Err(FolioError::validation("slug", "invalid post slug"));
        }

        let path = self.dir.join(format!("{}.{}", slug, POST_EXTENSION));
        if !path.is_file() {
            return Err(FolioError::NotFound {
                kind: "post",
                id: slug.to_string(),
            });
        }

        fs::remove_file(&path).map_err(|e| FolioError::storage(&path, e))?;
        info!(slug, "post deleted");
        Ok(())
    }
}

fn summarize(path: &Path, content: &str) -> PostSummary {
    let slug = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let frontmatter = extract_frontmatter(content).and_then(|yaml| {
        serde_yaml::from_str::<Value>(yaml)
            .map_err(|e| warn!(path = %path.display(), error = %e, "invalid frontmatter"))
            .ok()
    });

    let field = |key: &str| {
        frontmatter
            .as_ref()
            .and_then(|fm| fm.get(key))
            .and_then(scalar_to_string)
    };

    PostSummary {
        title: field("title").unwrap_or_else(|| slug.clone()),
        date: field("date").unwrap_or_default(),
        slug,
        filename,
    }
}

/// Text between a leading `---` line and the next `---` line.
fn extract_frontmatter(content: &str) -> Option<&str> {
    let rest = content.trim_start_matches('\u{feff}').trim_start();
    let rest = rest.strip_prefix("---")?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    let rest = rest.strip_prefix('\n')?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse the date formats posts are written with.
pub fn parse_post_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.date_naive());
    }
    ["%B %d, %Y", "%b %d, %Y", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
}
