// src/entity/project.rs
use serde::{Deserialize, Serialize};

use super::{merge, require, Entity, Kind, LabeledLink};
use crate::error::{FolioError, Result};
use crate::slug::{derive_slug, is_valid_slug};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "super::null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub title: String,
    /// Role with the period in parentheses, e.g. "creator (jul 2024)"
    #[serde(deserialize_with = "super::null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub long_description: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub href: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub links: Vec<LabeledLink>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub live_preview_url: String,
    /// Uploaded demo media (GIF/SVG/MP4/WebM) URL
    #[serde(deserialize_with = "super::null_as_default")]
    pub demo_media: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub youtube_url: String,
    /// Image URLs
    #[serde(deserialize_with = "super::null_as_default")]
    pub diagrams: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    pub title: String,
    pub role: String,
    pub description: String,
    pub long_description: Option<String>,
    pub href: Option<String>,
    pub tags: Option<Vec<String>>,
    pub links: Option<Vec<LabeledLink>>,
    pub live_preview_url: Option<String>,
    pub demo_media: Option<String>,
    pub youtube_url: Option<String>,
    pub diagrams: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub href: Option<String>,
    pub tags: Option<Vec<String>>,
    pub links: Option<Vec<LabeledLink>>,
    pub live_preview_url: Option<String>,
    pub demo_media: Option<String>,
    pub youtube_url: Option<String>,
    pub diagrams: Option<Vec<String>>,
}

impl Entity for Project {
    const KIND: Kind = Kind::Project;
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    fn key(&self) -> &str {
        &self.slug
    }

    fn from_draft(draft: ProjectDraft) -> Result<Self> {
        require("title", &draft.title)?;
        if draft.role.trim().is_empty() && draft.description.trim().is_empty() {
            return Err(FolioError::validation(
                "role",
                "role or description is required",
            ));
        }

        let slug = derive_slug(&draft.title);
        if !is_valid_slug(&slug) {
            return Err(FolioError::validation(
                "title",
                "must contain at least one letter or digit",
            ));
        }

        Ok(Project {
            slug,
            title: draft.title,
            role: draft.role,
            description: draft.description,
            long_description: draft.long_description.unwrap_or_default(),
            href: draft.href.unwrap_or_default(),
            tags: draft.tags.unwrap_or_default(),
            links: draft.links.unwrap_or_default(),
            live_preview_url: draft.live_preview_url.unwrap_or_default(),
            demo_media: draft.demo_media.unwrap_or_default(),
            youtube_url: draft.youtube_url.unwrap_or_default(),
            diagrams: draft.diagrams.unwrap_or_default(),
        })
    }

    fn apply_patch(&mut self, patch: ProjectPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.role, patch.role);
        merge(&mut self.description, patch.description);
        merge(&mut self.long_description, patch.long_description);
        merge(&mut self.href, patch.href);
        merge(&mut self.tags, patch.tags);
        merge(&mut self.links, patch.links);
        merge(&mut self.live_preview_url, patch.live_preview_url);
        merge(&mut self.demo_media, patch.demo_media);
        merge(&mut self.youtube_url, patch.youtube_url);
        merge(&mut self.diagrams, patch.diagrams);
    }

    fn chronology(&self) -> Option<&str> {
        Some(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft() {
        let project = Project::from_draft(ProjectDraft {
            title: "Tiny Compiler".to_string(),
            role: "creator (jul 2024)".to_string(),
            description: "A toy compiler".to_string(),
            tags: Some(vec!["rust".to_string()]),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(project.slug, "tiny-compiler");
        assert_eq!(project.long_description, "");
        assert_eq!(project.tags, vec!["rust"]);
        assert_eq!(project.chronology(), Some("creator (jul 2024)"));
    }

    #[test]
    fn test_from_draft_missing_title() {
        let result = Project::from_draft(ProjectDraft {
            role: "creator".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(FolioError::Validation { field, .. }) if field == "title"));
    }

    #[test]
    fn test_patch_from_json_distinguishes_empty_and_omitted() {
        let mut project = Project::from_draft(ProjectDraft {
            title: "Tiny Compiler".to_string(),
            description: "A toy compiler".to_string(),
            diagrams: Some(vec!["/d/1.png".to_string()]),
            youtube_url: Some("https://youtu.be/x".to_string()),
            ..Default::default()
        })
        .unwrap();

        let patch: ProjectPatch =
            serde_json::from_str(r#"{"diagrams": [], "liveGreeting": "ignored"}"#).unwrap();
        project.apply_patch(patch);

        assert!(project.diagrams.is_empty());
        assert_eq!(project.youtube_url, "https://youtu.be/x");
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{
            "slug": "p",
            "title": "P",
            "role": "creator (jan 2024)",
            "livePreviewUrl": "https://p.dev",
            "youtubeUrl": "https://youtu.be/p",
            "demoMedia": "/logos/demo.gif"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.live_preview_url, "https://p.dev");
        assert_eq!(project.youtube_url, "https://youtu.be/p");
        assert_eq!(project.demo_media, "/logos/demo.gif");
    }
}
