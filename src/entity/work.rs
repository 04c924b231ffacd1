// src/entity/work.rs
use serde::{Deserialize, Serialize};

use super::{merge, require, Entity, Kind, LabeledLink};
use crate::error::{FolioError, Result};
use crate::slug::{derive_slug, is_valid_slug};

/// A project done while in a role; has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkProject {
    #[serde(deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub links: Vec<LabeledLink>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Work {
    #[serde(deserialize_with = "super::null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub title: String,
    /// Company site, "" when absent
    #[serde(deserialize_with = "super::null_as_default")]
    pub href: String,
    /// Logo URL, "" when absent
    #[serde(deserialize_with = "super::null_as_default")]
    pub logo: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub role: String,
    /// e.g. "Jan 2022 – Present"
    #[serde(deserialize_with = "super::null_as_default")]
    pub period: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub long_description: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub projects: Vec<WorkProject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkDraft {
    pub title: String,
    pub href: Option<String>,
    pub logo: Option<String>,
    pub role: String,
    pub period: String,
    pub description: String,
    /// Falls back to `description`
    pub long_description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub projects: Option<Vec<WorkProject>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkPatch {
    pub title: Option<String>,
    pub href: Option<String>,
    pub logo: Option<String>,
    pub role: Option<String>,
    pub period: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub projects: Option<Vec<WorkProject>>,
}

impl Entity for Work {
    const KIND: Kind = Kind::Work;
    type Draft = WorkDraft;
    type Patch = WorkPatch;

    fn key(&self) -> &str {
        &self.slug
    }

    fn from_draft(draft: WorkDraft) -> Result<Self> {
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

        let long_description = draft
            .long_description
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| draft.description.clone());

        Ok(Work {
            slug,
            title: draft.title,
            href: draft.href.unwrap_or_default(),
            logo: draft.logo.unwrap_or_default(),
            role: draft.role,
            period: draft.period,
            description: draft.description,
            long_description,
            tags: draft.tags.unwrap_or_default(),
            projects: draft.projects.unwrap_or_default(),
        })
    }

    fn apply_patch(&mut self, patch: WorkPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.href, patch.href);
        merge(&mut self.logo, patch.logo);
        merge(&mut self.role, patch.role);
        merge(&mut self.period, patch.period);
        merge(&mut self.description, patch.description);
        merge(&mut self.long_description, patch.long_description);
        merge(&mut self.tags, patch.tags);
        merge(&mut self.projects, patch.projects);
    }

    fn chronology(&self) -> Option<&str> {
        Some(&self.period)
    }
}
