// src/entity/link.rs
use serde::{Deserialize, Serialize};

use super::{merge, require, Entity, Kind};
use crate::error::Result;

/// An external link; the title is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "super::null_as_default")]
    pub title: String,
    /// The URL this link points to
    #[serde(deserialize_with = "super::null_as_default")]
    pub href: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkDraft {
    pub title: String,
    pub href: String,
}

/// Setting `title` renames the link.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub href: Option<String>,
}

impl Entity for Link {
    const KIND: Kind = Kind::Link;
    type Draft = LinkDraft;
    type Patch = LinkPatch;

    fn key(&self) -> &str {
        &self.title
    }

    fn from_draft(draft: LinkDraft) -> Result<Self> {
        require("title", &draft.title)?;
        require("href", &draft.href)?;
        Ok(Link {
            title: draft.title,
            href: draft.href,
        })
    }

    fn apply_patch(&mut self, patch: LinkPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.href, patch.href);
    }
}
