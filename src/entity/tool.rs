// src/entity/tool.rs
use serde::{Deserialize, Serialize};

use super::{merge, require};
use crate::error::Result;

/// Buckets present in a fresh tools document.
pub const DEFAULT_TOOL_CATEGORIES: [&str; 4] = ["development", "design", "productivity", "hardware"];

/// A tool listed under a category; the name is unique within its category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tool {
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolDraft {
    pub category: String,
    pub name: String,
    pub description: Option<String>,
}

/// Setting `name` renames the tool.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Tool {
    pub fn from_draft(draft: &ToolDraft) -> Result<Self> {
        require("category", &draft.category)?;
        require("name", &draft.name)?;
        Ok(Tool {
            name: draft.name.clone(),
            description: draft.description.clone().unwrap_or_default(),
        })
    }

    pub fn apply_patch(&mut self, patch: ToolPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.description, patch.description);
    }
}
