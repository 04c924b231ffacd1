use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::document::{read_document, write_document, DocState};
use crate::entity::{Tool, ToolDraft, ToolPatch, DEFAULT_TOOL_CATEGORIES};
use crate::error::{FolioError, Result};

/// Category name -> tools, in insertion order.
pub type ToolCategories = IndexMap<String, Vec<Tool>>;

/// On-disk shape of the tools document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsDocument {
    pub categories: ToolCategories,
}

impl Default for ToolsDocument {
    fn default() -> Self {
        Self {
            categories: DEFAULT_TOOL_CATEGORIES
                .iter()
                .map(|c| (c.to_string(), Vec::new()))
                .collect(),
        }
    }
}

/// CRUD over the tools document, keyed by `(category, name)`.
pub struct ToolStore {
    path: PathBuf,
}

impl ToolStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every category with its tools. Never fails.
    pub fn list(&self) -> ToolCategories {
        read_document::<ToolsDocument>(&self.path).doc.categories
    }

    /// Add a tool, creating its category on first use.
    pub fn create(&self, draft: ToolDraft) -> Result<Tool> {
        let tool = Tool::from_draft(&draft)?;

        let loaded = read_document::<ToolsDocument>(&self.path);
        let mut doc = loaded.doc;

        let bucket = doc.categories.entry(draft.category.clone()).or_default();
        if bucket.iter().any(|t| t.name == tool.name) {
            return Err(FolioError::Conflict {
                kind: "tool",
                id: format!("{}/{}", draft.category, tool.name),
            });
        }
        bucket.push(tool.clone());

        write_document(&self.path, &doc, loaded.state)?;

        info!(category = %draft.category, name = %tool.name, "tool created");
        Ok(tool)
    }

    /// Merge `patch` over the tool named `original_name` in `category`.
    pub fn update(&self, category: &str, original_name: &str, patch: ToolPatch) -> Result<Tool> {
        let loaded = read_document::<ToolsDocument>(&self.path);
        let mut doc = loaded.doc;

        let bucket = doc
            .categories
            .get_mut(category)
            .ok_or_else(|| FolioError::NotFound {
                kind: "tool category",
                id: category.to_string(),
            })?;

        let index = bucket
            .iter()
            .position(|t| t.name == original_name)
            .ok_or_else(|| FolioError::NotFound {
                kind: "tool",
                id: format!("{}/{}", category, original_name),
            })?;

        let mut updated = bucket[index].clone();
        updated.apply_patch(patch);

        if updated.name.trim().is_empty() {
            return Err(FolioError::validation("name", "is required"));
        }
        if updated.name != original_name
            && bucket
                .iter()
                .enumerate()
                .any(|(i, t)| i != index && t.name == updated.name)
        {
            return Err(FolioError::Conflict {
                kind: "tool",
                id: format!("{}/{}", category, updated.name),
            });
        }

        bucket[index] = updated.clone();
        write_document(&self.path, &doc, loaded.state)?;

        info!(category, name = original_name, new_name = %updated.name, "tool updated");
        Ok(updated)
    }

    /// Remove a tool. Unknown categories and names are not an error.
    pub fn delete(&self, category: &str, name: &str) -> Result<bool> {
        let loaded = read_document::<ToolsDocument>(&self.path);
        let mut doc = loaded.doc;

        let Some(bucket) = doc.categories.get_mut(category) else {
            return Ok(false);
        };
        let before = bucket.len();
        bucket.retain(|t| t.name != name);
        if bucket.len() == before {
            return Ok(false);
        }

        write_document(&self.path, &doc, loaded.state)?;

        info!(category, name, "tool deleted");
        Ok(true)
    }

    /// Write the seeded document if none exists yet.
    pub fn ensure_exists(&self) -> Result<bool> {
        let loaded = read_document::<ToolsDocument>(&self.path);
        if loaded.state == DocState::Missing {
            write_document(&self.path, &loaded.doc, loaded.state)?;
            return Ok(true);
        }
        Ok(false)
    }
}
