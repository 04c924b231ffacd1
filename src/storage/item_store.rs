use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::document::{read_document, write_document, DocState};
use crate::chronology::{parse_ordinal, sort_descending};
use crate::entity::Entity;
use crate::error::{FolioError, Result};

/// On-disk shape shared by work, projects and links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsDocument<E> {
    pub items: Vec<E>,
}

impl<E> Default for ItemsDocument<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// CRUD over one `{ "items": [...] }` document.
pub struct ItemStore<E: Entity> {
    path: PathBuf,
    _entity: PhantomData<E>,
}

impl<E: Entity> ItemStore<E> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _entity: PhantomData,
        }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All items in stored order. Never fails; an unreadable document is empty.
    pub fn list(&self) -> Vec<E> {
        read_document::<ItemsDocument<E>>(&self.path).doc.items
    }

    /// All items, most recent period first for kinds that carry one.
    ///
    /// Kinds without a chronology come back in stored order.
    pub fn list_ordered(&self) -> Vec<E> {
        let mut items = self.list();
        sort_descending(&mut items, |item| {
            item.chronology().map(parse_ordinal).unwrap_or(0)
        });
        items
    }

    /// Find an item by its identity
    pub fn get(&self, key: &str) -> Option<E> {
        self.list().into_iter().find(|item| item.key() == key)
    }

    /// Validate and append a new item, rejecting a taken identity.
    pub fn create(&self, draft: E::Draft) -> Result<E> {
        let item = E::from_draft(draft)?;

        let loaded = read_document::<ItemsDocument<E>>(&self.path);
        let mut doc = loaded.doc;

        if doc.items.iter().any(|existing| existing.key() == item.key()) {
            return Err(FolioError::Conflict {
                kind: E::KIND.name(),
                id: item.key().to_string(),
            });
        }

        doc.items.push(item.clone());
        write_document(&self.path, &doc, loaded.state)?;

        info!(kind = %E::KIND, id = item.key(), "created");
        Ok(item)
    }

    /// Merge `patch` over the item currently identified by `key`.
    pub fn update(&self, key: &str, patch: E::Patch) -> Result<E> {
        let loaded = read_document::<ItemsDocument<E>>(&self.path);
        let mut doc = loaded.doc;

        let index = doc
            .items
            .iter()
            .position(|item| item.key() == key)
            .ok_or_else(|| FolioError::NotFound {
                kind: E::KIND.name(),
                id: key.to_string(),
            })?;

        let mut updated = doc.items[index].clone();
        updated.apply_patch(patch);

        if updated.key().trim().is_empty() {
            return Err(FolioError::validation("key", "cannot be blank"));
        }
        if updated.key() != key
            && doc
                .items
                .iter()
                .enumerate()
                .any(|(i, item)| i != index && item.key() == updated.key())
        {
            return Err(FolioError::Conflict {
                kind: E::KIND.name(),
                id: updated.key().to_string(),
            });
        }

        doc.items[index] = updated.clone();
        write_document(&self.path, &doc, loaded.state)?;

        info!(kind = %E::KIND, id = key, new_id = updated.key(), "updated");
        Ok(updated)
    }

    /// Remove the item identified by `key`. Absent keys are not an error.
    ///
    /// Returns whether anything was removed.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let loaded = read_document::<ItemsDocument<E>>(&self.path);
        let mut doc = loaded.doc;

        let before = doc.items.len();
        doc.items.retain(|item| item.key() != key);
        if doc.items.len() == before {
            return Ok(false);
        }

        write_document(&self.path, &doc, loaded.state)?;

        info!(kind = %E::KIND, id = key, "deleted");
        Ok(true)
    }

    /// Write an empty document if none exists yet.
    pub fn ensure_exists(&self) -> Result<bool> {
        let loaded = read_document::<ItemsDocument<E>>(&self.path);
        if loaded.state == DocState::Missing {
            write_document(&self.path, &loaded.doc, loaded.state)?;
            return Ok(true);
        }
        Ok(false)
    }
}
