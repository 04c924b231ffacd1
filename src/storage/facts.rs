use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::info;

use super::document::{read_document, write_document};
use crate::error::{FolioError, Result};

/// Opaque JSON document edited wholesale by the admin panel.
pub struct FactsStore {
    path: PathBuf,
}

/// Shape served when nothing has been saved yet
pub fn empty_facts() -> Value {
    json!({ "funFacts": [] })
}

impl FactsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current document, or the empty shape when missing or unreadable
    pub fn get(&self) -> Value {
        match read_document::<Option<Value>>(&self.path).doc {
            Some(value @ Value::Object(_)) => value,
            _ => empty_facts(),
        }
    }

    /// Replace the whole document. Only JSON objects are accepted.
    pub fn replace(&self, value: Value) -> Result<()> {
        if !value.is_object() {
            return Err(FolioError::validation("body", "must be a JSON object"));
        }
        let previous = read_document::<Option<Value>>(&self.path).state;
        write_document(&self.path, &value, previous)?;
        info!(path = %self.path.display(), "fun facts replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_default() {
        let tmp = TempDir::new().unwrap();
        let store = FactsStore::new(tmp.path().join("fun-facts.json"));
        assert_eq!(store.get(), json!({ "funFacts": [] }));
    }

    #[test]
    fn test_replace_and_get() {
        let tmp = TempDir::new().unwrap();
        let store = FactsStore::new(tmp.path().join("fun-facts.json"));

        let facts = json!({ "funFacts": ["I have a cat", "I brew coffee"] });
        store.replace(facts.clone()).unwrap();
        assert_eq!(store.get(), facts);
    }

    #[test]
    fn test_replace_rejects_non_object() {
        let tmp = TempDir::new().unwrap();
        let store = FactsStore::new(tmp.path().join("fun-facts.json"));

        let result = store.replace(json!(["not", "an", "object"]));
        assert!(matches!(result, Err(FolioError::Validation { .. })));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_non_object_on_disk_reads_as_default() {
        let tmp = TempDir::new().unwrap();
        let store = FactsStore::new(tmp.path().join("fun-facts.json"));
        std::fs::write(store.path(), "[1, 2]").unwrap();
        assert_eq!(store.get(), empty_facts());
    }
}
