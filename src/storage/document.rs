//! Whole-document JSON persistence.
//!
//! Every store reads its entire file, changes it in memory and writes the
//! entire file back. Reads never fail: a missing or unparseable file loads
//! as the empty document. Writes go to a sibling temp file that is renamed
//! over the original.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{FolioError, Result};

/// What was found on disk when a document was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocState {
    Missing,
    Valid,
    /// Unreadable or not the expected shape; loaded as empty
    Corrupt,
}

#[derive(Debug)]
pub struct Loaded<T> {
    pub doc: T,
    pub state: DocState,
}

/// Load a document, falling back to `T::default()` on any failure.
pub fn read_document<T>(path: &Path) -> Loaded<T>
where
    T: DeserializeOwned + Default,
{
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "document missing, using empty");
            return Loaded {
                doc: T::default(),
                state: DocState::Missing,
            };
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "document unreadable, using empty");
            return Loaded {
                doc: T::default(),
                state: DocState::Corrupt,
            };
        }
    };

    match serde_json::from_str(&text) {
        Ok(doc) => Loaded {
            doc,
            state: DocState::Valid,
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "document corrupt, using empty");
            Loaded {
                doc: T::default(),
                state: DocState::Corrupt,
            }
        }
    }
}

/// Pretty-print `doc` and atomically replace the file at `path`.
///
/// When the previous load found the file corrupt, its bytes are kept as
/// `<file>.corrupt` before being replaced.
pub fn write_document<T>(path: &Path, doc: &T, previous: DocState) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FolioError::storage(parent, e))?;
    }

    if previous == DocState::Corrupt && path.exists() {
        let backup = sibling(path, "corrupt");
        fs::copy(path, &backup).map_err(|e| FolioError::storage(&backup, e))?;
        warn!(path = %path.display(), backup = %backup.display(), "replacing corrupt document");
    }

    let mut json = serde_json::to_string_pretty(doc)?;
    json.push('\n');

    let tmp = sibling(path, "tmp");
    fs::write(&tmp, json).map_err(|e| FolioError::storage(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(FolioError::storage(path, e));
    }

    debug!(path = %path.display(), "document written");
    Ok(())
}

/// `work.json` -> `work.json.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        items: Vec<String>,
    }

    #[test]
    fn test_read_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        let loaded: Loaded<Doc> = read_document(&tmp.path().join("none.json"));
        assert_eq!(loaded.state, DocState::Missing);
        assert!(loaded.doc.items.is_empty());
    }

    #[test]
    fn test_read_corrupt_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.json");

        fs::write(&path, "{ not json").unwrap();
        let loaded: Loaded<Doc> = read_document(&path);
        assert_eq!(loaded.state, DocState::Corrupt);
        assert!(loaded.doc.items.is_empty());

        // Valid JSON without the wrapper is corrupt too
        fs::write(&path, "[1, 2, 3]").unwrap();
        let loaded: Loaded<Doc> = read_document(&path);
        assert_eq!(loaded.state, DocState::Corrupt);
    }

    #[test]
    fn test_write_then_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/doc.json");
        let doc = Doc {
            items: vec!["a".to_string(), "b".to_string()],
        };

        write_document(&path, &doc, DocState::Missing).unwrap();

        let loaded: Loaded<Doc> = read_document(&path);
        assert_eq!(loaded.state, DocState::Valid);
        assert_eq!(loaded.doc, doc);
        assert!(!tmp.path().join("nested/dir/doc.json.tmp").exists());
    }

    #[test]
    fn test_write_is_pretty_printed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.json");
        let doc = Doc {
            items: vec!["a".to_string()],
        };

        write_document(&path, &doc, DocState::Missing).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"items\": [\n    \"a\"\n  ]\n}\n");
    }

    #[test]
    fn test_write_over_corrupt_keeps_backup() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.json");
        fs::write(&path, "garbage").unwrap();

        let loaded: Loaded<Doc> = read_document(&path);
        write_document(&path, &loaded.doc, loaded.state).unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("doc.json.corrupt")).unwrap(),
            "garbage"
        );
        let reread: Loaded<Doc> = read_document(&path);
        assert_eq!(reread.state, DocState::Valid);
    }

    #[test]
    fn test_write_failure_is_storage_error() {
        let tmp = TempDir::new().unwrap();
        // A directory where the file should go makes the rename fail
        let path = tmp.path().join("doc.json");
        fs::create_dir_all(path.join("child")).unwrap();

        let result = write_document(&path, &Doc::default(), DocState::Valid);
        assert!(matches!(result, Err(FolioError::Storage { .. })));
        assert!(!tmp.path().join("doc.json.tmp").exists());
    }
}
