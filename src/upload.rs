//! Uploaded logo/media files.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::{FolioError, Result};

const FALLBACK_EXTENSION: &str = "bin";
const MAX_EXTENSION_LEN: usize = 10;

/// A public directory uploads are written into under random names.
pub struct UploadDir {
    dir: PathBuf,
    url_prefix: String,
}

impl UploadDir {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` under a fresh name and return its public URL.
    pub fn store(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<String> {
        fs::create_dir_all(&self.dir).map_err(|e| FolioError::storage(&self.dir, e))?;

        let filename = unique_filename(original_name);
        let path = self.dir.join(&filename);
        fs::write(&path, bytes).map_err(|e| FolioError::storage(&path, e))?;

        info!(path = %path.display(), size = bytes.len(), "upload stored");
        Ok(format!("{}/{}", self.url_prefix.trim_end_matches('/'), filename))
    }
}

/// `<unix-millis>-<random>.<ext>`, keeping a sanitized original extension.
fn unique_filename(original_name: Option<&str>) -> String {
    let ext = original_name
        .and_then(|name| Path::new(name).extension())
        .map(|ext| {
            ext.to_string_lossy()
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .take(MAX_EXTENSION_LEN)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}.{}", Utc::now().timestamp_millis(), &random[..8], ext)
}
