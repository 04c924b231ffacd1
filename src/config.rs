//! Site configuration loaded from `folio.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::storage::StoreConfig;

pub const DEFAULT_CONFIG_FILE: &str = "folio.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind: String,
    /// Directory holding the JSON documents
    pub data_dir: PathBuf,
    /// Directory of `.mdx` blog posts
    pub posts_dir: PathBuf,
    /// Where uploaded logos are written
    pub upload_dir: PathBuf,
    /// Public URL prefix of `upload_dir`
    pub upload_url_prefix: String,
    /// Per-kind overrides, relative to `data_dir` unless absolute
    pub paths: KindPaths,
    /// Admin credentials; mutating routes are refused without them
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindPaths {
    pub work: Option<PathBuf>,
    pub projects: Option<PathBuf>,
    pub links: Option<PathBuf>,
    pub tools: Option<PathBuf>,
    pub fun_facts: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    /// Argon2 PHC string, see `folio hash-password`
    pub password_hash: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            data_dir: PathBuf::from("data"),
            posts_dir: PathBuf::from("posts"),
            upload_dir: PathBuf::from("public/logos"),
            upload_url_prefix: "/logos".to_string(),
            paths: KindPaths::default(),
            admin: None,
        }
    }
}

impl Config {
    /// Load from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(FolioError::Config(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        Self::from_yaml(&text)
            .map_err(|e| FolioError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Document paths with overrides applied
    pub fn store_config(&self) -> StoreConfig {
        let defaults = StoreConfig::in_dir(&self.data_dir);
        let resolve = |custom: &Option<PathBuf>, default: PathBuf| match custom {
            Some(p) => self.data_dir.join(p),
            None => default,
        };

        StoreConfig {
            work: resolve(&self.paths.work, defaults.work),
            projects: resolve(&self.paths.projects, defaults.projects),
            links: resolve(&self.paths.links, defaults.links),
            tools: resolve(&self.paths.tools, defaults.tools),
            fun_facts: resolve(&self.paths.fun_facts, defaults.fun_facts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(&tmp.path().join("folio.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            "bind: 0.0.0.0:8080\nadmin:\n  username: me\n  password_hash: \"$argon2id$x\"\n",
        )
        .unwrap();

        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        let admin = config.admin.unwrap();
        assert_eq!(admin.username, "me");
        assert_eq!(admin.password_hash, "$argon2id$x");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("folio.yaml");
        fs::write(&path, "bind: [unterminated").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(FolioError::Config(_))));
    }

    #[test]
    fn test_store_config_overrides() {
        let config = Config::from_yaml(
            "data_dir: /srv/site\npaths:\n  work: career.json\n  tools: /etc/tools.json\n",
        )
        .unwrap();
        let stores = config.store_config();

        assert_eq!(stores.work, PathBuf::from("/srv/site/career.json"));
        assert_eq!(stores.projects, PathBuf::from("/srv/site/projects.json"));
        // Absolute overrides replace the data dir
        assert_eq!(stores.tools, PathBuf::from("/etc/tools.json"));
    }
}
