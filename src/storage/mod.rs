//! Flat-file content storage.
//!
//! One pretty-printed JSON document per kind. Each operation reads the whole
//! document, changes it in memory and writes it back, so callers that share
//! a data directory must serialize their writes (the HTTP server holds the
//! [`ContentStore`] behind a single mutex). Separate processes writing the
//! same files are not coordinated: the last write wins.

mod document;
mod facts;
mod item_store;
mod tool_store;

pub use document::{read_document, write_document, DocState, Loaded};
pub use facts::{empty_facts, FactsStore};
pub use item_store::{ItemStore, ItemsDocument};
pub use tool_store::{ToolCategories, ToolStore, ToolsDocument};

use std::path::{Path, PathBuf};

use tracing::info;

use crate::entity::{Kind, Link, Project, Work};
use crate::error::Result;

pub const FUN_FACTS_FILE: &str = "fun-facts.json";

/// Resolved document path for every kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub work: PathBuf,
    pub projects: PathBuf,
    pub links: PathBuf,
    pub tools: PathBuf,
    pub fun_facts: PathBuf,
}

impl StoreConfig {
    /// Default file names inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            work: data_dir.join(Kind::Work.file_name()),
            projects: data_dir.join(Kind::Project.file_name()),
            links: data_dir.join(Kind::Link.file_name()),
            tools: data_dir.join(Kind::Tool.file_name()),
            fun_facts: data_dir.join(FUN_FACTS_FILE),
        }
    }

    pub fn path_for(&self, kind: Kind) -> &Path {
        match kind {
            Kind::Work => &self.work,
            Kind::Project => &self.projects,
            Kind::Link => &self.links,
            Kind::Tool => &self.tools,
        }
    }
}

/// All content stores of one site.
pub struct ContentStore {
    pub work: ItemStore<Work>,
    pub projects: ItemStore<Project>,
    pub links: ItemStore<Link>,
    pub tools: ToolStore,
    pub fun_facts: FactsStore,
}

impl ContentStore {
    pub fn open(config: &StoreConfig) -> Self {
        Self {
            work: ItemStore::new(&config.work),
            projects: ItemStore::new(&config.projects),
            links: ItemStore::new(&config.links),
            tools: ToolStore::new(&config.tools),
            fun_facts: FactsStore::new(&config.fun_facts),
        }
    }

    /// Write empty documents for every kind that has none yet.
    ///
    /// Returns the paths that were created.
    pub fn init(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();

        if self.work.ensure_exists()? {
            created.push(self.work.path().to_path_buf());
        }
        if self.projects.ensure_exists()? {
            created.push(self.projects.path().to_path_buf());
        }
        if self.links.ensure_exists()? {
            created.push(self.links.path().to_path_buf());
        }
        if self.tools.ensure_exists()? {
            created.push(self.tools.path().to_path_buf());
        }

        for path in &created {
            info!(path = %path.display(), "initialized document");
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_config_in_dir() {
        let config = StoreConfig::in_dir(Path::new("data"));
        assert_eq!(config.work, Path::new("data/work.json"));
        assert_eq!(config.projects, Path::new("data/projects.json"));
        assert_eq!(config.links, Path::new("data/links.json"));
        assert_eq!(config.tools, Path::new("data/tools.json"));
        assert_eq!(config.fun_facts, Path::new("data/fun-facts.json"));
        assert_eq!(config.path_for(Kind::Tool), Path::new("data/tools.json"));
    }

    #[test]
    fn test_init_creates_missing_documents_once() {
        let tmp = TempDir::new().unwrap();
        let content = ContentStore::open(&StoreConfig::in_dir(tmp.path()));

        let created = content.init().unwrap();
        assert_eq!(created.len(), 4);
        for kind in Kind::ALL {
            assert!(tmp.path().join(kind.file_name()).exists());
        }

        let created = content.init().unwrap();
        assert!(created.is_empty());
    }

    #[test]
    fn test_kinds_use_separate_documents() {
        let tmp = TempDir::new().unwrap();
        let mut config = StoreConfig::in_dir(tmp.path());
        config.links = tmp.path().join("elsewhere/my-links.json");
        let content = ContentStore::open(&config);

        content
            .links
            .create(crate::entity::LinkDraft {
                title: "GitHub".to_string(),
                href: "https://github.com".to_string(),
            })
            .unwrap();

        assert!(tmp.path().join("elsewhere/my-links.json").exists());
        assert!(content.work.list().is_empty());
    }
}
