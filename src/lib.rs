pub mod api;
pub mod auth;
pub mod blog;
pub mod chronology;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod slug;
pub mod storage;
pub mod upload;

pub use config::Config;
pub use error::{FolioError, Result};
pub use storage::{ContentStore, StoreConfig};
