use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about = "Flat-file content store and admin API for a portfolio site")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the YAML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding the JSON documents (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create empty documents for every content kind
    Init,

    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(long)]
        bind: Option<String>,
    },

    /// List entries of one kind
    List {
        /// Kind to list (work, projects, links, tools)
        #[arg(value_name = "KIND")]
        kind: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an entry by slug, title or name
    Delete {
        /// Kind to delete from (work, projects, links, tools)
        #[arg(value_name = "KIND")]
        kind: String,

        /// Slug for work/projects, title for links, name for tools
        id: String,

        /// Category of the tool (tools only)
        #[arg(long)]
        category: Option<String>,
    },

    /// Read a password from stdin and print its hash for the config file
    HashPassword,
}
