use std::io::{self, BufRead};

use tokio::net::TcpListener;
use tracing::{info, warn};

use super::Cli;
use crate::api::{router, AppState};
use crate::auth::hash_password;
use crate::config::Config;
use crate::entity::Kind;
use crate::error::{FolioError, Result};
use crate::storage::ContentStore;

/// Load the config file and apply command-line overrides.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(&cli.config)?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    Ok(config)
}

fn parse_kind(kind: &str) -> Result<Kind> {
    kind.parse().map_err(|_| FolioError::InvalidKind(kind.to_string()))
}

pub fn handle_init(config: &Config) -> Result<()> {
    let content = ContentStore::open(&config.store_config());
    let created = content.init()?;

    if created.is_empty() {
        println!("All documents already exist in {}", config.data_dir.display());
    } else {
        for path in &created {
            println!("Created {}", path.display());
        }
    }

    Ok(())
}

pub fn handle_serve(config: Config, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.bind.clone());
    let state = AppState::from_config(&config);

    if !state.gate.is_configured() {
        warn!("no admin credentials configured; all mutating routes will be refused");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(&bind).await?;
        info!(address = %bind, data_dir = %config.data_dir.display(), "listening");

        axum::serve(listener, router(state))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("shutting down");
            })
            .await?;

        Ok::<(), FolioError>(())
    })
}

pub fn handle_list(config: &Config, kind: &str, json: bool) -> Result<()> {
    let kind = parse_kind(kind)?;
    let content = ContentStore::open(&config.store_config());

    match kind {
        Kind::Work => {
            let items = content.work.list_ordered();
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("No work entries");
            } else {
                for work in &items {
                    println!("{}  {}  ({})", work.slug, work.title, work.period);
                }
            }
        }
        Kind::Project => {
            let items = content.projects.list_ordered();
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("No project entries");
            } else {
                for project in &items {
                    println!("{}  {}  ({})", project.slug, project.title, project.role);
                }
            }
        }
        Kind::Link => {
            let items = content.links.list();
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("No link entries");
            } else {
                for link in &items {
                    println!("{}  {}", link.title, link.href);
                }
            }
        }
        Kind::Tool => {
            let categories = content.tools.list();
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for (category, tools) in &categories {
                    println!("{}:", category);
                    for tool in tools {
                        if tool.description.is_empty() {
                            println!("  - {}", tool.name);
                        } else {
                            println!("  - {}: {}", tool.name, tool.description);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

pub fn handle_delete(config: &Config, kind: &str, id: &str, category: Option<String>) -> Result<()> {
    let kind = parse_kind(kind)?;
    let content = ContentStore::open(&config.store_config());

    let removed = match kind {
        Kind::Work => content.work.delete(id)?,
        Kind::Project => content.projects.delete(id)?,
        Kind::Link => content.links.delete(id)?,
        Kind::Tool => {
            let category = category
                .ok_or_else(|| FolioError::validation("category", "--category is required for tools"))?;
            content.tools.delete(&category, id)?
        }
    };

    if removed {
        println!("Deleted {} '{}'", kind, id);
    } else {
        println!("No {} '{}' found, nothing to delete", kind, id);
    }

    Ok(())
}

pub fn handle_hash_password() -> Result<()> {
    let mut password = String::new();
    io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);

    println!("{}", hash_password(password)?);
    Ok(())
}
