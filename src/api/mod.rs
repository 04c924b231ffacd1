//! HTTP API exposing the content stores to the admin panel and the site.

pub mod admin;
pub mod content;
pub mod error;
pub mod extract;
pub mod site;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::auth::AdminGate;
use crate::blog::BlogIndex;
use crate::config::Config;
use crate::storage::ContentStore;
use crate::upload::UploadDir;

pub use error::ApiError;
pub use extract::ApiJson;

/// Largest accepted upload body
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state.
///
/// Every content read and write goes through the one `content` mutex, so
/// read-modify-write cycles from concurrent requests never interleave. The
/// file IO itself runs on the blocking pool.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<Mutex<ContentStore>>,
    pub blog: Arc<BlogIndex>,
    pub uploads: Arc<UploadDir>,
    pub gate: Arc<AdminGate>,
}

impl AppState {
    pub fn new(content: ContentStore, blog: BlogIndex, uploads: UploadDir, gate: AdminGate) -> Self {
        Self {
            content: Arc::new(Mutex::new(content)),
            blog: Arc::new(blog),
            uploads: Arc::new(uploads),
            gate: Arc::new(gate),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ContentStore::open(&config.store_config()),
            BlogIndex::new(&config.posts_dir),
            UploadDir::new(&config.upload_dir, config.upload_url_prefix.clone()),
            AdminGate::new(config.admin.clone()),
        )
    }

    /// Run `op` against the content stores on the blocking pool, holding the
    /// content lock until it finishes.
    pub async fn with_content<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&ContentStore) -> crate::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let content = self.content.clone().lock_owned().await;
        blocking(move || op(&content)).await
    }
}

/// Run filesystem work off the async workers.
pub(crate) async fn blocking<T, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => {
            error!(error = %e, "blocking task failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ))
        }
    }
}

/// Build the full router with the admin gate and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/work",
            get(content::list_work)
                .post(content::create_work)
                .put(content::update_work)
                .delete(content::delete_work),
        )
        .route(
            "/api/projects",
            get(content::list_projects)
                .post(content::create_project)
                .put(content::update_project)
                .delete(content::delete_project),
        )
        .route(
            "/api/links",
            get(content::list_links)
                .post(content::create_link)
                .put(content::update_link)
                .delete(content::delete_link),
        )
        .route(
            "/api/tools",
            get(content::list_tools)
                .post(content::create_tool)
                .put(content::update_tool)
                .delete(content::delete_tool),
        )
        .route("/api/blog", get(site::list_posts).delete(site::delete_post))
        .route(
            "/api/upload",
            post(site::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/fun-facts",
            get(site::get_fun_facts).post(site::replace_fun_facts),
        )
        .route(admin::LOGIN_PATH, post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/health", get(|| async { "OK" }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    admin::require_admin,
                )),
        )
        .with_state(state)
}
