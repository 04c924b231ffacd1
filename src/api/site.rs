//! Blog listing, logo uploads and the fun-facts document.

use axum::extract::{Multipart, Query, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use super::content::SlugQuery;
use super::error::ApiError;
use super::extract::ApiJson;
use super::{blocking, AppState};
use crate::blog::PostSummary;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostSummary>>, ApiError> {
    let blog = state.blog.clone();
    let posts = blocking(move || Ok(blog.list())).await?;
    Ok(Json(posts))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Query(query): Query<SlugQuery>,
) -> Result<Json<Value>, ApiError> {
    let slug = query
        .slug
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Slug required"))?;
    let blog = state.blog.clone();
    blocking(move || blog.delete(&slug)).await?;
    Ok(Json(json!({ "success": true })))
}

/// Store the multipart `file` field and return its public URL.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let uploads = state.uploads.clone();
        let url = blocking(move || uploads.store(original_name.as_deref(), &bytes)).await?;
        return Ok(Json(UploadResponse { url }));
    }

    Err(ApiError::bad_request("No file uploaded"))
}

pub async fn get_fun_facts(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let facts = state.with_content(|c| Ok(c.fun_facts.get())).await?;
    Ok(Json(facts))
}

pub async fn replace_fun_facts(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<Value>, ApiError> {
    state.with_content(move |c| c.fun_facts.replace(body)).await?;
    Ok(Json(json!({ "success": true })))
}
