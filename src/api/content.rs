//! Handlers for the work, projects, links and tools documents.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::extract::ApiJson;
use super::AppState;
use crate::entity::{
    Link, LinkDraft, LinkPatch, Project, ProjectDraft, ProjectPatch, Tool, ToolDraft, ToolPatch,
    Work, WorkDraft, WorkPatch,
};
use crate::storage::ToolCategories;

/// PUT body for slug-identified kinds: the slug plus any fields to change.
#[derive(Debug, Deserialize)]
pub struct SlugUpdate<P> {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub patch: P,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkUpdate {
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(flatten)]
    pub patch: LinkPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUpdate {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(flatten)]
    pub patch: ToolPatch,
}

#[derive(Debug, Deserialize)]
pub struct SlugQuery {
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToolQuery {
    pub category: Option<String>,
    pub name: Option<String>,
}

type Created<T> = (StatusCode, Json<T>);

fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

// ========== Work ==========

pub async fn list_work(State(state): State<AppState>) -> Result<Json<Vec<Work>>, ApiError> {
    let items = state.with_content(|c| Ok(c.work.list_ordered())).await?;
    Ok(Json(items))
}

pub async fn create_work(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<WorkDraft>,
) -> Result<Created<Work>, ApiError> {
    let work = state.with_content(move |c| c.work.create(draft)).await?;
    Ok((StatusCode::CREATED, Json(work)))
}

pub async fn update_work(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SlugUpdate<WorkPatch>>,
) -> Result<Json<Work>, ApiError> {
    let slug = required(body.slug, "Slug required")?;
    let patch = body.patch;
    let work = state
        .with_content(move |c| c.work.update(&slug, patch))
        .await?;
    Ok(Json(work))
}

pub async fn delete_work(
    State(state): State<AppState>,
    Query(query): Query<SlugQuery>,
) -> Result<Json<Value>, ApiError> {
    let slug = required(query.slug, "Slug required")?;
    state.with_content(move |c| c.work.delete(&slug)).await?;
    Ok(success())
}

// ========== Projects ==========

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let items = state
        .with_content(|c| Ok(c.projects.list_ordered()))
        .await?;
    Ok(Json(items))
}

pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ProjectDraft>,
) -> Result<Created<Project>, ApiError> {
    let project = state.with_content(move |c| c.projects.create(draft)).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SlugUpdate<ProjectPatch>>,
) -> Result<Json<Project>, ApiError> {
    let slug = required(body.slug, "Slug required")?;
    let patch = body.patch;
    let project = state
        .with_content(move |c| c.projects.update(&slug, patch))
        .await?;
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Query(query): Query<SlugQuery>,
) -> Result<Json<Value>, ApiError> {
    let slug = required(query.slug, "Slug required")?;
    state.with_content(move |c| c.projects.delete(&slug)).await?;
    Ok(success())
}

// ========== Links ==========

pub async fn list_links(State(state): State<AppState>) -> Result<Json<Vec<Link>>, ApiError> {
    let items = state.with_content(|c| Ok(c.links.list())).await?;
    Ok(Json(items))
}

pub async fn create_link(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<LinkDraft>,
) -> Result<Created<Link>, ApiError> {
    let link = state.with_content(move |c| c.links.create(draft)).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn update_link(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LinkUpdate>,
) -> Result<Json<Link>, ApiError> {
    let original_title = required(body.original_title, "originalTitle required")?;
    let patch = body.patch;
    let link = state
        .with_content(move |c| c.links.update(&original_title, patch))
        .await?;
    Ok(Json(link))
}

pub async fn delete_link(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Result<Json<Value>, ApiError> {
    let title = required(query.title, "Title required")?;
    state.with_content(move |c| c.links.delete(&title)).await?;
    Ok(success())
}

// ========== Tools ==========

pub async fn list_tools(State(state): State<AppState>) -> Result<Json<ToolCategories>, ApiError> {
    let categories = state.with_content(|c| Ok(c.tools.list())).await?;
    Ok(Json(categories))
}

pub async fn create_tool(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ToolDraft>,
) -> Result<Created<Tool>, ApiError> {
    let tool = state.with_content(move |c| c.tools.create(draft)).await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

pub async fn update_tool(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ToolUpdate>,
) -> Result<Json<Tool>, ApiError> {
    let category = required(body.category, "Category and originalName required")?;
    let original_name = required(body.original_name, "Category and originalName required")?;
    let patch = body.patch;
    let tool = state
        .with_content(move |c| c.tools.update(&category, &original_name, patch))
        .await?;
    Ok(Json(tool))
}

pub async fn delete_tool(
    State(state): State<AppState>,
    Query(query): Query<ToolQuery>,
) -> Result<Json<Value>, ApiError> {
    let category = required(query.category, "Category and name required")?;
    let name = required(query.name, "Category and name required")?;
    state
        .with_content(move |c| c.tools.delete(&category, &name))
        .await?;
    Ok(success())
}
