//! Link Commands
//!
//! Link CRUD, ordering within a section and thumbnail references.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use crate::domain::{validate_url, DomainError, Link};
use crate::repository::{LinkRepository, OrderedRepository, Repository};
use crate::AppState;
use super::error::ApiResult;
use super::extract::{Json, Path};
use super::principal::Principal;
use super::section_cmd::{MoveRequest, ReorderRequest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLinkRequest {
    pub section_id: u32,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct EditLinkRequest {
    pub text: Option<String>,
    pub url: Option<String>,
    pub hidden: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRequest {
    pub url: String,
    /// Asset id on the image host
    pub public_id: Option<String>,
}

/// Links of the section holding `id`, in order
async fn siblings_of(repo: &LinkRepository, id: u32) -> Result<Vec<Link>, DomainError> {
    let link = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Link {} not found", id)))?;
    repo.children(link.section_id).await
}

pub async fn add_link(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<AddLinkRequest>,
) -> ApiResult<(StatusCode, Json<Link>)> {
    let link = Link::new(0, req.section_id, req.text.trim().to_string(), req.url.trim().to_string());
    let created = state.links().append(principal.id(), &link).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn edit_link(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
    Json(req): Json<EditLinkRequest>,
) -> ApiResult<Json<Link>> {
    let repo = state.links();
    let mut link = repo.find_owned(principal.id(), id).await?;

    if let Some(text) = req.text {
        link.text = text.trim().to_string();
    }
    if let Some(url) = req.url {
        link.url = url.trim().to_string();
    }
    if let Some(hidden) = req.hidden {
        link.hidden = hidden;
    }

    Ok(Json(repo.update(principal.id(), &link).await?))
}

/// Delete a link; returns the removed link
pub async fn delete_link(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
) -> ApiResult<Json<Link>> {
    Ok(Json(state.links().remove(principal.id(), id).await?))
}

/// Apply a full new order to one section's links
pub async fn reorder_links(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<ReorderRequest>,
) -> ApiResult<Json<Vec<Link>>> {
    let repo = state.links();
    repo.reorder(principal.id(), &req.new_order).await?;

    let Some(first) = req.new_order.first() else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(siblings_of(&repo, *first).await?))
}

pub async fn move_link(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
    Json(req): Json<MoveRequest>,
) -> ApiResult<Json<Vec<Link>>> {
    let repo = state.links();
    repo.move_to(principal.id(), id, req.to_index).await?;

    Ok(Json(siblings_of(&repo, id).await?))
}

/// Store the thumbnail reference; the image itself lives on the host
pub async fn set_thumbnail(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
    Json(req): Json<ThumbnailRequest>,
) -> ApiResult<Json<Link>> {
    validate_url(&req.url)?;

    let repo = state.links();
    let mut link = repo.find_owned(principal.id(), id).await?;
    link.thumbnail = Some(req.url);
    link.thumbnail_public_id = req.public_id;
    Ok(Json(repo.update(principal.id(), &link).await?))
}

pub async fn remove_thumbnail(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
) -> ApiResult<Json<Link>> {
    let repo = state.links();
    let mut link = repo.find_owned(principal.id(), id).await?;
    if let Some(public_id) = link.thumbnail_public_id.take() {
        log::info!("Dropped thumbnail {} from link {}", public_id, id);
    }
    link.thumbnail = None;
    Ok(Json(repo.update(principal.id(), &link).await?))
}
