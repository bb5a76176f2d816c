//! Section Commands
//!
//! Sections always belong to the caller's profile.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use crate::domain::{DomainError, Section, SectionWithLinks};
use crate::repository::{OrderedRepository, Repository};
use crate::AppState;
use super::error::ApiResult;
use super::extract::{Json, Path};
use super::principal::Principal;

#[derive(Debug, Deserialize)]
pub struct SectionNameRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub new_order: Vec<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub to_index: u32,
}

fn clean_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// All sections of the caller's profile with every link, hidden ones included
pub async fn list_sections(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<Vec<SectionWithLinks>>> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    Ok(Json(state.sections().with_links(profile.id, true).await?))
}

pub async fn add_section(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<SectionNameRequest>,
) -> ApiResult<(StatusCode, Json<Section>)> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    let section = Section::new(0, profile.id, clean_name(req.name));
    let created = state.sections().append(principal.id(), &section).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn rename_section(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
    Json(req): Json<SectionNameRequest>,
) -> ApiResult<Json<Section>> {
    let repo = state.sections();
    let mut section = repo.find_owned(principal.id(), id).await?;
    section.name = clean_name(req.name);
    Ok(Json(repo.update(principal.id(), &section).await?))
}

/// Delete a section with its links; returns the removed section
pub async fn delete_section(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
) -> ApiResult<Json<Section>> {
    Ok(Json(state.sections().remove(principal.id(), id).await?))
}

/// Apply a full new order; responds with the sections in their new order
pub async fn reorder_sections(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<ReorderRequest>,
) -> ApiResult<Json<Vec<Section>>> {
    let repo = state.sections();
    repo.reorder(principal.id(), &req.new_order).await?;

    let profile = state.profiles().require_owned(principal.id()).await?;
    Ok(Json(repo.children(profile.id).await?))
}

pub async fn move_section(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
    Json(req): Json<MoveRequest>,
) -> ApiResult<Json<Vec<Section>>> {
    let repo = state.sections();
    repo.move_to(principal.id(), id, req.to_index).await?;

    let section = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Section {} not found", id)))?;
    Ok(Json(repo.children(section.profile_id).await?))
}
