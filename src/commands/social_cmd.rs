//! Social Link Commands
//!
//! Social icons of the caller's profile, kept in order.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use crate::domain::{DomainError, SocialLink};
use crate::repository::{OrderedRepository, Repository};
use crate::AppState;
use super::error::ApiResult;
use super::extract::{Json, Path};
use super::principal::Principal;
use super::section_cmd::{MoveRequest, ReorderRequest};

#[derive(Debug, Deserialize)]
pub struct AddSocialLinkRequest {
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct EditSocialLinkRequest {
    pub url: Option<String>,
    pub icon: Option<String>,
}

pub async fn list_social_links(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<Vec<SocialLink>>> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    Ok(Json(state.social_links().children(profile.id).await?))
}

pub async fn add_social_link(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<AddSocialLinkRequest>,
) -> ApiResult<(StatusCode, Json<SocialLink>)> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    let link = SocialLink::new(0, profile.id, req.url.trim().to_string(), req.icon.trim().to_string());
    let created = state.social_links().append(principal.id(), &link).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn edit_social_link(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
    Json(req): Json<EditSocialLinkRequest>,
) -> ApiResult<Json<SocialLink>> {
    let repo = state.social_links();
    let mut link = repo.find_owned(principal.id(), id).await?;

    if let Some(url) = req.url {
        link.url = url.trim().to_string();
    }
    if let Some(icon) = req.icon {
        link.icon = icon.trim().to_string();
    }

    Ok(Json(repo.update(principal.id(), &link).await?))
}

/// Delete a social link; returns the removed link
pub async fn delete_social_link(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
) -> ApiResult<Json<SocialLink>> {
    Ok(Json(state.social_links().remove(principal.id(), id).await?))
}

pub async fn reorder_social_links(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<ReorderRequest>,
) -> ApiResult<Json<Vec<SocialLink>>> {
    state.social_links().reorder(principal.id(), &req.new_order).await?;

    let profile = state.profiles().require_owned(principal.id()).await?;
    Ok(Json(state.social_links().children(profile.id).await?))
}

pub async fn move_social_link(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
    Json(req): Json<MoveRequest>,
) -> ApiResult<Json<Vec<SocialLink>>> {
    let repo = state.social_links();
    repo.move_to(principal.id(), id, req.to_index).await?;

    let link = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Social link {} not found", id)))?;
    Ok(Json(repo.children(link.profile_id).await?))
}
