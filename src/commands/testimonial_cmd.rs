//! Testimonial Commands

use axum::{extract::State, http::StatusCode};

use crate::domain::{DomainError, NewTestimonial, Testimonial};
use crate::AppState;
use super::error::ApiResult;
use super::extract::{Json, Path};
use super::form_cmd::MessageResponse;
use super::principal::Principal;

/// Visitor review on a public page; no principal required
pub async fn submit_testimonial(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(input): Json<NewTestimonial>,
) -> ApiResult<(StatusCode, Json<Testimonial>)> {
    let profile = state
        .profiles()
        .find_by_username(&username)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Page '{}' not found", username)))?;
    let testimonial = state.testimonials().submit(profile.id, &input).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// All testimonials of the caller's profile, hidden ones included
pub async fn list_testimonials(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<Vec<Testimonial>>> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    Ok(Json(state.testimonials().list(profile.id, false).await?))
}

/// Show a hidden testimonial on the public page, or hide a shown one
pub async fn toggle_testimonial(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
) -> ApiResult<Json<Testimonial>> {
    Ok(Json(state.testimonials().toggle_visibility(principal.id(), id).await?))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
) -> ApiResult<Json<MessageResponse>> {
    state.testimonials().delete(principal.id(), id).await?;
    Ok(Json(MessageResponse {
        message: "Testimonial deleted".to_string(),
    }))
}
