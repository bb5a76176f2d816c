//! Profile Commands
//!
//! The principal's own profile plus the public page read.

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, PageSettings, Profile, SectionWithLinks, SocialLink, Testimonial};
use crate::repository::{OrderedRepository, Repository};
use crate::AppState;
use super::error::ApiResult;
use super::extract::{Json, Path};
use super::principal::Principal;

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub username: String,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    /// An empty string clears the bio
    pub bio: Option<String>,
}

/// Published page data; hidden links and testimonials are not included
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPage {
    pub profile_id: u32,
    pub username: String,
    pub bio: Option<String>,
    pub settings: PageSettings,
    pub social_links: Vec<SocialLink>,
    pub sections: Vec<SectionWithLinks>,
    pub testimonials: Vec<PublicTestimonial>,
}

/// Testimonial as visitors see it, without the reviewer's email
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTestimonial {
    pub id: u32,
    pub name: String,
    pub message: String,
    pub rating: u8,
    pub avatar: Option<String>,
    pub created_at: i64,
}

impl From<Testimonial> for PublicTestimonial {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id,
            name: t.name,
            message: t.message,
            rating: t.rating,
            avatar: t.avatar,
            created_at: t.created_at,
        }
    }
}

/// Create the caller's profile
pub async fn create_profile(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateProfileRequest>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let profile = state
        .profiles()
        .create(principal.id(), req.username.trim(), req.bio)
        .await?;
    log::info!("Created profile '{}' for {}", profile.username, principal.id());
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_my_profile(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.profiles().require_owned(principal.id()).await?))
}

/// Update username and/or bio
pub async fn update_profile(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<Profile>> {
    let repo = state.profiles();
    let mut profile = repo.require_owned(principal.id()).await?;

    if let Some(username) = req.username {
        profile.username = username.trim().to_string();
    }
    if let Some(bio) = req.bio {
        profile.bio = Some(bio).filter(|b| !b.trim().is_empty());
    }

    Ok(Json(repo.update(principal.id(), &profile).await?))
}

pub async fn update_settings(
    State(state): State<AppState>,
    principal: Principal,
    Json(settings): Json<PageSettings>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.profiles().update_settings(principal.id(), &settings).await?))
}

/// Public page by username; no principal required
pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<PublicPage>> {
    let profile = state
        .profiles()
        .find_by_username(&username)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Page '{}' not found", username)))?;
    let social_links = state.social_links().children(profile.id).await?;
    let sections = state.sections().with_links(profile.id, false).await?;
    let testimonials = state
        .testimonials()
        .list(profile.id, true)
        .await?
        .into_iter()
        .map(PublicTestimonial::from)
        .collect();

    Ok(Json(PublicPage {
        profile_id: profile.id,
        username: profile.username,
        bio: profile.bio,
        settings: profile.settings,
        social_links,
        sections,
        testimonials,
    }))
}
