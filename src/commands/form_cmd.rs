//! Contact Form Commands

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::{ContactForm, DomainError, FormFields, FormSubmission, SubmissionValues};
use crate::AppState;
use super::error::ApiResult;
use super::extract::{Json, Path};
use super::principal::Principal;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormRequest {
    pub fields: Option<FormFields>,
    pub title: Option<String>,
    pub submit_button_text: Option<String>,
    pub success_message: Option<String>,
}

/// Outcome of a toggle, with a line the dashboard can show as-is
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub enabled: bool,
    pub form: Option<ContactForm>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptanceResponse {
    pub accepting_submissions: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn not_enabled() -> DomainError {
    DomainError::NotFound("Form is not enabled".to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Enable the form with default fields, or disable it if it exists
pub async fn toggle_form(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ToggleResponse>> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    let form = state.forms().toggle(profile.id).await?;

    let message = if form.is_some() {
        "Contact form enabled"
    } else {
        "Contact form disabled"
    };
    log::info!("{} for profile {}", message, profile.id);

    Ok(Json(ToggleResponse {
        enabled: form.is_some(),
        form,
        message: message.to_string(),
    }))
}

pub async fn get_form(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ContactForm>> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    let form = state.forms().find(profile.id).await?.ok_or_else(not_enabled)?;
    Ok(Json(form))
}

pub async fn update_form(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<UpdateFormRequest>,
) -> ApiResult<Json<ContactForm>> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    let repo = state.forms();
    let mut form = repo.find(profile.id).await?.ok_or_else(not_enabled)?;

    if let Some(fields) = req.fields {
        form.fields = fields;
    }
    form.title = non_blank(req.title);
    form.submit_button_text = non_blank(req.submit_button_text);
    form.success_message = non_blank(req.success_message);

    Ok(Json(repo.update(&form).await?))
}

/// Pause or resume accepting submissions
pub async fn toggle_acceptance(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<AcceptanceResponse>> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    let repo = state.forms();
    let mut form = repo.find(profile.id).await?.ok_or_else(not_enabled)?;

    form.accepting_submissions = !form.accepting_submissions;
    let form = repo.update(&form).await?;

    let message = if form.accepting_submissions {
        "Form is now accepting submissions"
    } else {
        "Form is no longer accepting submissions"
    };
    Ok(Json(AcceptanceResponse {
        accepting_submissions: form.accepting_submissions,
        message: message.to_string(),
    }))
}

/// Visitor submission on a public page; no principal required
pub async fn submit(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(values): Json<SubmissionValues>,
) -> ApiResult<(StatusCode, Json<FormSubmission>)> {
    let profile = state
        .profiles()
        .find_by_username(&username)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Page '{}' not found", username)))?;
    let repo = state.forms();
    let form = repo.find(profile.id).await?.ok_or_else(not_enabled)?;

    let accepted = form.accept(&values)?;
    let submission = repo.add_submission(profile.id, &accepted).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// Newest first
pub async fn list_submissions(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<Vec<FormSubmission>>> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    Ok(Json(state.forms().list_submissions(profile.id).await?))
}

pub async fn delete_submission(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u32>,
) -> ApiResult<Json<MessageResponse>> {
    state.forms().delete_submission(principal.id(), id).await?;
    Ok(Json(MessageResponse {
        message: "Submission deleted".to_string(),
    }))
}
