//! Analytics Commands

use axum::{
    extract::State,
    http::{header::USER_AGENT, HeaderMap, StatusCode},
};
use serde::Deserialize;

use crate::domain::{LinkClick, LinkClickSummary};
use crate::AppState;
use super::error::ApiResult;
use super::extract::Json;
use super::principal::Principal;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureClickRequest {
    pub link_id: u32,
    pub profile_id: u32,
}

/// Record a click from a public page; no principal required
pub async fn capture_click(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CaptureClickRequest>,
) -> ApiResult<(StatusCode, Json<LinkClick>)> {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let click = state
        .analytics()
        .capture_click(req.link_id, req.profile_id, user_agent)
        .await?;
    Ok((StatusCode::CREATED, Json(click)))
}

/// Click totals for the caller's links
pub async fn link_summary(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<Vec<LinkClickSummary>>> {
    let profile = state.profiles().require_owned(principal.id()).await?;
    Ok(Json(state.analytics().link_summary(profile.id).await?))
}
