//! HTTP Error Mapping
//!
//! Domain errors become JSON bodies of the form `{ "error", "message" }`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing or empty x-user-id header")]
    Unauthenticated,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Domain(DomainError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Domain(DomainError::Validation(rejection.body_text()))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Forbidden(_)) => StatusCode::FORBIDDEN,
            ApiError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Domain(DomainError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let unauthenticated = self.to_string();
        let (error, message) = match &self {
            ApiError::Unauthenticated => ("unauthenticated", unauthenticated.as_str()),
            ApiError::Domain(e) => {
                if let DomainError::Internal(msg) = e {
                    log::error!("Request failed: {}", msg);
                }
                (e.kind(), e.message())
            }
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}
