//! Authenticated Principal
//!
//! Identity is established upstream; requests carry the principal id in
//! the `x-user-id` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::error::ApiError;

pub const USER_HEADER: &str = "x-user-id";

/// Id of the caller, extracted from `x-user-id`
#[derive(Debug, Clone)]
pub struct Principal(pub String);

impl Principal {
    pub fn id(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Principal(v.to_string()))
            .ok_or(ApiError::Unauthenticated)
    }
}
