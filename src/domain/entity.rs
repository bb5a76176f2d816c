//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// An entity kept in a dense `0..n` order under a parent collection
pub trait Orderable: Entity {
    /// Identifier of the owning collection
    fn parent_id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    Forbidden(String),
    Validation(String),
    Conflict(String),
    Internal(String),
}

impl DomainError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "not_found",
            DomainError::Forbidden(_) => "forbidden",
            DomainError::Validation(_) => "validation",
            DomainError::Conflict(_) => "conflict",
            DomainError::Internal(_) => "internal",
        }
    }

    /// Message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            DomainError::NotFound(msg)
            | DomainError::Forbidden(msg)
            | DomainError::Validation(msg)
            | DomainError::Conflict(msg)
            | DomainError::Internal(msg) => msg,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            DomainError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// Ownership check applied before every mutation.
///
/// `owner_id` is the principal that owns the top-level profile.
pub fn authorize_owner(owner_id: &str, principal_id: &str) -> DomainResult<()> {
    if owner_id == principal_id {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "You are not allowed to modify this resource".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_owner() {
        assert!(authorize_owner("user-1", "user-1").is_ok());
        assert!(matches!(
            authorize_owner("user-1", "user-2"),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::NotFound("Link 7 not found".to_string());
        assert_eq!(err.to_string(), "Not found: Link 7 not found");
        assert_eq!(err.kind(), "not_found");
    }
}
