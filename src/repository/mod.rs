//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod ordering;
mod profile_repo;
mod form_repo;
mod analytics_repo;
mod testimonial_repo;
pub mod section;
pub mod link;
pub mod social;

#[cfg(test)]
mod tests;

use rusqlite::Connection;

use crate::domain::DomainError;

pub use traits::{OrderedRepository, Repository};
pub use db::{init_db, DbState, SharedConnection};
pub use profile_repo::ProfileRepository;
pub use form_repo::FormRepository;
pub use analytics_repo::AnalyticsRepository;
pub use section::SectionRepository;
pub use link::LinkRepository;
pub use social::SocialLinkRepository;
pub use testimonial_repo::TestimonialRepository;

/// Storage failures surface as internal errors
pub(crate) fn internal<E: std::fmt::Display>(e: E) -> DomainError {
    DomainError::Internal(e.to_string())
}

/// Map a UNIQUE violation to `Conflict`, anything else to `Internal`
pub(crate) fn conflict_or_internal(e: rusqlite::Error, what: &str) -> DomainError {
    match e {
        rusqlite::Error::SqliteFailure(ref err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            DomainError::Conflict(format!("{} already exists", what))
        }
        other => internal(other),
    }
}

pub(crate) fn ready(guard: &Option<Connection>) -> Result<&Connection, DomainError> {
    guard
        .as_ref()
        .ok_or(DomainError::Internal("Database not initialized".to_string()))
}

pub(crate) fn ready_mut(guard: &mut Option<Connection>) -> Result<&mut Connection, DomainError> {
    guard
        .as_mut()
        .ok_or(DomainError::Internal("Database not initialized".to_string()))
}

/// Rowid of the last insert on `conn`
pub(crate) fn inserted_id(conn: &Connection) -> Result<u32, DomainError> {
    u32::try_from(conn.last_insert_rowid()).map_err(internal)
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
