//! Link Repository Module
//!
//! - link_repo: lookups and content updates
//! - link_positioning: append/delete/reorder within a section

mod link_repo;
mod link_positioning;

pub use link_repo::LinkRepository;
pub(crate) use link_repo::{row_to_link, LINK_COLUMNS};
