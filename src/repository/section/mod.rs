//! Section Repository Module
//!
//! - section_repo: lookups, renames and section-with-links reads
//! - section_positioning: append/delete/reorder within a profile

mod section_repo;
mod section_positioning;

pub use section_repo::SectionRepository;
