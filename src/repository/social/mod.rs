//! Social Link Repository Module
//!
//! - social_repo: lookups and content updates
//! - social_positioning: append/delete/reorder within a profile

mod social_repo;
mod social_positioning;

pub use social_repo::SocialLinkRepository;
