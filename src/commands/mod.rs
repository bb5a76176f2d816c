//! Commands Layer
//!
//! HTTP handlers that bridge remote clients to the repositories.

mod error;
mod extract;
mod principal;
mod profile_cmd;
mod section_cmd;
mod link_cmd;
mod social_cmd;
mod form_cmd;
mod testimonial_cmd;
mod analytics_cmd;

pub use principal::USER_HEADER;
pub use profile_cmd::*;
pub use section_cmd::*;
pub use link_cmd::*;
pub use social_cmd::*;
pub use form_cmd::*;
pub use testimonial_cmd::*;
pub use analytics_cmd::*;
