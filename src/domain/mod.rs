//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage or transport dependencies.

mod entity;
mod profile;
mod section;
mod link;
mod form;
mod analytics;
mod social;
mod testimonial;
pub mod ordering;

pub use entity::{authorize_owner, DomainError, DomainResult, Entity, Orderable};
pub use profile::{validate_username, PageSettings, Profile, SocialIconPlacement};
pub use section::{Section, SectionWithLinks};
pub use link::{validate_link, validate_url, Link};
pub use form::{ContactForm, FormFields, FormSubmission, SubmissionValues};
pub use analytics::{LinkClick, LinkClickSummary};
pub use social::{validate_social_link, SocialLink};
pub use testimonial::{NewTestimonial, Testimonial};
