//! Testimonial Entity
//!
//! Reviews left by visitors. New testimonials stay off the public page
//! until the owner chooses to show them.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};
use super::form::validate_email;
use super::link::validate_url;

/// Ratings run from 1 to 5 stars
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: u32,
    pub profile_id: u32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: u8,
    pub should_show: bool,
    /// Avatar image URL
    pub avatar: Option<String>,
    /// Unix millis
    pub created_at: i64,
}

impl Entity for Testimonial {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// What a visitor sends
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: u8,
    pub avatar: Option<String>,
}

impl NewTestimonial {
    /// Trimmed copy, or `Validation` naming the first bad field
    pub fn validated(&self) -> DomainResult<NewTestimonial> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();
        let avatar = self
            .avatar
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty());

        if name.is_empty() {
            return Err(DomainError::Validation("Name is required".to_string()));
        }
        if message.is_empty() {
            return Err(DomainError::Validation("Message is required".to_string()));
        }
        validate_email(email)?;
        if self.rating == 0 || self.rating > MAX_RATING {
            return Err(DomainError::Validation(format!(
                "Rating must be between 1 and {}",
                MAX_RATING
            )));
        }
        if let Some(avatar) = avatar {
            validate_url(avatar)?;
        }

        Ok(NewTestimonial {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            rating: self.rating,
            avatar: avatar.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review() -> NewTestimonial {
        NewTestimonial {
            name: " Bo ".to_string(),
            email: "bo@example.com".to_string(),
            message: "Great page".to_string(),
            rating: 5,
            avatar: Some(String::new()),
        }
    }

    #[test]
    fn test_validated_trims() {
        let ok = review().validated().unwrap();
        assert_eq!(ok.name, "Bo");
        assert_eq!(ok.avatar, None);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut bad = review();
        bad.rating = 0;
        assert!(matches!(bad.validated(), Err(DomainError::Validation(_))));

        let mut bad = review();
        bad.rating = 6;
        assert!(matches!(bad.validated(), Err(DomainError::Validation(_))));

        let mut bad = review();
        bad.email = "nope".to_string();
        assert!(matches!(bad.validated(), Err(DomainError::Validation(_))));

        let mut bad = review();
        bad.message = "   ".to_string();
        assert!(matches!(bad.validated(), Err(DomainError::Validation(_))));
    }
}
