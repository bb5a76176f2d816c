//! Social Link Entity
//!
//! Icon links to the owner's social accounts, ordered within the profile
//! and shown above or below the sections depending on `SocialIconPlacement`.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity, Orderable};
use super::link::validate_url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: u32,
    /// Owning profile
    pub profile_id: u32,
    pub url: String,
    /// Icon name, e.g. `instagram`
    pub icon: String,
    /// Position among the profile's social links
    pub index: u32,
}

impl SocialLink {
    pub fn new(id: u32, profile_id: u32, url: String, icon: String) -> Self {
        Self {
            id,
            profile_id,
            url,
            icon,
            index: 0,
        }
    }
}

impl Entity for SocialLink {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for SocialLink {
    fn parent_id(&self) -> Self::Id {
        self.profile_id
    }
}

/// Icon names are lowercase slugs
pub fn validate_social_link(url: &str, icon: &str) -> DomainResult<()> {
    let valid_icon = !icon.is_empty()
        && icon
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_icon {
        return Err(DomainError::Validation(format!("Invalid icon name: '{}'", icon)));
    }
    validate_url(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_social_link() {
        assert!(validate_social_link("https://instagram.com/ann", "instagram").is_ok());
        assert!(validate_social_link("https://x.com/ann", "x-twitter").is_ok());
        assert!(matches!(
            validate_social_link("https://x.com/ann", ""),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_social_link("https://x.com/ann", "Has Space"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_social_link("x.com/ann", "x"),
            Err(DomainError::Validation(_))
        ));
    }
}
