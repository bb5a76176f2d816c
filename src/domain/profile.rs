//! Profile Entity
//!
//! The top-level page owned by exactly one principal.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};

/// Where the social icons are shown on the public page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SocialIconPlacement {
    #[default]
    Top,
    Bottom,
}

impl SocialIconPlacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialIconPlacement::Top => "TOP",
            SocialIconPlacement::Bottom => "BOTTOM",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "BOTTOM" => SocialIconPlacement::Bottom,
            _ => SocialIconPlacement::Top,
        }
    }
}

/// Page-level settings (SEO metadata, icon placement)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    #[serde(default)]
    pub social_icon_placement: SocialIconPlacement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: u32,
    /// Principal that owns this page
    pub owner_id: String,
    pub username: String,
    pub bio: Option<String>,
    pub settings: PageSettings,
}

impl Profile {
    pub fn new(id: u32, owner_id: String, username: String) -> Self {
        Self {
            id,
            owner_id,
            username,
            bio: None,
            settings: PageSettings::default(),
        }
    }
}

impl Entity for Profile {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Usernames appear in public URLs
pub fn validate_username(username: &str) -> DomainResult<()> {
    if username.is_empty() {
        return Err(DomainError::Validation("Username is required".to_string()));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-');
    if !username.chars().all(allowed) {
        return Err(DomainError::Validation(format!(
            "Username '{}' may only contain letters, digits, '_', '.' and '-'",
            username
        )));
    }
    Ok(())
}
