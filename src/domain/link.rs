//! Link Entity
//!
//! A button on the public page pointing to an external URL.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity, Orderable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: u32,
    /// Owning section
    pub section_id: u32,
    pub text: String,
    pub url: String,
    /// Thumbnail URL on the external image host
    pub thumbnail: Option<String>,
    /// Asset id on the external image host
    #[serde(skip_serializing)]
    pub thumbnail_public_id: Option<String>,
    /// Hidden links stay in the editor but not on the public page
    pub hidden: bool,
    /// Position within the section
    pub index: u32,
}

impl Link {
    pub fn new(id: u32, section_id: u32, text: String, url: String) -> Self {
        Self {
            id,
            section_id,
            text,
            url,
            thumbnail: None,
            thumbnail_public_id: None,
            hidden: false,
            index: 0,
        }
    }
}

impl Entity for Link {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for Link {
    fn parent_id(&self) -> Self::Id {
        self.section_id
    }
}

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        Regex::new(r"^https?://[^\s/?#]+\.[^\s/?#]+([/?#]\S*)?$").expect("valid url pattern")
    })
}

/// Link text must be present and the URL absolute http(s)
pub fn validate_link(text: &str, url: &str) -> DomainResult<()> {
    if text.trim().is_empty() {
        return Err(DomainError::Validation("Link text is required".to_string()));
    }
    validate_url(url)
}

pub fn validate_url(url: &str) -> DomainResult<()> {
    if url_pattern().is_match(url) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!("Invalid URL: {}", url)))
    }
}
