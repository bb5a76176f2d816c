//! Section Entity
//!
//! A named group of links. Sections are ordered within their profile.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, Orderable};
use super::link::Link;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: u32,
    /// Owning profile
    pub profile_id: u32,
    pub name: Option<String>,
    /// Position among the profile's sections
    pub index: u32,
}

impl Section {
    pub fn new(id: u32, profile_id: u32, name: Option<String>) -> Self {
        Self {
            id,
            profile_id,
            name,
            index: 0,
        }
    }
}

impl Entity for Section {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for Section {
    fn parent_id(&self) -> Self::Id {
        self.profile_id
    }
}

/// Section together with its links, both in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionWithLinks {
    #[serde(flatten)]
    pub section: Section,
    pub links: Vec<Link>,
}
