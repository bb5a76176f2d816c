//! Analytics Records
//!
//! Link clicks captured from the public page.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkClick {
    pub id: u32,
    pub link_id: u32,
    pub profile_id: u32,
    pub user_agent: Option<String>,
    /// Unix millis
    pub clicked_at: i64,
}

impl Entity for LinkClick {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Click totals for one link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkClickSummary {
    pub link_id: u32,
    pub text: String,
    pub clicks: u64,
    /// Unix millis of the latest click
    pub last_clicked_at: Option<i64>,
}
