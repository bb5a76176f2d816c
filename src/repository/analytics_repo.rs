//! Analytics Repository
//!
//! Link clicks from the public page and per-link totals.

use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, LinkClick, LinkClickSummary};
use super::{inserted_id, internal, now_millis, ready, SharedConnection};

pub struct AnalyticsRepository {
    conn: SharedConnection,
}

impl AnalyticsRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Record a click on `link_id`, which must belong to `profile_id`
    pub async fn capture_click(&self, link_id: u32, profile_id: u32, user_agent: Option<String>) -> DomainResult<LinkClick> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let link_profile: Option<u32> = conn
            .query_row(
                "SELECT s.profile_id FROM links l
                 JOIN sections s ON s.id = l.section_id
                 WHERE l.id = ?",
                params![link_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(internal)?;

        match link_profile {
            None => return Err(DomainError::NotFound(format!("Link {} not found", link_id))),
            Some(owner) if owner != profile_id => {
                return Err(DomainError::Validation(format!(
                    "Link {} does not belong to profile {}",
                    link_id, profile_id
                )))
            }
            Some(_) => {}
        }

        let clicked_at = now_millis();
        conn.execute(
            "INSERT INTO link_clicks (link_id, profile_id, user_agent, clicked_at) VALUES (?, ?, ?, ?)",
            params![link_id, profile_id, user_agent, clicked_at],
        )
        .map_err(internal)?;

        Ok(LinkClick {
            id: inserted_id(conn)?,
            link_id,
            profile_id,
            user_agent,
            clicked_at,
        })
    }

    /// Click totals for every link of the profile, in page order
    pub async fn link_summary(&self, profile_id: u32) -> DomainResult<Vec<LinkClickSummary>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let mut stmt = conn
            .prepare(
                "SELECT l.id, l.text, COUNT(c.id), MAX(c.clicked_at)
                 FROM links l
                 JOIN sections s ON s.id = l.section_id
                 LEFT JOIN link_clicks c ON c.link_id = l.id
                 WHERE s.profile_id = ?
                 GROUP BY l.id
                 ORDER BY s.position, s.id, l.position, l.id",
            )
            .map_err(internal)?;
        let summary = stmt
            .query_map(params![profile_id], |row| {
                Ok(LinkClickSummary {
                    link_id: row.get(0)?,
                    text: row.get(1)?,
                    clicks: row.get::<_, i64>(2)? as u64,
                    last_clicked_at: row.get(3)?,
                })
            })
            .map_err(internal)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(internal)?;
        Ok(summary)
    }
}
