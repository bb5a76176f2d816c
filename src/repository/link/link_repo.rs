//! Link Repository - Lookups and Content Updates
//!
//! Structural changes (append, delete, reorder) live in link_positioning.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{validate_link, DomainError, DomainResult, Entity, Link};
use super::super::ordering::LINKS;
use super::super::traits::Repository;
use super::super::{internal, now_millis, ready, SharedConnection};

pub(crate) const LINK_COLUMNS: &str =
    "l.id, l.section_id, l.text, l.url, l.thumbnail, l.thumbnail_public_id, l.hidden, l.position";

/// SQLite implementation of Link repository
pub struct LinkRepository {
    pub(super) conn: SharedConnection,
}

impl LinkRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Link> for LinkRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Link>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        conn.query_row(
            &format!("SELECT {} FROM links l WHERE l.id = ?", LINK_COLUMNS),
            params![id],
            row_to_link,
        )
        .optional()
        .map_err(internal)
    }

    /// Writes content fields only; `index` is left untouched
    async fn update(&self, principal: &str, entity: &Link) -> DomainResult<Link> {
        validate_link(&entity.text, &entity.url)?;

        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        LINKS.authorize_child(conn, principal, entity.id())?;

        let changed = conn
            .execute(
                "UPDATE links SET text = ?, url = ?, thumbnail = ?, thumbnail_public_id = ?, hidden = ?, updated_at = ? WHERE id = ?",
                params![
                    entity.text,
                    entity.url,
                    entity.thumbnail,
                    entity.thumbnail_public_id,
                    entity.hidden,
                    now_millis(),
                    entity.id
                ],
            )
            .map_err(internal)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Link {} not found", entity.id)));
        }

        conn.query_row(
            &format!("SELECT {} FROM links l WHERE l.id = ?", LINK_COLUMNS),
            params![entity.id],
            row_to_link,
        )
        .map_err(internal)
    }
}

/// Convert a database row to Link (columns in `LINK_COLUMNS` order)
pub(crate) fn row_to_link(row: &rusqlite::Row) -> rusqlite::Result<Link> {
    Ok(Link {
        id: row.get(0)?,
        section_id: row.get(1)?,
        text: row.get(2)?,
        url: row.get(3)?,
        thumbnail: row.get(4)?,
        thumbnail_public_id: row.get(5)?,
        hidden: row.get::<_, i32>(6)? != 0,
        index: row.get(7)?,
    })
}
