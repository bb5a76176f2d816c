//! Social Link Repository - Lookups and Content Updates

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{validate_social_link, DomainError, DomainResult, Entity, SocialLink};
use super::super::ordering::SOCIAL_LINKS;
use super::super::traits::Repository;
use super::super::{internal, now_millis, ready, SharedConnection};

const SOCIAL_COLUMNS: &str = "id, profile_id, url, icon, position";

pub struct SocialLinkRepository {
    pub(super) conn: SharedConnection,
}

impl SocialLinkRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<SocialLink> for SocialLinkRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<SocialLink>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        conn.query_row(
            &format!("SELECT {} FROM social_links WHERE id = ?", SOCIAL_COLUMNS),
            params![id],
            row_to_social_link,
        )
        .optional()
        .map_err(internal)
    }

    /// Writes url and icon; `index` is left untouched
    async fn update(&self, principal: &str, entity: &SocialLink) -> DomainResult<SocialLink> {
        validate_social_link(&entity.url, &entity.icon)?;

        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        SOCIAL_LINKS.authorize_child(conn, principal, entity.id())?;
        let changed = conn
            .execute(
                "UPDATE social_links SET url = ?, icon = ?, updated_at = ? WHERE id = ?",
                params![entity.url, entity.icon, now_millis(), entity.id],
            )
            .map_err(internal)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Social link {} not found", entity.id)));
        }

        load(conn, entity.id)
    }
}

pub(super) fn load(conn: &Connection, id: u32) -> DomainResult<SocialLink> {
    conn.query_row(
        &format!("SELECT {} FROM social_links WHERE id = ?", SOCIAL_COLUMNS),
        params![id],
        row_to_social_link,
    )
    .map_err(internal)
}

pub(super) fn list_social_links(conn: &Connection, profile_id: u32) -> DomainResult<Vec<SocialLink>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM social_links WHERE profile_id = ? ORDER BY position, id",
            SOCIAL_COLUMNS
        ))
        .map_err(internal)?;
    let links = stmt
        .query_map(params![profile_id], row_to_social_link)
        .map_err(internal)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(internal)?;
    Ok(links)
}

fn row_to_social_link(row: &rusqlite::Row) -> rusqlite::Result<SocialLink> {
    Ok(SocialLink {
        id: row.get(0)?,
        profile_id: row.get(1)?,
        url: row.get(2)?,
        icon: row.get(3)?,
        index: row.get(4)?,
    })
}
