//! Link Positioning Operations
//!
//! Links are kept in a dense order within their section.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{validate_link, DomainResult, Link, Orderable};
use super::super::ordering::LINKS;
use super::super::traits::OrderedRepository;
use super::super::{inserted_id, internal, now_millis, ready, ready_mut};
use super::link_repo::{row_to_link, LinkRepository, LINK_COLUMNS};

fn load(conn: &rusqlite::Connection, id: u32) -> DomainResult<Link> {
    conn.query_row(
        &format!("SELECT {} FROM links l WHERE l.id = ?", LINK_COLUMNS),
        params![id],
        row_to_link,
    )
    .map_err(internal)
}

#[async_trait]
impl OrderedRepository<Link> for LinkRepository {
    async fn append(&self, principal: &str, entity: &Link) -> DomainResult<Link> {
        validate_link(&entity.text, &entity.url)?;

        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        let section_id = entity.parent_id();
        LINKS.authorize_parent(&tx, principal, section_id)?;
        let position = LINKS.next_position(&tx, section_id)?;

        tx.execute(
            "INSERT INTO links (section_id, text, url, thumbnail, thumbnail_public_id, hidden, position, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                section_id,
                entity.text,
                entity.url,
                entity.thumbnail,
                entity.thumbnail_public_id,
                entity.hidden,
                position,
                now_millis()
            ],
        )
        .map_err(internal)?;
        let id = inserted_id(&tx)?;
        tx.commit().map_err(internal)?;

        let mut link = entity.clone();
        link.id = id;
        link.index = position;
        Ok(link)
    }

    async fn remove(&self, principal: &str, id: u32) -> DomainResult<Link> {
        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        LINKS.authorize_child(&tx, principal, id)?;
        let removed = load(&tx, id)?;
        LINKS.delete_child(&tx, principal, id)?;
        tx.commit().map_err(internal)?;

        Ok(removed)
    }

    async fn reorder(&self, principal: &str, new_order: &[u32]) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        LINKS.apply_order(&tx, principal, new_order)?;
        tx.commit().map_err(internal)
    }

    async fn move_to(&self, principal: &str, id: u32, to_index: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        LINKS.move_child(&tx, principal, id, to_index)?;
        tx.commit().map_err(internal)
    }

    async fn children(&self, parent_id: u32) -> DomainResult<Vec<Link>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM links l WHERE l.section_id = ? ORDER BY l.position, l.id",
                LINK_COLUMNS
            ))
            .map_err(internal)?;
        let links = stmt
            .query_map(params![parent_id], row_to_link)
            .map_err(internal)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(internal)?;
        Ok(links)
    }

    async fn find_owned(&self, principal: &str, id: u32) -> DomainResult<Link> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        LINKS.authorize_child(conn, principal, id)?;
        load(conn, id)
    }
}
