//! Section Positioning Operations
//!
//! Sections are kept in a dense order within their profile. Deleting a
//! section also deletes its links (foreign key cascade).

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainResult, Orderable, Section};
use super::super::ordering::SECTIONS;
use super::super::traits::OrderedRepository;
use super::super::{inserted_id, internal, now_millis, ready, ready_mut};
use super::section_repo::{list_sections, load, SectionRepository};

#[async_trait]
impl OrderedRepository<Section> for SectionRepository {
    async fn append(&self, principal: &str, entity: &Section) -> DomainResult<Section> {
        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        let profile_id = entity.parent_id();
        SECTIONS.authorize_parent(&tx, principal, profile_id)?;
        let position = SECTIONS.next_position(&tx, profile_id)?;

        tx.execute(
            "INSERT INTO sections (profile_id, name, position, updated_at) VALUES (?, ?, ?, ?)",
            params![profile_id, entity.name, position, now_millis()],
        )
        .map_err(internal)?;
        let id = inserted_id(&tx)?;
        tx.commit().map_err(internal)?;

        let mut section = entity.clone();
        section.id = id;
        section.index = position;
        Ok(section)
    }

    async fn remove(&self, principal: &str, id: u32) -> DomainResult<Section> {
        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        SECTIONS.authorize_child(&tx, principal, id)?;
        let removed = load(&tx, id)?;
        SECTIONS.delete_child(&tx, principal, id)?;
        tx.commit().map_err(internal)?;

        log::info!("Deleted section {} of profile {}", removed.id, removed.profile_id);
        Ok(removed)
    }

    async fn reorder(&self, principal: &str, new_order: &[u32]) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        SECTIONS.apply_order(&tx, principal, new_order)?;
        tx.commit().map_err(internal)
    }

    async fn move_to(&self, principal: &str, id: u32, to_index: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        SECTIONS.move_child(&tx, principal, id, to_index)?;
        tx.commit().map_err(internal)
    }

    async fn children(&self, parent_id: u32) -> DomainResult<Vec<Section>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        list_sections(conn, parent_id)
    }

    async fn find_owned(&self, principal: &str, id: u32) -> DomainResult<Section> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        SECTIONS.authorize_child(conn, principal, id)?;
        load(conn, id)
    }
}
