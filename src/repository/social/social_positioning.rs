//! Social Link Positioning Operations
//!
//! Social links are kept in a dense order within their profile.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{validate_social_link, DomainResult, Orderable, SocialLink};
use super::super::ordering::SOCIAL_LINKS;
use super::super::traits::OrderedRepository;
use super::super::{inserted_id, internal, now_millis, ready, ready_mut};
use super::social_repo::{list_social_links, load, SocialLinkRepository};

#[async_trait]
impl OrderedRepository<SocialLink> for SocialLinkRepository {
    async fn append(&self, principal: &str, entity: &SocialLink) -> DomainResult<SocialLink> {
        validate_social_link(&entity.url, &entity.icon)?;

        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        let profile_id = entity.parent_id();
        SOCIAL_LINKS.authorize_parent(&tx, principal, profile_id)?;
        let position = SOCIAL_LINKS.next_position(&tx, profile_id)?;

        tx.execute(
            "INSERT INTO social_links (profile_id, url, icon, position, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![profile_id, entity.url, entity.icon, position, now_millis()],
        )
        .map_err(internal)?;
        let id = inserted_id(&tx)?;
        tx.commit().map_err(internal)?;

        let mut link = entity.clone();
        link.id = id;
        link.index = position;
        Ok(link)
    }

    async fn remove(&self, principal: &str, id: u32) -> DomainResult<SocialLink> {
        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        SOCIAL_LINKS.authorize_child(&tx, principal, id)?;
        let removed = load(&tx, id)?;
        SOCIAL_LINKS.delete_child(&tx, principal, id)?;
        tx.commit().map_err(internal)?;

        Ok(removed)
    }

    async fn reorder(&self, principal: &str, new_order: &[u32]) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        SOCIAL_LINKS.apply_order(&tx, principal, new_order)?;
        tx.commit().map_err(internal)
    }

    async fn move_to(&self, principal: &str, id: u32, to_index: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = ready_mut(&mut guard)?;
        let tx = conn.transaction().map_err(internal)?;

        SOCIAL_LINKS.move_child(&tx, principal, id, to_index)?;
        tx.commit().map_err(internal)
    }

    async fn children(&self, parent_id: u32) -> DomainResult<Vec<SocialLink>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        list_social_links(conn, parent_id)
    }

    async fn find_owned(&self, principal: &str, id: u32) -> DomainResult<SocialLink> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        SOCIAL_LINKS.authorize_child(conn, principal, id)?;
        load(conn, id)
    }
}
