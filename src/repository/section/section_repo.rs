//! Section Repository - Lookups and Content Updates

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult, Entity, Section, SectionWithLinks};
use super::super::link::{row_to_link, LINK_COLUMNS};
use super::super::ordering::SECTIONS;
use super::super::traits::Repository;
use super::super::{internal, now_millis, ready, SharedConnection};

pub(super) const SECTION_COLUMNS: &str = "id, profile_id, name, position";

/// SQLite implementation of Section repository
pub struct SectionRepository {
    pub(super) conn: SharedConnection,
}

impl SectionRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Sections of a profile in order, each with its links in order.
    ///
    /// Hidden links are left out unless `include_hidden` is set.
    pub async fn with_links(&self, profile_id: u32, include_hidden: bool) -> DomainResult<Vec<SectionWithLinks>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let sections = list_sections(conn, profile_id)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM links l
                 JOIN sections s ON s.id = l.section_id
                 WHERE s.profile_id = ? AND (? OR l.hidden = 0)
                 ORDER BY s.position, s.id, l.position, l.id",
                LINK_COLUMNS
            ))
            .map_err(internal)?;
        let links = stmt
            .query_map(params![profile_id, include_hidden], row_to_link)
            .map_err(internal)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(internal)?;

        let mut result: Vec<SectionWithLinks> = sections
            .into_iter()
            .map(|section| SectionWithLinks { section, links: Vec::new() })
            .collect();
        for link in links {
            if let Some(entry) = result.iter_mut().find(|s| s.section.id == link.section_id) {
                entry.links.push(link);
            }
        }
        Ok(result)
    }
}

#[async_trait]
impl Repository<Section> for SectionRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Section>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        conn.query_row(
            &format!("SELECT {} FROM sections WHERE id = ?", SECTION_COLUMNS),
            params![id],
            row_to_section,
        )
        .optional()
        .map_err(internal)
    }

    /// Renames only; `index` is left untouched
    async fn update(&self, principal: &str, entity: &Section) -> DomainResult<Section> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        SECTIONS.authorize_child(conn, principal, entity.id())?;

        let changed = conn
            .execute(
                "UPDATE sections SET name = ?, updated_at = ? WHERE id = ?",
                params![entity.name, now_millis(), entity.id],
            )
            .map_err(internal)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Section {} not found", entity.id)));
        }

        load(conn, entity.id)
    }
}

pub(super) fn load(conn: &Connection, id: u32) -> DomainResult<Section> {
    conn.query_row(
        &format!("SELECT {} FROM sections WHERE id = ?", SECTION_COLUMNS),
        params![id],
        row_to_section,
    )
    .map_err(internal)
}

pub(super) fn list_sections(conn: &Connection, profile_id: u32) -> DomainResult<Vec<Section>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM sections WHERE profile_id = ? ORDER BY position, id",
            SECTION_COLUMNS
        ))
        .map_err(internal)?;
    let sections = stmt
        .query_map(params![profile_id], row_to_section)
        .map_err(internal)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(internal)?;
    Ok(sections)
}

/// Convert a database row to Section (columns in `SECTION_COLUMNS` order)
pub(super) fn row_to_section(row: &rusqlite::Row) -> rusqlite::Result<Section> {
    Ok(Section {
        id: row.get(0)?,
        profile_id: row.get(1)?,
        name: row.get(2)?,
        index: row.get(3)?,
    })
}
