//! Ordered Tables
//!
//! SQL side of the dense-ordering protocol. A table descriptor names the
//! child table, its parent column and how ownership is resolved; links,
//! sections and social links all run through the functions here. Callers
//! pass a connection or an open transaction and commit themselves.

use rusqlite::{params, Connection, OptionalExtension};

use super::{internal, now_millis};
use crate::domain::{authorize_owner, ordering, DomainError, DomainResult};

pub(crate) struct OrderedTable {
    pub table: &'static str,
    pub parent_column: &'static str,
    /// Entity name for error messages
    pub label: &'static str,
    pub parent_label: &'static str,
    /// `SELECT parent_id, owner_id` of a child row by id
    pub child_owner_sql: &'static str,
    /// `SELECT owner_id` of a parent row by id
    pub parent_owner_sql: &'static str,
}

pub(crate) const SECTIONS: OrderedTable = OrderedTable {
    table: "sections",
    parent_column: "profile_id",
    label: "Section",
    parent_label: "Profile",
    child_owner_sql: "SELECT s.profile_id, p.owner_id FROM sections s
                      JOIN profiles p ON p.id = s.profile_id
                      WHERE s.id = ?",
    parent_owner_sql: "SELECT owner_id FROM profiles WHERE id = ?",
};

pub(crate) const LINKS: OrderedTable = OrderedTable {
    table: "links",
    parent_column: "section_id",
    label: "Link",
    parent_label: "Section",
    child_owner_sql: "SELECT l.section_id, p.owner_id FROM links l
                      JOIN sections s ON s.id = l.section_id
                      JOIN profiles p ON p.id = s.profile_id
                      WHERE l.id = ?",
    parent_owner_sql: "SELECT p.owner_id FROM sections s
                       JOIN profiles p ON p.id = s.profile_id
                       WHERE s.id = ?",
};

pub(crate) const SOCIAL_LINKS: OrderedTable = OrderedTable {
    table: "social_links",
    parent_column: "profile_id",
    label: "Social link",
    parent_label: "Profile",
    child_owner_sql: "SELECT s.profile_id, p.owner_id FROM social_links s
                      JOIN profiles p ON p.id = s.profile_id
                      WHERE s.id = ?",
    parent_owner_sql: "SELECT owner_id FROM profiles WHERE id = ?",
};

impl OrderedTable {
    /// Index for a child appended under `parent_id`
    pub fn next_position(&self, conn: &Connection, parent_id: u32) -> DomainResult<u32> {
        let sql = format!(
            "SELECT MAX(position) FROM {} WHERE {} = ?",
            self.table, self.parent_column
        );
        let max: Option<u32> = conn
            .query_row(&sql, params![parent_id], |row| row.get(0))
            .map_err(internal)?;
        Ok(ordering::next_index(max))
    }

    /// Child ids in current order; ties on position fall back to id
    pub fn sibling_ids(&self, conn: &Connection, parent_id: u32) -> DomainResult<Vec<u32>> {
        let sql = format!(
            "SELECT id FROM {} WHERE {} = ? ORDER BY position, id",
            self.table, self.parent_column
        );
        let mut stmt = conn.prepare(&sql).map_err(internal)?;
        let ids = stmt
            .query_map(params![parent_id], |row| row.get::<_, u32>(0))
            .map_err(internal)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(internal)?;
        Ok(ids)
    }

    /// Rewrite positions under `parent_id` to `0..n` keeping the current order
    pub fn renumber(&self, conn: &Connection, parent_id: u32) -> DomainResult<()> {
        let ids = self.sibling_ids(conn, parent_id)?;
        self.write_positions(conn, &ids)
    }

    fn write_positions(&self, conn: &Connection, ids_in_order: &[u32]) -> DomainResult<()> {
        let sql = format!(
            "UPDATE {} SET position = ?, updated_at = ? WHERE id = ?",
            self.table
        );
        let mut stmt = conn.prepare(&sql).map_err(internal)?;
        let now = now_millis();
        for (id, pos) in ordering::renumber(ids_in_order) {
            stmt.execute(params![pos, now, id]).map_err(internal)?;
        }
        Ok(())
    }

    /// Parent id of a child, after checking that `principal` owns it
    pub fn authorize_child(&self, conn: &Connection, principal: &str, id: u32) -> DomainResult<u32> {
        let found: Option<(u32, String)> = conn
            .query_row(self.child_owner_sql, params![id], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .map_err(internal)?;

        let (parent_id, owner_id) = found
            .ok_or_else(|| DomainError::NotFound(format!("{} {} not found", self.label, id)))?;
        authorize_owner(&owner_id, principal)?;
        Ok(parent_id)
    }

    pub fn authorize_parent(&self, conn: &Connection, principal: &str, parent_id: u32) -> DomainResult<()> {
        let owner_id: Option<String> = conn
            .query_row(self.parent_owner_sql, params![parent_id], |row| row.get(0))
            .optional()
            .map_err(internal)?;

        let owner_id = owner_id.ok_or_else(|| {
            DomainError::NotFound(format!("{} {} not found", self.parent_label, parent_id))
        })?;
        authorize_owner(&owner_id, principal)
    }

    /// Apply a client-submitted order.
    ///
    /// Every id is checked (existence, ownership, same parent, full
    /// permutation) before anything is written.
    pub fn apply_order(&self, conn: &Connection, principal: &str, new_order: &[u32]) -> DomainResult<()> {
        let Some(first) = new_order.first() else {
            return Err(DomainError::Validation("New order must not be empty".to_string()));
        };

        let parent_id = self.authorize_child(conn, principal, *first)?;
        for id in &new_order[1..] {
            let other = self.authorize_child(conn, principal, *id)?;
            if other != parent_id {
                return Err(DomainError::Validation(format!(
                    "{} {} belongs to a different {}",
                    self.label,
                    id,
                    self.parent_label.to_lowercase()
                )));
            }
        }

        let current = self.sibling_ids(conn, parent_id)?;
        ordering::validate_permutation(&current, new_order)?;
        self.write_positions(conn, new_order)
    }

    /// Server-side drag and drop: splice `id` to `to_index` and persist
    pub fn move_child(&self, conn: &Connection, principal: &str, id: u32, to_index: u32) -> DomainResult<()> {
        let parent_id = self.authorize_child(conn, principal, id)?;
        let current = self.sibling_ids(conn, parent_id)?;
        let reordered = ordering::splice(&current, id, to_index)?;
        if reordered == current {
            return Ok(());
        }
        self.write_positions(conn, &reordered)
    }

    /// Delete a child row and renumber its former siblings
    pub fn delete_child(&self, conn: &Connection, principal: &str, id: u32) -> DomainResult<()> {
        let parent_id = self.authorize_child(conn, principal, id)?;
        let sql = format!("DELETE FROM {} WHERE id = ?", self.table);
        conn.execute(&sql, params![id]).map_err(internal)?;
        self.renumber(conn, parent_id)
    }
}
