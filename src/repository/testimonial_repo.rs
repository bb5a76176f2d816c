//! Testimonial Repository
//!
//! Visitor reviews; only the owner can show, hide or delete them.

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{authorize_owner, DomainError, DomainResult, NewTestimonial, Testimonial};
use super::{inserted_id, internal, now_millis, ready, SharedConnection};

const TESTIMONIAL_COLUMNS: &str =
    "t.id, t.profile_id, t.name, t.email, t.message, t.rating, t.should_show, t.avatar, t.created_at";

pub struct TestimonialRepository {
    conn: SharedConnection,
}

impl TestimonialRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Store a visitor's testimonial; it starts hidden
    pub async fn submit(&self, profile_id: u32, input: &NewTestimonial) -> DomainResult<Testimonial> {
        let input = input.validated()?;

        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let created_at = now_millis();
        conn.execute(
            "INSERT INTO testimonials (profile_id, name, email, message, rating, should_show, avatar, created_at) VALUES (?, ?, ?, ?, ?, 0, ?, ?)",
            params![
                profile_id,
                input.name,
                input.email,
                input.message,
                input.rating,
                input.avatar,
                created_at
            ],
        )
        .map_err(internal)?;

        Ok(Testimonial {
            id: inserted_id(conn)?,
            profile_id,
            name: input.name,
            email: input.email,
            message: input.message,
            rating: input.rating,
            should_show: false,
            avatar: input.avatar,
            created_at,
        })
    }

    /// Newest first; `shown_only` leaves out hidden ones
    pub async fn list(&self, profile_id: u32, shown_only: bool) -> DomainResult<Vec<Testimonial>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM testimonials t
                 WHERE t.profile_id = ? AND (? = 0 OR t.should_show = 1)
                 ORDER BY t.created_at DESC, t.id DESC",
                TESTIMONIAL_COLUMNS
            ))
            .map_err(internal)?;
        let testimonials = stmt
            .query_map(params![profile_id, shown_only], row_to_testimonial)
            .map_err(internal)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(internal)?;
        Ok(testimonials)
    }

    /// Flip `should_show` on a testimonial owned by `principal`
    pub async fn toggle_visibility(&self, principal: &str, id: u32) -> DomainResult<Testimonial> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        authorize(conn, principal, id)?;
        conn.execute(
            "UPDATE testimonials SET should_show = 1 - should_show WHERE id = ?",
            params![id],
        )
        .map_err(internal)?;

        conn.query_row(
            &format!("SELECT {} FROM testimonials t WHERE t.id = ?", TESTIMONIAL_COLUMNS),
            params![id],
            row_to_testimonial,
        )
        .map_err(internal)
    }

    pub async fn delete(&self, principal: &str, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        authorize(conn, principal, id)?;
        conn.execute("DELETE FROM testimonials WHERE id = ?", params![id])
            .map_err(internal)?;
        Ok(())
    }
}

fn authorize(conn: &Connection, principal: &str, id: u32) -> DomainResult<()> {
    let owner_id: Option<String> = conn
        .query_row(
            "SELECT p.owner_id FROM testimonials t
             JOIN profiles p ON p.id = t.profile_id
             WHERE t.id = ?",
            params![id],
            |row| row.get(0),
        )
        .optional()
        .map_err(internal)?;
    let owner_id =
        owner_id.ok_or_else(|| DomainError::NotFound(format!("Testimonial {} not found", id)))?;
    authorize_owner(&owner_id, principal)
}

fn row_to_testimonial(row: &rusqlite::Row) -> rusqlite::Result<Testimonial> {
    Ok(Testimonial {
        id: row.get(0)?,
        profile_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        message: row.get(4)?,
        rating: row.get(5)?,
        should_show: row.get(6)?,
        avatar: row.get(7)?,
        created_at: row.get(8)?,
    })
}
