//! Form Repository
//!
//! Contact form configuration (one per profile) and its submissions.
//! Field settings are stored as a JSON document.

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{
    authorize_owner, ContactForm, DomainError, DomainResult, FormFields, FormSubmission,
    SubmissionValues,
};
use super::{inserted_id, internal, now_millis, ready, SharedConnection};

pub struct FormRepository {
    conn: SharedConnection,
}

impl FormRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn find(&self, profile_id: u32) -> DomainResult<Option<ContactForm>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        find_form(conn, profile_id)
    }

    /// Create the form with default fields if missing, delete it otherwise.
    ///
    /// Returns the form when it ends up enabled. Submissions are kept.
    pub async fn toggle(&self, profile_id: u32) -> DomainResult<Option<ContactForm>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        if find_form(conn, profile_id)?.is_some() {
            conn.execute("DELETE FROM forms WHERE profile_id = ?", params![profile_id])
                .map_err(internal)?;
            return Ok(None);
        }

        let form = ContactForm::new(profile_id);
        let fields = serde_json::to_string(&form.fields).map_err(internal)?;
        conn.execute(
            "INSERT INTO forms (profile_id, fields, accepting_submissions, updated_at) VALUES (?, ?, ?, ?)",
            params![profile_id, fields, form.accepting_submissions, now_millis()],
        )
        .map_err(internal)?;
        Ok(Some(form))
    }

    pub async fn update(&self, form: &ContactForm) -> DomainResult<ContactForm> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let fields = serde_json::to_string(&form.fields).map_err(internal)?;
        let changed = conn
            .execute(
                "UPDATE forms SET fields = ?, title = ?, submit_button_text = ?, success_message = ?, accepting_submissions = ?, updated_at = ? WHERE profile_id = ?",
                params![
                    fields,
                    form.title,
                    form.submit_button_text,
                    form.success_message,
                    form.accepting_submissions,
                    now_millis(),
                    form.profile_id
                ],
            )
            .map_err(internal)?;
        if changed == 0 {
            return Err(DomainError::NotFound("Form is not enabled".to_string()));
        }
        Ok(form.clone())
    }

    /// Store a submission that already passed `ContactForm::accept`
    pub async fn add_submission(&self, profile_id: u32, values: &SubmissionValues) -> DomainResult<FormSubmission> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let sent_at = now_millis();
        conn.execute(
            "INSERT INTO form_submissions (profile_id, name, email, subject, phone, message, sent_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                profile_id,
                values.name,
                values.email,
                values.subject,
                values.phone,
                values.message,
                sent_at
            ],
        )
        .map_err(internal)?;

        Ok(FormSubmission {
            id: inserted_id(conn)?,
            profile_id,
            values: values.clone(),
            sent_at,
        })
    }

    /// Newest first
    pub async fn list_submissions(&self, profile_id: u32) -> DomainResult<Vec<FormSubmission>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let mut stmt = conn
            .prepare(
                "SELECT id, profile_id, name, email, subject, phone, message, sent_at
                 FROM form_submissions WHERE profile_id = ?
                 ORDER BY sent_at DESC, id DESC",
            )
            .map_err(internal)?;
        let submissions = stmt
            .query_map(params![profile_id], row_to_submission)
            .map_err(internal)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(internal)?;
        Ok(submissions)
    }

    /// Delete a submission owned by `principal`
    pub async fn delete_submission(&self, principal: &str, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let owner_id: Option<String> = conn
            .query_row(
                "SELECT p.owner_id FROM form_submissions f
                 JOIN profiles p ON p.id = f.profile_id
                 WHERE f.id = ?",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(internal)?;
        let owner_id =
            owner_id.ok_or_else(|| DomainError::NotFound(format!("Submission {} not found", id)))?;
        authorize_owner(&owner_id, principal)?;

        conn.execute("DELETE FROM form_submissions WHERE id = ?", params![id])
            .map_err(internal)?;
        Ok(())
    }
}

fn find_form(conn: &Connection, profile_id: u32) -> DomainResult<Option<ContactForm>> {
    let row: Option<(String, Option<String>, Option<String>, Option<String>, bool)> = conn
        .query_row(
            "SELECT fields, title, submit_button_text, success_message, accepting_submissions
             FROM forms WHERE profile_id = ?",
            params![profile_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
        )
        .optional()
        .map_err(internal)?;

    let Some((fields, title, submit_button_text, success_message, accepting_submissions)) = row else {
        return Ok(None);
    };
    let fields: FormFields = serde_json::from_str(&fields).map_err(internal)?;

    Ok(Some(ContactForm {
        profile_id,
        fields,
        title,
        submit_button_text,
        success_message,
        accepting_submissions,
    }))
}

fn row_to_submission(row: &rusqlite::Row) -> rusqlite::Result<FormSubmission> {
    Ok(FormSubmission {
        id: row.get(0)?,
        profile_id: row.get(1)?,
        values: SubmissionValues {
            name: row.get(2)?,
            email: row.get(3)?,
            subject: row.get(4)?,
            phone: row.get(5)?,
            message: row.get(6)?,
        },
        sent_at: row.get(7)?,
    })
}
