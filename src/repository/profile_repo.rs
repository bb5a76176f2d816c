//! Profile Repository
//!
//! One profile per principal; usernames are unique.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, ToSql};

use crate::domain::{
    authorize_owner, validate_username, DomainError, DomainResult, PageSettings, Profile, SocialIconPlacement,
};
use super::traits::Repository;
use super::{conflict_or_internal, inserted_id, internal, now_millis, ready, SharedConnection};

const PROFILE_COLUMNS: &str =
    "id, owner_id, username, bio, seo_title, seo_description, social_icon_placement";

pub struct ProfileRepository {
    conn: SharedConnection,
}

impl ProfileRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Create the principal's profile
    pub async fn create(&self, owner_id: &str, username: &str, bio: Option<String>) -> DomainResult<Profile> {
        validate_username(username)?;

        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        if find_one(conn, "owner_id", &owner_id)?.is_some() {
            return Err(DomainError::Conflict("You already have a profile".to_string()));
        }

        let now = now_millis();
        conn.execute(
            "INSERT INTO profiles (owner_id, username, bio, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![owner_id, username, bio, now, now],
        )
        .map_err(|e| conflict_or_internal(e, &format!("Username '{}'", username)))?;

        let mut profile = Profile::new(inserted_id(conn)?, owner_id.to_string(), username.to_string());
        profile.bio = bio;
        Ok(profile)
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> DomainResult<Option<Profile>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        find_one(conn, "owner_id", &owner_id)
    }

    pub async fn find_by_username(&self, username: &str) -> DomainResult<Option<Profile>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        find_one(conn, "username", &username)
    }

    /// The principal's profile, or `NotFound` when they have none yet
    pub async fn require_owned(&self, owner_id: &str) -> DomainResult<Profile> {
        self.find_by_owner(owner_id)
            .await?
            .ok_or_else(no_profile)
    }

    /// Settings of the principal's own profile
    pub async fn update_settings(&self, owner_id: &str, settings: &PageSettings) -> DomainResult<Profile> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let changed = conn
            .execute(
                "UPDATE profiles SET seo_title = ?, seo_description = ?, social_icon_placement = ?, updated_at = ? WHERE owner_id = ?",
                params![
                    settings.seo_title,
                    settings.seo_description,
                    settings.social_icon_placement.as_str(),
                    now_millis(),
                    owner_id
                ],
            )
            .map_err(internal)?;
        if changed == 0 {
            return Err(no_profile());
        }

        find_one(conn, "owner_id", &owner_id)?.ok_or_else(no_profile)
    }
}

#[async_trait]
impl Repository<Profile> for ProfileRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Profile>> {
        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;
        find_one(conn, "id", &id)
    }

    /// Writes username and bio
    async fn update(&self, principal: &str, entity: &Profile) -> DomainResult<Profile> {
        validate_username(&entity.username)?;

        let guard = self.conn.lock().await;
        let conn = ready(&guard)?;

        let stored = find_one(conn, "id", &entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("Profile {} not found", entity.id)))?;
        authorize_owner(&stored.owner_id, principal)?;

        let changed = conn
            .execute(
                "UPDATE profiles SET username = ?, bio = ?, updated_at = ? WHERE id = ?",
                params![entity.username, entity.bio, now_millis(), entity.id],
            )
            .map_err(|e| conflict_or_internal(e, &format!("Username '{}'", entity.username)))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Profile {} not found", entity.id)));
        }

        find_one(conn, "id", &entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("Profile {} not found", entity.id)))
    }
}

fn no_profile() -> DomainError {
    DomainError::NotFound("Profile not found; create one first".to_string())
}

/// Look a profile up by one of its unique columns
fn find_one(conn: &Connection, column: &str, value: &dyn ToSql) -> DomainResult<Option<Profile>> {
    conn.query_row(
        &format!("SELECT {} FROM profiles WHERE {} = ?", PROFILE_COLUMNS, column),
        params![value],
        row_to_profile,
    )
    .optional()
    .map_err(internal)
}

/// Convert a database row to Profile
fn row_to_profile(row: &rusqlite::Row) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        username: row.get(2)?,
        bio: row.get(3)?,
        settings: PageSettings {
            seo_title: row.get(4)?,
            seo_description: row.get(5)?,
            social_icon_placement: SocialIconPlacement::from_str(&row.get::<_, String>(6)?),
        },
    })
}
