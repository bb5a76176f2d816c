//! Database Connection and Setup
//!
//! Manages the SQLite connection and schema migrations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Connection shared by every repository; `None` until initialized
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
    pub path: PathBuf,
}

impl DbState {
    pub fn new(path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            path,
        }
    }

    /// Handle passed to repositories
    pub fn handle(&self) -> SharedConnection {
        self.conn.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.conn.lock().await.is_some()
    }
}

/// Open the database at `db_path` (":memory:" for a private in-memory db)
/// and bring the schema up to date
pub async fn init_db(db_path: &Path) -> Result<DbState, String> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path)
    }
    .map_err(|e| format!("Failed to open db: {}", e))?;

    conn.busy_timeout(Duration::from_secs(5))
        .map_err(|e| format!("Failed to set busy timeout: {}", e))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| format!("Failed to enable foreign keys: {}", e))?;

    run_migrations(&conn)?;

    let state = DbState::new(db_path.to_path_buf());
    *state.conn.lock().await = Some(conn);
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

fn add_column_if_missing(conn: &Connection, table: &str, column: &str, ddl: &str) -> Result<(), String> {
    if column_exists(conn, table, column) {
        return Ok(());
    }
    conn.execute(&format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, ddl), [])
        .map_err(|e| format!("Failed to add {}.{}: {}", table, column, e))?;
    Ok(())
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL UNIQUE,
            bio TEXT,
            seo_title TEXT,
            seo_description TEXT,
            social_icon_placement TEXT NOT NULL DEFAULT 'TOP',
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS sections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            profile_id INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            name TEXT,
            position INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            section_id INTEGER NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
            text TEXT NOT NULL,
            url TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS forms (
            profile_id INTEGER PRIMARY KEY REFERENCES profiles(id) ON DELETE CASCADE,
            fields TEXT NOT NULL,
            title TEXT,
            submit_button_text TEXT,
            success_message TEXT,
            accepting_submissions INTEGER NOT NULL DEFAULT 1,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS form_submissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            profile_id INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            name TEXT,
            email TEXT,
            subject TEXT,
            phone TEXT,
            message TEXT,
            sent_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS social_links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            profile_id INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            url TEXT NOT NULL,
            icon TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS testimonials (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            profile_id INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            message TEXT NOT NULL,
            rating INTEGER NOT NULL,
            should_show INTEGER NOT NULL DEFAULT 0,
            avatar TEXT,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS link_clicks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            link_id INTEGER NOT NULL REFERENCES links(id) ON DELETE CASCADE,
            profile_id INTEGER NOT NULL,
            user_agent TEXT,
            clicked_at INTEGER NOT NULL
        );",
    )
    .map_err(|e| e.to_string())?;

    // Link decoration columns arrived after the first schema
    add_column_if_missing(conn, "links", "thumbnail", "TEXT")?;
    add_column_if_missing(conn, "links", "thumbnail_public_id", "TEXT")?;
    add_column_if_missing(conn, "links", "hidden", "INTEGER NOT NULL DEFAULT 0")?;

    // Create indexes for faster parent-child queries
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_sections_profile ON sections(profile_id, position);
         CREATE INDEX IF NOT EXISTS idx_links_section ON links(section_id, position);
         CREATE INDEX IF NOT EXISTS idx_submissions_profile ON form_submissions(profile_id, sent_at);
         CREATE INDEX IF NOT EXISTS idx_clicks_link ON link_clicks(link_id);
         CREATE INDEX IF NOT EXISTS idx_social_links_profile ON social_links(profile_id, position);
         CREATE INDEX IF NOT EXISTS idx_testimonials_profile ON testimonials(profile_id, created_at);",
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
