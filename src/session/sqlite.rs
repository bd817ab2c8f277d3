use crate::error::{AttrangiError, Result};
use crate::session::SessionStore;
use anyhow::Context;
use chrono::Utc;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// SQLite-backed key/value store for the session identifier
pub struct SqliteSessionStore {
    db_path: PathBuf,
}

impl SqliteSessionStore {
    /// Open the store in the user's data directory
    ///
    /// Initializes `session.db` under the platform data dir, creating the
    /// directory if needed.
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "attrangi", "attrangi")
            .ok_or_else(|| AttrangiError::Storage("Could not determine data directory".into()))?;

        Self::new_with_path(proj_dirs.data_dir().join("session.db"))
    }

    /// Open the store at the specified database path.
    ///
    /// This is primarily useful for tests and for pointing several profiles
    /// at separate files.
    ///
    /// # Examples
    ///
    /// ```
    /// use attrangi::session::SqliteSessionStore;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = SqliteSessionStore::new_with_path(dir.path().join("session.db")).unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();

        // Ensure parent directory exists so opening the DB file succeeds.
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create parent directory for database")
                .map_err(|e| AttrangiError::Storage(e.to_string()))?;
        }

        let store = Self { db_path };
        store.init()?;
        Ok(store)
    }

    /// Location of the backing database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .context("Failed to open database")
            .map_err(|e| AttrangiError::Storage(e.to_string()).into())
    }

    fn init(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create tables")
        .map_err(|e| AttrangiError::Storage(e.to_string()))?;

        Ok(())
    }
}

impl SessionStore for SqliteSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.open()?;

        let value = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .context("Failed to query session value")
            .map_err(|e| AttrangiError::Storage(e.to_string()))?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.open()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .context("Failed to store session value")
        .map_err(|e| AttrangiError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionContext, DEFAULT_STORAGE_KEY};

    fn temp_store() -> (SqliteSessionStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let store = SqliteSessionStore::new_with_path(dir.path().join("session.db"))
            .expect("failed to open store");
        (store, dir)
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let (store, _dir) = temp_store();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let (store, _dir) = temp_store();
        store.set("k", "v1").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v1"));
    }

    #[test]
    fn test_set_overwrites() {
        let (store, _dir) = temp_store();
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_new_with_path_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let db_path = dir.path().join("nested").join("deeper").join("session.db");
        let store = SqliteSessionStore::new_with_path(&db_path).expect("open failed");
        assert_eq!(store.db_path(), db_path.as_path());
        assert!(db_path.exists());
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let db_path = dir.path().join("session.db");

        let first = {
            let store = SqliteSessionStore::new_with_path(&db_path).unwrap();
            SessionContext::initialize(&store, DEFAULT_STORAGE_KEY).unwrap()
        };

        let store = SqliteSessionStore::new_with_path(&db_path).unwrap();
        let second = SessionContext::initialize(&store, DEFAULT_STORAGE_KEY).unwrap();

        assert!(first.was_created());
        assert!(!second.was_created());
        assert_eq!(first.id(), second.id());
    }
}
