//! SQLite-backed session store
//!
//! A key-value table of session name -> serialized conversation history.
//! History is typed in-process ([`History`]) and serialized to JSON only at
//! this boundary.

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::History;

/// SQLite-based session store
pub struct SessionDb {
    conn: Arc<Mutex<Connection>>,
}

impl SessionDb {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)
            .map_err(|e| Error::SessionStore(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::SessionStore(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        // WAL for concurrent readers during request handling
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::SessionStore(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                name TEXT PRIMARY KEY,
                history TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#,
        )
        .map_err(|e| Error::SessionStore(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }

    /// Whether a session with this name exists
    pub fn exists(&self, name: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM sessions WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Create a session with empty history.
    ///
    /// Fails with [`Error::SessionExists`] if the name is already taken.
    pub fn create(&self, name: &str) -> Result<()> {
        let conn = self.conn.lock();
        let now = Utc::now().to_rfc3339();
        let empty = serde_json::to_string(&History::new())?;

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO sessions (name, history, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            params![name, empty, now],
        )?;

        if inserted == 0 {
            return Err(Error::SessionExists(name.to_string()));
        }
        Ok(())
    }

    /// Load a session's history
    pub fn history(&self, name: &str) -> Result<History> {
        let conn = self.conn.lock();
        let raw: Option<String> = conn
            .query_row(
                "SELECT history FROM sessions WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(Error::InvalidSession(name.to_string())),
        }
    }

    /// Overwrite a session's history, truncating to the retention cap first.
    ///
    /// Last writer wins: concurrent updates to the same session are not
    /// merged.
    pub fn update_history(&self, name: &str, mut history: History) -> Result<()> {
        history.truncate_to_cap();
        let json = serde_json::to_string(&history)?;
        let now = Utc::now().to_rfc3339();

        let conn = self.conn.lock();
        let updated = conn.execute(
            "UPDATE sessions SET history = ?2, updated_at = ?3 WHERE name = ?1",
            params![name, json, now],
        )?;

        if updated == 0 {
            return Err(Error::InvalidSession(name.to_string()));
        }
        Ok(())
    }

    /// Delete a session record.
    ///
    /// Fails with [`Error::SessionNotFound`] if the name is unknown.
    pub fn delete(&self, name: &str) -> Result<()> {
        let conn = self.conn.lock();
        let deleted = conn.execute("DELETE FROM sessions WHERE name = ?1", params![name])?;

        if deleted == 0 {
            return Err(Error::SessionNotFound(name.to_string()));
        }
        Ok(())
    }

    /// All known session names, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT name FROM sessions ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Turn, HISTORY_CAP};

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sessions.db");

        let db = SessionDb::new(&path).unwrap();
        db.create("demo").unwrap();
        assert!(path.exists());

        // Data survives reopening the same file.
        drop(db);
        let reopened = SessionDb::new(&path).unwrap();
        assert!(reopened.exists("demo").unwrap());
    }

    #[test]
    fn test_create_and_exists() {
        let db = SessionDb::in_memory().unwrap();
        assert!(!db.exists("demo").unwrap());

        db.create("demo").unwrap();
        assert!(db.exists("demo").unwrap());
        assert!(db.history("demo").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_create_fails() {
        let db = SessionDb::in_memory().unwrap();
        db.create("demo").unwrap();

        let err = db.create("demo").unwrap_err();
        assert!(matches!(err, Error::SessionExists(_)));
    }

    #[test]
    fn test_update_truncates_to_cap() {
        let db = SessionDb::in_memory().unwrap();
        db.create("demo").unwrap();

        let mut history = History::new();
        for i in 0..7 {
            history.push(Turn::user(format!("q{}", i)));
            history.push(Turn::ai(format!("<p>a{}</p>", i)));
        }
        db.update_history("demo", history).unwrap();

        let stored = db.history("demo").unwrap();
        assert_eq!(stored.len(), HISTORY_CAP);
        // Most recent turns survive, in chronological order.
        let last = &stored.turns()[HISTORY_CAP - 1];
        assert_eq!(last.content, "<p>a6</p>");
    }

    #[test]
    fn test_ask_appends_user_then_ai() {
        let db = SessionDb::in_memory().unwrap();
        db.create("demo").unwrap();

        let mut history = db.history("demo").unwrap();
        history.push(Turn::user("what is this about?"));
        history.push(Turn::ai("<p>It is a report.</p>"));
        db.update_history("demo", history).unwrap();

        let stored = db.history("demo").unwrap();
        let turns = stored.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "what is this about?");
        assert_eq!(turns[1].content, "<p>It is a report.</p>");
    }

    #[test]
    fn test_update_unknown_session_fails() {
        let db = SessionDb::in_memory().unwrap();
        let err = db.update_history("ghost", History::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidSession(_)));
    }

    #[test]
    fn test_delete_unknown_session_fails() {
        let db = SessionDb::in_memory().unwrap();
        let err = db.delete("ghost").unwrap_err();
        assert!(matches!(err, Error::SessionNotFound(_)));
    }

    #[test]
    fn test_delete_removes_from_listing() {
        let db = SessionDb::in_memory().unwrap();
        db.create("alpha").unwrap();
        db.create("beta").unwrap();
        assert_eq!(db.list().unwrap(), vec!["alpha", "beta"]);

        db.delete("alpha").unwrap();
        assert_eq!(db.list().unwrap(), vec!["beta"]);
        assert!(matches!(
            db.history("alpha").unwrap_err(),
            Error::InvalidSession(_)
        ));
    }
}
