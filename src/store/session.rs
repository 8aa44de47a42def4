//! Persisted session state.
//!
//! One SQLite table with a single well-known key holding the admin
//! token. Presence of the row means "authenticated"; `clear` wipes the
//! table wholesale, which is what logout and the 403 interceptor both
//! rely on.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

const TOKEN_KEY: &str = "admin_token";

#[derive(Debug)]
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).with_context(|| format!("open db {}", path.display()))?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    pub fn load_token(&self) -> Result<Option<String>> {
        let token = self
            .conn
            .query_row(
                "SELECT value FROM session WHERE key = ?1",
                params![TOKEN_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(token)
    }

    pub fn save_token(&self, token: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO session(key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![TOKEN_KEY, token],
        )?;
        Ok(())
    }

    /// Drops every session row, not just the token.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM session", [])?;
        Ok(())
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS session (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_db(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("khuddam-session-{name}-{}.sqlite3", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_token_roundtrip() {
        let path = temp_db("roundtrip");
        let store = SessionStore::open(&path).unwrap();
        assert_eq!(store.load_token().unwrap(), None);
        store.save_token("tok123").unwrap();
        assert_eq!(store.load_token().unwrap(), Some("tok123".to_string()));
        store.save_token("tok456").unwrap();
        assert_eq!(store.load_token().unwrap(), Some("tok456".to_string()));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_clear_wipes_everything() {
        let path = temp_db("clear");
        let store = SessionStore::open(&path).unwrap();
        store.save_token("tok123").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load_token().unwrap(), None);
        let _ = std::fs::remove_file(&path);
    }
}
