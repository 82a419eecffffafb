//! Credential store for the signed-in user
//! SQLite key/value table holding the user id and auth token written at sign-in

use rusqlite::{params, Connection, Result};
use std::path::Path;
use tracing::debug;

pub struct CredentialStore {
    conn: Connection,
}

impl CredentialStore {
    /// Open or create the store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        debug!(path = %path.display(), "Credential store opened");
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let store = Self { conn: Connection::open_in_memory()? };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS credentials (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a stored value; `None` when the key was never written
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM credentials WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO credentials (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM credentials WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let store = CredentialStore::open_in_memory().unwrap();
        assert_eq!(store.get_item("id").unwrap(), None);
    }

    #[test]
    fn set_overwrites_and_remove_clears() {
        let store = CredentialStore::open_in_memory().unwrap();
        store.set_item("id", "7").unwrap();
        store.set_item("id", "8").unwrap();
        assert_eq!(store.get_item("id").unwrap().as_deref(), Some("8"));
        store.remove_item("id").unwrap();
        assert_eq!(store.get_item("id").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.db");
        {
            let store = CredentialStore::open(&path).unwrap();
            store.set_item("token", "abc").unwrap();
        }
        let store = CredentialStore::open(&path).unwrap();
        assert_eq!(store.get_item("token").unwrap().as_deref(), Some("abc"));
    }
}
