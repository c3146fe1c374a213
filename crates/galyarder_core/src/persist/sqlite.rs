//! SQLite-backed namespace storage.
//!
//! # Invariants
//! - The connection must be migrated (`namespaces` table present).
//! - `save_namespace` is an upsert; the latest payload wins.

use super::{Namespace, NamespaceStorage, PersistResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Namespace storage over the `namespaces` table.
#[derive(Clone, Copy)]
pub struct SqliteNamespaceStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNamespaceStorage<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Lists stored namespace keys in ascending order.
    pub fn keys(&self) -> PersistResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM namespaces ORDER BY key ASC;")?;
        let mut rows = stmt.query([])?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(row.get(0)?);
        }
        Ok(keys)
    }
}

impl NamespaceStorage for SqliteNamespaceStorage<'_> {
    fn load_namespace(&self, key: &Namespace) -> PersistResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM namespaces WHERE key = ?1;",
                [key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn save_namespace(&self, key: &Namespace, payload: &str) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO namespaces (key, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key.as_str(), payload],
        )?;
        debug!(
            "event=namespace_save module=persist status=ok namespace={} bytes={}",
            key,
            payload.len()
        );
        Ok(())
    }
}
