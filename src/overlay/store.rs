//! Edit store implementations.
//!
//! The SQLite store is the durable default; the in-memory store backs tests
//! and the degraded path taken when the database file is unreadable.

use super::{EditStore, FilmEdit};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

const EDITS_SCHEMA_VERSION: i64 = 1;

/// SQLite-backed edit store. One row per film id, written synchronously on
/// every mutation.
#[derive(Clone)]
pub struct SqliteEditStore {
    conn: Arc<Mutex<Connection>>,
}

fn migrate_if_needed(conn: &Connection) -> Result<()> {
    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if db_version >= EDITS_SCHEMA_VERSION {
        return Ok(());
    }

    conn.execute(
        "CREATE TABLE IF NOT EXISTS film_edits (
            film_id TEXT PRIMARY KEY,
            director TEXT,
            actor TEXT,
            updated_at INTEGER NOT NULL DEFAULT (cast(strftime('%s','now') as int))
        )",
        params![],
    )?;
    conn.pragma_update(None, "user_version", EDITS_SCHEMA_VERSION)?;
    Ok(())
}

impl SqliteEditStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open_with_flags(
            db_path.as_ref(),
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open edits database")?;

        migrate_if_needed(&conn).context("Failed to migrate edits database")?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .context("Failed to set WAL mode on edits database")?;

        let count: usize = conn.query_row("SELECT COUNT(*) FROM film_edits", [], |r| r.get(0))?;
        info!("Edit store ready: {} films with local edits", count);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl EditStore for SqliteEditStore {
    fn get(&self, film_id: &str) -> Result<Option<FilmEdit>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare_cached("SELECT director, actor FROM film_edits WHERE film_id = ?1")?;
        let result = stmt
            .query_row(params![film_id], |row| {
                Ok(FilmEdit {
                    director: row.get(0)?,
                    actor: row.get(1)?,
                })
            })
            .optional()?;
        Ok(result)
    }

    fn set(&self, film_id: &str, partial: &FilmEdit) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        // COALESCE keeps fields the partial does not carry.
        conn.execute(
            "INSERT INTO film_edits (film_id, director, actor) VALUES (?1, ?2, ?3)
             ON CONFLICT(film_id) DO UPDATE SET
                director = COALESCE(excluded.director, director),
                actor = COALESCE(excluded.actor, actor),
                updated_at = cast(strftime('%s','now') as int)",
            params![film_id, partial.director, partial.actor],
        )?;
        Ok(())
    }

    fn clear(&self, film_id: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM film_edits WHERE film_id = ?1", params![film_id])?;
        Ok(())
    }

    fn reset_all(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM film_edits", params![])?;
        Ok(())
    }

    fn all(&self) -> Result<HashMap<String, FilmEdit>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached("SELECT film_id, director, actor FROM film_edits")?;
        let rows = stmt.query_map(params![], |row| {
            Ok((
                row.get::<_, String>(0)?,
                FilmEdit {
                    director: row.get(1)?,
                    actor: row.get(2)?,
                },
            ))
        })?;
        let mut out = HashMap::new();
        for row in rows {
            let (film_id, edit) = row?;
            out.insert(film_id, edit);
        }
        Ok(out)
    }
}

/// In-memory edit store, used in tests and as the fallback when the SQLite
/// file cannot be opened (edits then last only for the session).
#[derive(Default)]
pub struct InMemoryEditStore {
    edits: Mutex<HashMap<String, FilmEdit>>,
}

impl EditStore for InMemoryEditStore {
    fn get(&self, film_id: &str) -> Result<Option<FilmEdit>> {
        Ok(self.edits.lock().unwrap().get(film_id).cloned())
    }

    fn set(&self, film_id: &str, partial: &FilmEdit) -> Result<()> {
        let mut edits = self.edits.lock().unwrap();
        let merged = edits
            .get(film_id)
            .cloned()
            .unwrap_or_default()
            .merged_with(partial);
        edits.insert(film_id.to_owned(), merged);
        Ok(())
    }

    fn clear(&self, film_id: &str) -> Result<()> {
        self.edits.lock().unwrap().remove(film_id);
        Ok(())
    }

    fn reset_all(&self) -> Result<()> {
        self.edits.lock().unwrap().clear();
        Ok(())
    }

    fn all(&self) -> Result<HashMap<String, FilmEdit>> {
        Ok(self.edits.lock().unwrap().clone())
    }
}
