//! Local edit overlay for director/cast corrections.
//!
//! Edits never touch the base catalog. They live in their own store, keyed
//! by film id, and are layered over base records by the resolver. Absence of
//! an entry means "no override"; an entry with only one field set overrides
//! only that field.

mod store;

pub use store::{InMemoryEditStore, SqliteEditStore};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A partial override for a single film. `None` fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Comma-separated cast names, same flat form as the base record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

impl FilmEdit {
    pub fn is_empty(&self) -> bool {
        self.director.is_none() && self.actor.is_none()
    }

    /// Shallow-merge `partial` over `self`: fields present in the partial
    /// win, fields absent are preserved.
    pub fn merged_with(&self, partial: &FilmEdit) -> FilmEdit {
        FilmEdit {
            director: partial.director.clone().or_else(|| self.director.clone()),
            actor: partial.actor.clone().or_else(|| self.actor.clone()),
        }
    }
}

/// Storage for user-entered film edits.
///
/// "Not found" is a normal value, never an error. Writes must be visible to
/// subsequent reads within the session and survive a restart (for persistent
/// implementations).
pub trait EditStore: Send + Sync {
    fn get(&self, film_id: &str) -> Result<Option<FilmEdit>>;

    /// Shallow-merge `partial` into the entry for `film_id`, creating the
    /// entry if absent.
    fn set(&self, film_id: &str, partial: &FilmEdit) -> Result<()>;

    /// Remove the entry entirely so precedence falls through to the base
    /// record (this is not the same as setting fields to empty strings).
    fn clear(&self, film_id: &str) -> Result<()>;

    /// Remove every entry.
    fn reset_all(&self) -> Result<()>;

    /// Snapshot of all entries, keyed by film id.
    fn all(&self) -> Result<HashMap<String, FilmEdit>>;
}
