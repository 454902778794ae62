//! Layering of base records, local edits and enrichment into effective
//! film records.
//!
//! Precedence per field, highest first:
//! - director / cast: local edit, then base record, then nothing
//! - cast list: an edited flat cast, then the structured base cast, then
//!   the enrichment cast, then a split of the flat base field
//! - enrichment-capable fields (synopsis, runtime, languages, imdb id,
//!   imdb rating, poster): base record when it carries a usable value,
//!   then enrichment
//!
//! "Usable" excludes empty strings and the upstream "N/A" placeholder.
//! Resolution is pure over its inputs; resolving twice with the same
//! overlay and enrichment yields the same record.

use crate::catalog::{Catalog, Film};
use crate::enrichment::{EnrichmentCache, EnrichmentEntry};
use crate::overlay::{EditStore, FilmEdit};
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

/// A film as presented to every read surface, with overrides and
/// enrichment already applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveFilm {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub rating: Option<f64>,
    pub revenue: Option<u64>,
    pub director: Option<String>,
    pub actor: Option<String>,
    pub cast_list: Vec<String>,
    pub poster_url: Option<String>,
    pub synopsis: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub languages: Vec<String>,
    pub imdb_id: Option<String>,
    pub imdb_rating: Option<f64>,
    /// True when a local edit contributed to this record.
    pub edited: bool,
}

fn usable(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("n/a"))
        .map(str::to_owned)
}

fn split_cast(flat: &str) -> Vec<String> {
    flat.split(',')
        .map(str::trim)
        .filter(|name| {
            !name.is_empty()
                && !name.eq_ignore_ascii_case("unknown")
                && !name.eq_ignore_ascii_case("n/a")
        })
        .map(str::to_owned)
        .collect()
}

/// Apply overlay and enrichment to a base record.
pub fn resolve(
    film: &Film,
    edit: Option<&FilmEdit>,
    enrichment: Option<&EnrichmentEntry>,
) -> EffectiveFilm {
    let edit_director = edit.and_then(|e| usable(&e.director));
    let edit_actor = edit.and_then(|e| usable(&e.actor));

    let director = edit_director.or_else(|| usable(&film.director));
    let actor = edit_actor.clone().or_else(|| usable(&film.actor));

    // An edited flat field beats a stale base cast list; otherwise the
    // structured base cast wins, and the flat field is only split as the
    // last resort after enrichment.
    let cast_list = match (&film.cast_list, &edit_actor) {
        (_, Some(edited)) => split_cast(edited),
        (Some(base), None) if !base.is_empty() => base.clone(),
        _ => enrichment
            .and_then(|e| e.cast_list.clone())
            .filter(|names| !names.is_empty())
            .or_else(|| actor.as_deref().map(split_cast))
            .unwrap_or_default(),
    };

    let languages = film
        .languages
        .clone()
        .filter(|l| !l.is_empty())
        .or_else(|| enrichment.and_then(|e| e.languages.clone()))
        .unwrap_or_default();

    EffectiveFilm {
        id: film.id.clone(),
        title: film.title.clone(),
        year: film.year,
        genre: film.genre.clone(),
        rating: film.rating,
        revenue: film.revenue,
        director,
        actor,
        cast_list,
        poster_url: usable(&film.poster_url)
            .or_else(|| enrichment.and_then(|e| usable(&e.poster))),
        synopsis: usable(&film.synopsis)
            .or_else(|| enrichment.and_then(|e| usable(&e.synopsis))),
        runtime_minutes: film
            .runtime_minutes
            .or_else(|| enrichment.and_then(|e| e.runtime_minutes)),
        imdb_id: usable(&film.imdb_id).or_else(|| enrichment.and_then(|e| usable(&e.imdb_id))),
        imdb_rating: film
            .imdb_rating
            .or_else(|| enrichment.and_then(|e| e.imdb_rating)),
        languages,
        edited: edit.map(|e| !e.is_empty()).unwrap_or(false),
    }
}

/// Ties the three layers together for the request handlers.
#[derive(Clone)]
pub struct Resolver {
    catalog: Arc<Catalog>,
    edits: Arc<dyn EditStore>,
    enrichment: Arc<EnrichmentCache>,
}

impl Resolver {
    pub fn new(
        catalog: Arc<Catalog>,
        edits: Arc<dyn EditStore>,
        enrichment: Arc<EnrichmentCache>,
    ) -> Self {
        Self {
            catalog,
            edits,
            enrichment,
        }
    }

    pub async fn resolve_id(&self, id: &str) -> Result<Option<EffectiveFilm>> {
        let Some(film) = self.catalog.get_by_id(id) else {
            return Ok(None);
        };
        let edit = self.edits.get(id)?;
        let enrichment = match self.catalog.ordinal_of(id) {
            Some(ordinal) => self.enrichment.get(ordinal).await,
            None => None,
        };
        Ok(Some(resolve(film, edit.as_ref(), enrichment.as_ref())))
    }

    /// Resolve the whole catalog in ingest order.
    pub async fn resolve_all(&self) -> Result<Vec<EffectiveFilm>> {
        let edits = self.edits.all()?;
        let document = self.enrichment.document().await;
        let mut out = Vec::with_capacity(self.catalog.len());
        for (position, film) in self.catalog.get_all().iter().enumerate() {
            let enrichment = document.get(&(position + 1).to_string());
            out.push(resolve(film, edits.get(&film.id), enrichment));
        }
        Ok(out)
    }
}
