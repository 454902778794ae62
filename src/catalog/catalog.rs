use super::genre::KNOWN_GENRES;
use super::Film;
use anyhow::{bail, Result};
use std::collections::HashMap;

/// The immutable film catalog, loaded once at startup.
///
/// Films keep their ingest order; ids are unique and never recomputed. There
/// are no mutation operations, every derived view is computed on read.
#[derive(Debug)]
pub struct Catalog {
    films: Vec<Film>,
    index_by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(films: Vec<Film>) -> Result<Catalog> {
        let mut index_by_id = HashMap::with_capacity(films.len());
        for (position, film) in films.iter().enumerate() {
            if film.title.trim().is_empty() {
                bail!("Film {} has an empty title", film.id);
            }
            if !(1900..=2100).contains(&film.year) {
                bail!(
                    "Film {} ({}) has implausible year {}",
                    film.id,
                    film.title,
                    film.year
                );
            }
            if index_by_id.insert(film.id.clone(), position).is_some() {
                bail!("Duplicate film id {}", film.id);
            }
        }
        Ok(Catalog { films, index_by_id })
    }

    /// All films in stable ingest order.
    pub fn get_all(&self) -> &[Film] {
        &self.films
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Film> {
        self.index_by_id.get(id).map(|&i| &self.films[i])
    }

    /// 1-based ingest position of a film. The enrichment side document is
    /// keyed by this ordinal, not by id (retained from the source data).
    pub fn ordinal_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).map(|&i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// Min and max year present in the catalog.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.films.iter().map(|f| f.year).min()?;
        let max = self.films.iter().map(|f| f.year).max()?;
        Some((min, max))
    }

    /// Genre labels in canonical enumeration order: the display side table
    /// first, then any remaining labels in order of first appearance.
    pub fn genres(&self) -> Vec<String> {
        let mut out: Vec<String> = KNOWN_GENRES
            .iter()
            .filter(|(name, _, _)| self.films.iter().any(|f| f.genre == *name))
            .map(|(name, _, _)| (*name).to_owned())
            .collect();
        for film in &self.films {
            if !out.iter().any(|g| *g == film.genre) {
                out.push(film.genre.clone());
            }
        }
        out
    }

    pub fn count_by_genre(&self, genre: &str) -> usize {
        self.films.iter().filter(|f| f.genre == genre).count()
    }
}
