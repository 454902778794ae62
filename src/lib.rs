//! Filmlens Catalog Analytics Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod overlay;
pub mod query;
pub mod resolver;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, Catalog, Film};
pub use enrichment::{EnrichmentCache, EnrichmentEntry};
pub use overlay::{EditStore, FilmEdit, InMemoryEditStore, SqliteEditStore};
pub use resolver::{EffectiveFilm, Resolver};
pub use server::{run_server, RequestsLoggingLevel};
