//! Best-effort enrichment data for catalog films.
//!
//! An external batch job queries a third-party movie database and writes a
//! side document mapping **1-based ordinal position** strings ("1", "2", …)
//! to supplementary fields. The core only ever reads that document. Every
//! failure along the way (missing file, network error, malformed JSON)
//! resolves to "no data" for the affected films, never to an error.
//!
//! The ordinal keying is fragile: reordering the base dataset silently
//! misaligns lookups. `Catalog::ordinal_of` is the single place that maps
//! ids to ordinals.

mod provider;

pub use provider::{EnrichmentProvider, FileEnrichmentProvider, HttpEnrichmentProvider};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::OnceCell;
use tracing::warn;

/// Supplementary fields for one film, as produced by the enrichment batch
/// job (camelCase keys in the side document).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrichmentEntry {
    pub synopsis: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub languages: Option<Vec<String>>,
    pub imdb_id: Option<String>,
    pub cast_list: Option<Vec<String>>,
    pub imdb_rating: Option<f64>,
    pub poster: Option<String>,
}

/// Lazily loaded, read-only cache of the enrichment side document.
///
/// The document is fetched at most once per process, on first lookup. A
/// failed fetch is absorbed into an empty document and not retried (matching
/// the source behavior of the batch pipeline: enrichment is a bonus, never a
/// dependency).
pub struct EnrichmentCache {
    provider: Option<Box<dyn EnrichmentProvider>>,
    document: OnceCell<HashMap<String, EnrichmentEntry>>,
}

impl EnrichmentCache {
    pub fn new(provider: Box<dyn EnrichmentProvider>) -> Self {
        Self {
            provider: Some(provider),
            document: OnceCell::new(),
        }
    }

    /// A cache with no provider; every lookup resolves to empty.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            document: OnceCell::new(),
        }
    }

    /// The full side document, loading it on first call.
    pub async fn document(&self) -> &HashMap<String, EnrichmentEntry> {
        self.document
            .get_or_init(|| async {
                match &self.provider {
                    None => HashMap::new(),
                    Some(provider) => match provider.fetch().await {
                        Ok(entries) => entries,
                        Err(err) => {
                            warn!("Enrichment document unavailable: {:#}", err);
                            HashMap::new()
                        }
                    },
                }
            })
            .await
    }

    /// Entry for the film at 1-based ordinal position, if any.
    pub async fn get(&self, ordinal: usize) -> Option<EnrichmentEntry> {
        self.document().await.get(&ordinal.to_string()).cloned()
    }
}
