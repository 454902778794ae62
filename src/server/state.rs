use axum::extract::FromRef;

use crate::catalog::Catalog;
use crate::enrichment::EnrichmentCache;
use crate::overlay::EditStore;
use crate::resolver::Resolver;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCatalog = Arc<Catalog>;
pub type GuardedEditStore = Arc<dyn EditStore>;
pub type GuardedEnrichment = Arc<EnrichmentCache>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: GuardedCatalog,
    pub edit_store: GuardedEditStore,
    pub enrichment: GuardedEnrichment,
    pub hash: String,
}

impl ServerState {
    pub fn resolver(&self) -> Resolver {
        Resolver::new(
            self.catalog.clone(),
            self.edit_store.clone(),
            self.enrichment.clone(),
        )
    }
}

impl FromRef<ServerState> for GuardedCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for GuardedEditStore {
    fn from_ref(input: &ServerState) -> Self {
        input.edit_store.clone()
    }
}

impl FromRef<ServerState> for GuardedEnrichment {
    fn from_ref(input: &ServerState) -> Self {
        input.enrichment.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
