use super::EnrichmentEntry;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Source of the enrichment side document.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    async fn fetch(&self) -> Result<HashMap<String, EnrichmentEntry>>;
}

/// Reads the side document from a local JSON file.
pub struct FileEnrichmentProvider {
    path: PathBuf,
}

impl FileEnrichmentProvider {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EnrichmentProvider for FileEnrichmentProvider {
    async fn fetch(&self) -> Result<HashMap<String, EnrichmentEntry>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read enrichment file {:?}", self.path))?;
        let entries: HashMap<String, EnrichmentEntry> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse enrichment file {:?}", self.path))?;
        debug!("Loaded {} enrichment entries from {:?}", entries.len(), self.path);
        Ok(entries)
    }
}

/// Fetches the side document from an HTTP endpoint.
pub struct HttpEnrichmentProvider {
    url: String,
    client: reqwest::Client,
}

impl HttpEnrichmentProvider {
    pub fn new(url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build enrichment http client")?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl EnrichmentProvider for HttpEnrichmentProvider {
    async fn fetch(&self) -> Result<HashMap<String, EnrichmentEntry>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Enrichment request to {} failed", self.url))?;

        if !response.status().is_success() {
            bail!(
                "Enrichment endpoint {} returned status {}",
                self.url,
                response.status()
            );
        }

        let entries: HashMap<String, EnrichmentEntry> = response
            .json()
            .await
            .context("Failed to decode enrichment response")?;
        debug!("Fetched {} enrichment entries from {}", entries.len(), self.url);
        Ok(entries)
    }
}
