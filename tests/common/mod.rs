//! Common test infrastructure
//!
//! Spawns the full application on an ephemeral port and talks to it over
//! HTTP, the way a dashboard frontend would.

#![allow(dead_code)]

use filmlens_server::catalog::{Catalog, Film};
use filmlens_server::enrichment::{EnrichmentCache, FileEnrichmentProvider};
use filmlens_server::overlay::InMemoryEditStore;
use filmlens_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const FILM_GHILLI: &str = "f1";
pub const FILM_ANNIYAN: &str = "f2";
pub const FILM_96: &str = "f3";
pub const FILM_MASTER: &str = "f4";
pub const FILM_VIKRAM: &str = "f5";
pub const FILM_JAILER: &str = "f6";

pub fn film(
    id: &str,
    title: &str,
    year: i32,
    genre: &str,
    rating: Option<f64>,
    revenue: Option<u64>,
    director: &str,
    actor: &str,
) -> Film {
    Film {
        id: id.to_owned(),
        title: title.to_owned(),
        year,
        genre: genre.to_owned(),
        rating,
        revenue,
        director: Some(director.to_owned()),
        actor: Some(actor.to_owned()),
        cast_list: None,
        poster_url: None,
        synopsis: None,
        runtime_minutes: None,
        languages: None,
        imdb_id: None,
        imdb_rating: None,
    }
}

/// Six films, ingest order fixed: enrichment ordinals depend on it.
pub fn create_test_catalog() -> Catalog {
    Catalog::new(vec![
        film(
            FILM_GHILLI,
            "Ghilli",
            2004,
            "Action",
            Some(8.1),
            Some(250_000_000),
            "Dharani",
            "Vijay, Trisha",
        ),
        film(
            FILM_ANNIYAN,
            "Anniyan",
            2005,
            "Thriller",
            Some(8.2),
            Some(560_000_000),
            "Shankar",
            "Vikram, Sada",
        ),
        film(
            FILM_96,
            "96",
            2018,
            "Romance",
            Some(8.5),
            Some(500_000_000),
            "C. Prem Kumar",
            "Vijay Sethupathi, Trisha",
        ),
        film(
            FILM_MASTER,
            "Master",
            2021,
            "Action",
            Some(7.3),
            Some(2_500_000_000),
            "Lokesh Kanagaraj",
            "Vijay, Vijay Sethupathi",
        ),
        film(
            FILM_VIKRAM,
            "Vikram",
            2022,
            "Action",
            Some(8.3),
            Some(4_000_000_000),
            "Lokesh Kanagaraj",
            "Kamal Haasan, Vijay Sethupathi",
        ),
        film(
            FILM_JAILER,
            "Jailer",
            2023,
            "Action",
            Some(7.0),
            Some(6_000_000_000),
            "Nelson",
            "Rajinikanth",
        ),
    ])
    .unwrap()
}

pub struct TestServer {
    pub base_url: String,
    _enrichment_file: Option<NamedTempFile>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        Self::spawn_inner(None, None).await
    }

    pub async fn spawn_with_page_size(page_size: usize) -> Self {
        Self::spawn_inner(None, Some(page_size)).await
    }

    /// Spawn with an enrichment document covering 96 (ordinal 3) and
    /// Vikram (ordinal 5).
    pub async fn spawn_with_enrichment() -> Self {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "3": {{
                    "synopsis": "Two school sweethearts meet again after 22 years.",
                    "runtimeMinutes": 158,
                    "languages": ["Tamil"]
                }},
                "5": {{
                    "castList": ["Kamal Haasan", "Vijay Sethupathi", "Fahadh Faasil"],
                    "imdbRating": 8.3
                }}
            }}"#
        )
        .unwrap();
        Self::spawn_inner(Some(file), None).await
    }

    async fn spawn_inner(enrichment_file: Option<NamedTempFile>, page_size: Option<usize>) -> Self {
        let enrichment = match &enrichment_file {
            Some(file) => EnrichmentCache::new(Box::new(FileEnrichmentProvider::new(file.path()))),
            None => EnrichmentCache::disabled(),
        };

        let mut config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        if let Some(page_size) = page_size {
            config.page_size = page_size;
        }

        let app = make_app(
            config,
            create_test_catalog(),
            Arc::new(InMemoryEditStore::default()),
            enrichment,
        )
        .unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            _enrichment_file: enrichment_file,
        }
    }
}

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }

    pub async fn put_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }
}
