use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use filmlens_server::config::{AppConfig, CliConfig, FileConfig};
use filmlens_server::enrichment::{
    EnrichmentCache, EnrichmentProvider, FileEnrichmentProvider, HttpEnrichmentProvider,
};
use filmlens_server::load_catalog;
use filmlens_server::overlay::{EditStore, InMemoryEditStore, SqliteEditStore};
use filmlens_server::query::DEFAULT_PAGE_SIZE;
use filmlens_server::server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the JSON film dataset file.
    #[clap(value_parser = parse_path)]
    pub dataset: Option<PathBuf>,

    /// Path to the SQLite database file for local film edits.
    #[clap(long, value_parser = parse_path)]
    pub edits_db: Option<PathBuf>,

    /// Path to a TOML config file. Values in it override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to a JSON enrichment document produced by the batch job.
    #[clap(long, value_parser = parse_path)]
    pub enrichment_file: Option<PathBuf>,

    /// URL serving the JSON enrichment document.
    #[clap(long)]
    pub enrichment_url: Option<String>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Number of films per listing page.
    #[clap(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        dataset_path: cli_args.dataset,
        edits_db_path: cli_args.edits_db,
        enrichment_file: cli_args.enrichment_file,
        enrichment_url: cli_args.enrichment_url,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        frontend_dir_path: cli_args.frontend_dir_path,
        page_size: cli_args.page_size,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Loading film dataset from {:?}...", config.dataset_path);
    let catalog = load_catalog(&config.dataset_path)?;

    // A broken edits database degrades to session-only edits, the dashboard
    // itself stays up.
    let edit_store: Arc<dyn EditStore> = match SqliteEditStore::new(&config.edits_db_path) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            warn!(
                "Could not open edits database at {:?}, edits will not persist: {:#}",
                config.edits_db_path, err
            );
            Arc::new(InMemoryEditStore::default())
        }
    };

    let enrichment = if let Some(url) = &config.enrichment_url {
        info!("Enrichment configured from {}", url);
        EnrichmentCache::new(Box::new(HttpEnrichmentProvider::new(url.clone())?)
            as Box<dyn EnrichmentProvider>)
    } else if let Some(path) = &config.enrichment_file {
        info!("Enrichment configured from {:?}", path);
        EnrichmentCache::new(
            Box::new(FileEnrichmentProvider::new(path.clone())) as Box<dyn EnrichmentProvider>
        )
    } else {
        EnrichmentCache::disabled()
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(
        catalog,
        edit_store,
        enrichment,
        config.logging_level,
        config.port,
        config.page_size,
        config.frontend_dir_path,
    )
    .await
}
