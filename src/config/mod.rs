mod file_config;

pub use file_config::FileConfig;

use crate::query::DEFAULT_PAGE_SIZE;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub dataset_path: Option<PathBuf>,
    pub edits_db_path: Option<PathBuf>,
    pub enrichment_file: Option<PathBuf>,
    pub enrichment_url: Option<String>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub page_size: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub edits_db_path: PathBuf,
    pub enrichment_file: Option<PathBuf>,
    pub enrichment_url: Option<String>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub page_size: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let dataset_path = file
            .dataset_path
            .map(PathBuf::from)
            .or_else(|| cli.dataset_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("dataset_path must be specified via --dataset or in config file")
            })?;

        if !dataset_path.exists() {
            bail!("Dataset file does not exist: {:?}", dataset_path);
        }

        let edits_db_path = file
            .edits_db_path
            .map(PathBuf::from)
            .or_else(|| cli.edits_db_path.clone())
            .unwrap_or_else(|| PathBuf::from("edits.db"));

        let enrichment_file = file
            .enrichment_file
            .map(PathBuf::from)
            .or_else(|| cli.enrichment_file.clone());
        let enrichment_url = file
            .enrichment_url
            .clone()
            .or_else(|| cli.enrichment_url.clone());

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let page_size = file.page_size.unwrap_or(cli.page_size);
        if page_size == 0 {
            bail!("page_size must be at least 1");
        }

        Ok(Self {
            dataset_path,
            edits_db_path,
            enrichment_file,
            enrichment_url,
            port,
            logging_level,
            frontend_dir_path,
            page_size,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
