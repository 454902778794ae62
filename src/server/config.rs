use super::RequestsLoggingLevel;
use crate::query::DEFAULT_PAGE_SIZE;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub requests_logging_level: RequestsLoggingLevel,
    pub page_size: usize,
    pub frontend_dir_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            requests_logging_level: RequestsLoggingLevel::default(),
            page_size: DEFAULT_PAGE_SIZE,
            frontend_dir_path: None,
        }
    }
}
