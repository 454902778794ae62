mod analytics_routes;
pub mod config;
mod requests_logging;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use requests_logging::{log_requests, RequestsLoggingLevel};
use analytics_routes::make_analytics_routes;
pub use server::{make_app, run_server};
