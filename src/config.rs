//! Process configuration
//!
//! All knobs come from command-line flags with environment-variable fallback.
//! The resulting `Config` is built once in main() and handed by reference to
//! the components that need it (pool setup, YouTube client, CORS layer); there
//! is no ambient global configuration state.

use clap::Parser;

/// Elimu backend: mentorship video catalog, watch progress, reviews and users
#[derive(Debug, Clone, Parser)]
#[command(name = "elimu-backend", version)]
pub struct Config {
    /// Database connection string; safe local default for development
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://elimu.db")]
    pub database_url: String,

    /// YouTube Data API key; the process refuses to start without one
    #[arg(long, env = "YOUTUBE_API_KEY")]
    pub youtube_api_key: String,

    /// Address to bind the HTTP server to
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    pub bind_addr: String,

    /// Base connection pool size
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    pub db_pool_size: u32,

    /// Extra connections allowed beyond the base pool size during bursts
    #[arg(long, env = "DB_MAX_OVERFLOW", default_value_t = 20)]
    pub db_max_overflow: u32,

    /// Comma-separated CORS origin allow-list; empty means permissive (development)
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = "", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Upper bound on pooled connections (base size plus burst overflow)
    pub fn max_connections(&self) -> u32 {
        self.db_pool_size + self.db_max_overflow
    }
}
