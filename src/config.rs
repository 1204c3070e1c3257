// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Default number of responses returned per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound for the `per_page` query parameter.
pub const MAX_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. When unset the server runs on the in-memory store.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub log_dir: String,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        );

        Self {
            database_url,
            port,
            rust_log,
            log_dir,
            cors_origins,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            port: 5000,
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
