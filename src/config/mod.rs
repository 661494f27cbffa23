//! Configuration module for the portfolio store.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;
use crate::models::Author;

const DEFAULT_AUTHOR_NAME: &str = "Site Owner";
const DEFAULT_AUTHOR_AVATAR: &str = "/images/avatar.png";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key guarding owner-only routes
    pub api_psk: Option<String>,
    /// Path to the SQLite file backing the key-value store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Write default posts and technologies into empty collections on startup
    pub seed_defaults: bool,
    /// Author stamped on newly created posts
    pub default_author: Author,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_psk = env::var("PORTFOLIO_API_PSK")
            .ok()
            .filter(|psk| !psk.is_empty());

        let db_path = env::var("PORTFOLIO_DB_PATH")
            .unwrap_or_else(|_| "./data/portfolio.sqlite".to_string())
            .into();

        let bind_addr = env::var("PORTFOLIO_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid PORTFOLIO_BIND_ADDR format: {}", e)))?;

        let log_level = env::var("PORTFOLIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let seed_defaults = env::var("PORTFOLIO_SEED_DEFAULTS")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let default_author = Author {
            name: env::var("PORTFOLIO_AUTHOR_NAME")
                .unwrap_or_else(|_| DEFAULT_AUTHOR_NAME.to_string()),
            avatar: env::var("PORTFOLIO_AUTHOR_AVATAR")
                .unwrap_or_else(|_| DEFAULT_AUTHOR_AVATAR.to_string()),
        };

        Ok(Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            seed_defaults,
            default_author,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
