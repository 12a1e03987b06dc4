//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::store::StoreConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Name of the database
    pub database_name: String,
    /// SQLite connection URL; in-memory when unset
    pub database_url: Option<String>,
    /// Directory served for static assets
    pub public_dir: PathBuf,
    /// HTML page served at /docs
    pub docs_page: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5005)
    /// - `DATABASE_NAME` - Database name (default: cohort-tools-api)
    /// - `DATABASE_URL` - SQLite URL such as `sqlite://data/cohorts.db`
    ///   (default: unset, in-memory)
    /// - `PUBLIC_DIR` - Static asset directory (default: public)
    /// - `DOCS_PAGE` - Docs page (default: views/docs.html)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            database_name: env::var("DATABASE_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.database_name),
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            docs_page: env::var("DOCS_PAGE")
                .map(PathBuf::from)
                .unwrap_or(defaults.docs_page),
        }
    }

    /// Store settings derived from this configuration.
    pub fn store(&self) -> StoreConfig {
        StoreConfig {
            name: self.database_name.clone(),
            url: self.database_url.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5005,
            database_name: "cohort-tools-api".to_string(),
            database_url: None,
            public_dir: PathBuf::from("public"),
            docs_page: PathBuf::from("views/docs.html"),
        }
    }
}
