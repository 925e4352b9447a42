//! Server settings loaded from environment variables.
//!
//! Every setting has a default, so the service starts with an empty environment.
//! Values that are present but unparsable are configuration errors rather than
//! silently falling back.

use crate::errors::{Error, Result};
use std::net::SocketAddr;
use std::time::Duration;

/// Default request body limit (`MAX_BODY_BYTES`).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Runtime settings for the HTTP server and its database bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to (`BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Database connection string (`DATABASE_URL`)
    pub database_url: String,
    /// Fixed delay between initial connection attempts (`DB_CONNECT_RETRY_MS`)
    pub connect_retry_delay: Duration,
    /// Maximum accepted request body size (`MAX_BODY_BYTES`)
    pub max_body_bytes: usize,
    /// Path of the default content seed file (`CONTENT_SEED_PATH`)
    pub content_seed_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: super::database::DEFAULT_DATABASE_URL.to_string(),
            connect_retry_delay: Duration::from_millis(5000),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            content_seed_path: "content.toml".to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    /// Returns `Error::Config` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup. `from_env` uses the process
    /// environment; tests pass a closure over a fixed map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|e| Error::Config {
                message: format!("Invalid BIND_ADDR '{raw}': {e}"),
            })?,
            None => defaults.bind_addr,
        };

        let connect_retry_delay = match lookup("DB_CONNECT_RETRY_MS") {
            Some(raw) => Duration::from_millis(parse_number("DB_CONNECT_RETRY_MS", &raw)?),
            None => defaults.connect_retry_delay,
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => parse_number("MAX_BODY_BYTES", &raw)?,
            None => defaults.max_body_bytes,
        };

        Ok(Self {
            bind_addr,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            connect_retry_delay,
            max_body_bytes,
            content_seed_path: lookup("CONTENT_SEED_PATH").unwrap_or(defaults.content_seed_path),
        })
    }
}

fn parse_number<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| Error::Config {
        message: format!("Invalid {name} '{raw}': {e}"),
    })
}
