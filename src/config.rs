//! Server configuration loaded from environment variables.
//!
//! | Variable                 | Default          | Meaning                              |
//! |--------------------------|------------------|--------------------------------------|
//! | `TASKDESK_BIND_ADDR`     | `127.0.0.1:8000` | Listen address                       |
//! | `DATABASE_URL`           | unset            | `PostgreSQL` URL; unset keeps tasks in memory |
//! | `TASKDESK_DB_POOL_SIZE`  | `8`              | Maximum pooled connections           |
//! | `TASKDESK_WORKERS`       | CPU count        | HTTP worker threads                  |

use thiserror::Error;

/// Environment variable naming the listen address.
pub const BIND_ADDR_ENV: &str = "TASKDESK_BIND_ADDR";
/// Environment variable naming the database URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable naming the connection pool size.
pub const POOL_SIZE_ENV: &str = "TASKDESK_DB_POOL_SIZE";
/// Environment variable naming the worker count.
pub const WORKERS_ENV: &str = "TASKDESK_WORKERS";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_POOL_SIZE: u32 = 8;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric setting is not a positive integer.
    #[error("invalid value '{value}' for {key}: expected a positive integer")]
    InvalidNumber {
        /// Variable name.
        key: &'static str,
        /// Value found.
        value: String,
    },
}

/// Settings for the task server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    bind_addr: String,
    database_url: Option<String>,
    pool_size: u32,
    workers: Option<usize>,
}

impl ServerConfig {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric variable is not a
    /// positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric variable is not a
    /// positive integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let pool_size = read(POOL_SIZE_ENV)
            .map(|value| parse_positive::<u32>(POOL_SIZE_ENV, value))
            .transpose()?
            .unwrap_or(DEFAULT_POOL_SIZE);
        let workers = read(WORKERS_ENV)
            .map(|value| parse_positive::<usize>(WORKERS_ENV, value))
            .transpose()?;

        Ok(Self {
            bind_addr: read(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            database_url: read(DATABASE_URL_ENV),
            pool_size,
            workers,
        })
    }

    /// Returns the listen address.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    /// Returns the database URL, if a database is configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns the worker thread count, if overridden.
    #[must_use]
    pub const fn workers(&self) -> Option<usize> {
        self.workers
    }
}

fn parse_positive<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    match value.parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidNumber { key, value }),
    }
}
