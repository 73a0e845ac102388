//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::geocode::{DEFAULT_BASE_URL, PostcodeClientConfig};

/// Default path of the cinema dataset.
const DEFAULT_DATA_FILE: &str = "data/uk_cinemas_clean.csv";

/// Default address to listen on.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default directory for static assets.
const DEFAULT_STATIC_DIR: &str = "static";

/// Default postcode lookup timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors in environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not valid: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Configuration for the cinema finder server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// CSV file with the cinema table
    pub data_file: PathBuf,
    /// Postcode lookup API base URL
    pub postcode_api_url: String,
    /// Postcode lookup timeout in seconds
    pub postcode_timeout_secs: u64,
    /// Address to bind the HTTP server to
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// If set, serve postcodes from this JSON file instead of the live API
    pub mock_postcodes: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable                | Default                      |
    /// |-------------------------|------------------------------|
    /// | `CINEMA_DATA_FILE`      | `data/uk_cinemas_clean.csv`  |
    /// | `POSTCODE_API_URL`      | `https://api.postcodes.io`   |
    /// | `POSTCODE_TIMEOUT_SECS` | `10`                         |
    /// | `CINEMA_BIND_ADDR`      | `127.0.0.1:3000`             |
    /// | `CINEMA_STATIC_DIR`     | `static`                     |
    /// | `CINEMA_MOCK_POSTCODES` | unset (use the live API)     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        // Empty values count as unset
        let get = |var| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr: SocketAddr = get("CINEMA_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "CINEMA_BIND_ADDR",
                message: e.to_string(),
            })?;

        let postcode_timeout_secs = match get("POSTCODE_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "POSTCODE_TIMEOUT_SECS",
                        message: format!("expected a positive number of seconds, got {v:?}"),
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            data_file: get("CINEMA_DATA_FILE")
                .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
                .into(),
            postcode_api_url: get("POSTCODE_API_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            postcode_timeout_secs,
            bind_addr,
            static_dir: get("CINEMA_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            mock_postcodes: get("CINEMA_MOCK_POSTCODES").map(PathBuf::from),
        })
    }

    /// Client configuration for the live postcode API.
    pub fn postcode_client(&self) -> PostcodeClientConfig {
        PostcodeClientConfig::new()
            .with_base_url(&self.postcode_api_url)
            .with_timeout(self.postcode_timeout_secs)
    }
}
