//! Server configuration.
//!
//! Defaults are hardcoded below. They can be overridden from the environment
//! (a `.env` file is loaded by the binary) and then by CLI flags.

use crate::error::ConfigError;

/// Port the server listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 8080;

/// Multipart field carrying the CSV upload.
pub const FILE_FIELD: &str = "file";

/// Maximum accepted request body size (in bytes).
///
/// 32 MB limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub const ENV_PORT: &str = "CSVMATRIX_PORT";
pub const ENV_MAX_UPLOAD_BYTES: &str = "CSVMATRIX_MAX_UPLOAD_BYTES";
pub const ENV_STATUS_CODES: &str = "CSVMATRIX_STATUS_CODES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,

    pub max_upload_bytes: usize,

    /// Answer request errors with 400/422 instead of 200.
    /// The `error ...` body is the same either way.
    pub status_codes: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            status_codes: false,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_PORT) {
            config.port = parse_value(ENV_PORT, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_UPLOAD_BYTES) {
            config.max_upload_bytes = parse_value(ENV_MAX_UPLOAD_BYTES, &value)?;
        }
        if let Some(value) = lookup(ENV_STATUS_CODES) {
            config.status_codes = parse_bool(ENV_STATUS_CODES, &value)?;
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
