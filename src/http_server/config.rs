//! HTTP Server Configuration
//!
//! Host, port, CORS, upload limit, logging and the known people set. Loaded
//! from an optional JSON file; every key has a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::LogFormat;
use crate::people::DEFAULT_PEOPLE;

/// Configuration load or validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (default: empty, meaning any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Identifiers the people directory knows (default: 1..=5)
    #[serde(default = "default_known_people")]
    pub known_people: Vec<i64>,

    /// Request body limit, bounds file uploads (default: 10 MiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Log filter directive when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Extra record spec files loaded into the catalog at startup
    #[serde(default)]
    pub spec_files: Vec<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_known_people() -> Vec<i64> {
    DEFAULT_PEOPLE.to_vec()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            known_people: default_known_people(),
            max_upload_bytes: default_max_upload_bytes(),
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
            spec_files: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: HttpServerConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".into()));
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid("max_upload_bytes must be > 0".into()));
        }

        // Path ids are declared gt 0, so anything else could never be found
        if let Some(id) = self.known_people.iter().find(|id| **id <= 0) {
            return Err(ConfigError::Invalid(format!(
                "known_people must be positive, got {}",
                id
            )));
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
