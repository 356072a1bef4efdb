//! Server configuration, read once at startup.

use std::path::PathBuf;

use axum::http::HeaderValue;

use tally_core::defaults::{
    ENV_ALLOWED_ORIGINS, ENV_HOST, ENV_MAX_UPLOAD_SIZE_BYTES, ENV_PORT, ENV_UPLOAD_DIR,
    MAX_UPLOAD_SIZE_BYTES, SERVER_HOST, SERVER_PORT, UPLOAD_DIR,
};

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Root under which each request gets its own scratch directory.
    pub upload_dir: PathBuf,
    /// Request body limit in bytes.
    pub max_upload_bytes: usize,
    /// CORS whitelist; `None` allows any origin.
    pub allowed_origins: Option<Vec<HeaderValue>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: SERVER_HOST.to_string(),
            port: SERVER_PORT,
            upload_dir: PathBuf::from(UPLOAD_DIR),
            max_upload_bytes: MAX_UPLOAD_SIZE_BYTES,
            allowed_origins: None,
        }
    }
}

impl ServerConfig {
    /// Read from the environment; unset or unparsable values use defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var(ENV_HOST).unwrap_or_else(|_| SERVER_HOST.to_string()),
            port: std::env::var(ENV_PORT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(SERVER_PORT),
            upload_dir: std::env::var(ENV_UPLOAD_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(UPLOAD_DIR)),
            max_upload_bytes: std::env::var(ENV_MAX_UPLOAD_SIZE_BYTES)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_UPLOAD_SIZE_BYTES),
            allowed_origins: std::env::var(ENV_ALLOWED_ORIGINS)
                .ok()
                .map(|s| parse_allowed_origins(&s))
                .filter(|origins| !origins.is_empty()),
        }
    }
}

/// Parse a comma-separated origin list, dropping blanks and invalid values.
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}
