//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Semaphore;

use crate::server::error::Error;

/// Largest accepted `max_connections`: the connection semaphore's permit ceiling,
/// further capped so shutdown can acquire every permit in one `u32` request.
pub const MAX_CONNECTIONS: usize = if Semaphore::MAX_PERMITS < u32::MAX as usize {
    Semaphore::MAX_PERMITS
} else {
    u32::MAX as usize
};

/// Static file server configuration.
///
/// Every field has a compiled-in default; a JSON file may override any subset of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The listen backlog.
    pub backlog: u32,
    /// Directory prefix every request path is appended to.
    pub document_root: String,
    /// File name served for paths that end in `/`.
    pub default_document: String,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The longest request line accepted, in bytes.
    pub max_request_line: usize,
    /// How long a client may take to send its request line.
    pub read_timeout_ms: u64,
    /// Answer 404 for paths with a `..` segment instead of opening them.
    pub reject_traversal: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8050)),
            backlog: 10,
            document_root: "public".to_string(),
            default_document: "index.html".to_string(),
            max_connections: 1024,
            max_request_line: 8192,
            read_timeout_ms: 30_000,
            reject_traversal: false,
        }
    }
}

impl ServerConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| Error::Config {
            path: path.display().to_string(),
            reason: source.to_string(),
        })?;
        let config: Self = serde_json::from_slice(&raw).map_err(|source| Error::Config {
            path: path.display().to_string(),
            reason: source.to_string(),
        })?;
        config.validate().map_err(|reason| Error::Config {
            path: path.display().to_string(),
            reason,
        })?;
        Ok(config)
    }

    /// Check the limits that the server cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_CONNECTIONS).contains(&self.max_connections) {
            return Err(format!(
                "max_connections must be between 1 and {MAX_CONNECTIONS}, got {}",
                self.max_connections
            ));
        }
        if self.max_request_line == 0 {
            return Err("max_request_line must be at least 1".to_string());
        }
        Ok(())
    }

    /// The request-line read deadline.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
