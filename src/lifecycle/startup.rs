//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the demo record storage
//! - Build the server from a validated configuration
//! - Bind the listener and spawn the serve loop

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::schema::StoreConfig;
use crate::config::GatewayConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::store::{FileStorage, KeyValueStorage, MemoryStorage};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid upstream URL: {0}")]
    InvalidUpstream(#[from] url::ParseError),

    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// File-backed when a path is configured, otherwise in-process only.
pub fn open_storage(config: &StoreConfig) -> Arc<dyn KeyValueStorage> {
    match &config.path {
        Some(path) if !path.trim().is_empty() => {
            tracing::info!(path = %path, "Using file-backed demo store");
            Arc::new(FileStorage::new(PathBuf::from(path)))
        }
        _ => {
            tracing::info!("Using in-memory demo store");
            Arc::new(MemoryStorage::new())
        }
    }
}

/// A gateway serving on a background task.
pub struct RunningGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningGateway {
    /// Trigger shutdown and wait for in-flight requests to drain.
    pub async fn stop(self) -> Result<(), std::io::Error> {
        self.shutdown.trigger();
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(std::io::Error::other(e)),
        }
    }
}

/// Build the server, bind `config.listener.bind_address` and start serving.
pub async fn launch(config: GatewayConfig) -> Result<RunningGateway, StartupError> {
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&server.state().inner.config.listener.bind_address).await?;
    let addr = listener.local_addr()?;

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    Ok(RunningGateway { addr, shutdown, handle })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_storage_defaults_to_memory() {
        let storage = open_storage(&StoreConfig { path: None });
        assert!(format!("{:?}", storage).contains("MemoryStorage"));

        let blank = open_storage(&StoreConfig { path: Some("  ".into()) });
        assert!(format!("{:?}", blank).contains("MemoryStorage"));
    }

    #[test]
    fn test_open_storage_uses_file_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let storage = open_storage(&StoreConfig {
            path: Some(path.to_string_lossy().into_owned()),
        });
        assert!(format!("{:?}", storage).contains("FileStorage"));
    }
}
