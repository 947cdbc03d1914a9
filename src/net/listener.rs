//! Listener binding.
//!
//! # Responsibilities
//! - Parse the configured bind address
//! - Bind plaintext TCP listeners
//! - Surface bind and TLS setup failures as one error type

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Configured address is not a socket address.
    #[error("Invalid bind address {address:?}: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },

    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    Bind(#[source] std::io::Error),

    /// Failed to load certificate or key.
    #[error("Failed to load TLS configuration: {0}")]
    Tls(#[source] std::io::Error),

    /// Server loop exited with an error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Parse `bind_address` from the listener configuration.
pub fn bind_address(config: &ListenerConfig) -> Result<SocketAddr, ListenerError> {
    config
        .bind_address
        .parse()
        .map_err(|source| ListenerError::Address {
            address: config.bind_address.clone(),
            source,
        })
}

/// Bind a plaintext TCP listener on the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let addr = bind_address(config)?;
    let listener = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;
    let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

    tracing::info!(address = %local_addr, "Listener bound");
    Ok(listener)
}
