//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, protocol resolution)
//! - Tag requests with the listener's transport security
//! - Serve over plaintext TCP or rustls, with graceful shutdown

use std::time::Duration;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{ListenerConfig, SharedTrust};
use crate::http::middleware::protocol_middleware;
use crate::http::request::RequestProtocol;
use crate::net::{listener, tls, ListenerError, TransportSecurity};

/// Grace period for in-flight TLS connections after shutdown is signalled.
const TLS_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of `GET /protocol`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolReport {
    pub protocol: String,
    pub secure: bool,
}

/// Build the router. Requests are treated as plaintext unless a
/// [`TransportSecurity`] extension says otherwise.
pub fn app(trust: SharedTrust) -> Router {
    Router::new()
        .route("/protocol", get(protocol_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(trust, protocol_middleware))
        .layer(TraceLayer::new_for_http())
}

async fn protocol_handler(protocol: RequestProtocol) -> Json<ProtocolReport> {
    Json(ProtocolReport {
        secure: protocol.is_secure(),
        protocol: protocol.as_str().to_owned(),
    })
}

async fn health_handler() -> &'static str {
    "ok"
}

/// HTTP server for the protocol service.
pub struct HttpServer {
    listener: ListenerConfig,
    trust: SharedTrust,
}

impl HttpServer {
    pub fn new(listener: ListenerConfig, trust: SharedTrust) -> Self {
        Self { listener, trust }
    }

    fn router(&self, transport: TransportSecurity) -> Router {
        app(self.trust.clone()).layer(Extension(transport))
    }

    /// Bind the configured address and serve until `shutdown` fires.
    pub async fn run(self, shutdown: broadcast::Receiver<()>) -> Result<(), ListenerError> {
        match self.listener.tls.clone() {
            Some(tls_config) => {
                let addr = listener::bind_address(&self.listener)?;
                let rustls = tls::from_config(&tls_config).await?;
                self.serve_tls(addr, rustls, shutdown).await
            }
            None => {
                let tcp = listener::bind(&self.listener).await?;
                self.serve(tcp, shutdown).await
            }
        }
    }

    /// Serve plaintext HTTP on an already-bound listener.
    pub async fn serve(
        self,
        tcp: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ListenerError> {
        let addr = tcp.local_addr().map_err(ListenerError::Bind)?;
        tracing::info!(
            address = %addr,
            transport = %TransportSecurity::Plain,
            "HTTP server starting"
        );

        let app = self.router(TransportSecurity::Plain);
        axum::serve(tcp, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await
            .map_err(ListenerError::Serve)?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    async fn serve_tls(
        self,
        addr: std::net::SocketAddr,
        rustls: axum_server::tls_rustls::RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ListenerError> {
        tracing::info!(
            address = %addr,
            transport = %TransportSecurity::Tls,
            "HTTP server starting"
        );

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            drain.graceful_shutdown(Some(TLS_DRAIN_TIMEOUT));
        });

        let app = self.router(TransportSecurity::Tls);
        axum_server::bind_rustls(addr, rustls)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .map_err(ListenerError::Serve)?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
