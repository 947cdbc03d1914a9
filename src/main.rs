//! Protocol resolution service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ [reverse proxy, terminates TLS] ──▶ ┌──────────────────────────────┐
//!                  Forwarded: proto=https            │  net      listener / rustls  │
//!                  X-Forwarded-Proto: https          │    │  TransportSecurity       │
//!                                                    │    ▼                          │
//!                                                    │  http     protocol middleware │
//!                                                    │    │  ProtocolResolver ◀── config (trust_proxy,
//!                                                    │    ▼                  hot reload)
//!                                                    │  handlers RequestProtocol     │
//!                                                    └──────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use forwarded_proto::config::{load_config, ConfigWatcher, ServiceConfig, SharedTrust};
use forwarded_proto::lifecycle::{signals, Shutdown};
use forwarded_proto::observability::init_logging;
use forwarded_proto::HttpServer;

#[derive(Parser)]
#[command(name = "forwarded-proto")]
#[command(about = "Reports the protocol clients used to reach this service", long_about = None)]
struct Cli {
    /// TOML configuration file. Watched for proxy trust changes.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trust forwarding headers regardless of the configuration file.
    #[arg(long)]
    trust_proxy: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if cli.trust_proxy {
        config.proxy.trust_proxy = true;
    }

    init_logging(&config.observability.log_level);
    tracing::info!("forwarded-proto v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        trust_proxy = config.proxy.trust_proxy,
        "Configuration loaded"
    );

    let trust = SharedTrust::new(config.proxy);

    // Keep the watcher alive for the lifetime of the server.
    let _watcher = match &cli.config {
        Some(path) if !cli.trust_proxy => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let watcher = watcher.run()?;
            trust.follow(updates);
            Some(watcher)
        }
        _ => None,
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::wait_for_signal(shutdown));

    HttpServer::new(config.listener, trust)
        .run(server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
