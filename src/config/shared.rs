//! Runtime proxy trust, swappable on reload.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::schema::{ProxyTrustConfig, ServiceConfig};
use crate::protocol::ProtocolResolver;

/// Proxy trust setting shared between the reload task and request handlers.
///
/// Readers never block; a reload replaces the whole value atomically.
#[derive(Debug, Clone)]
pub struct SharedTrust {
    inner: Arc<ArcSwap<ProxyTrustConfig>>,
}

impl SharedTrust {
    pub fn new(config: ProxyTrustConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Resolver for the trust setting in effect right now.
    pub fn resolver(&self) -> ProtocolResolver {
        self.inner.load().resolver()
    }

    pub fn store(&self, config: ProxyTrustConfig) {
        let previous = self.inner.swap(Arc::new(config));
        if previous.trust_proxy != config.trust_proxy {
            tracing::info!(
                trust_proxy = config.trust_proxy,
                "Proxy trust updated"
            );
        }
    }

    /// Apply the `proxy` section of every config received on `updates`.
    pub fn follow(&self, mut updates: mpsc::UnboundedReceiver<ServiceConfig>) -> JoinHandle<()> {
        let shared = self.clone();
        tokio::spawn(async move {
            while let Some(config) = updates.recv().await {
                shared.store(config.proxy);
            }
            tracing::debug!("Config update channel closed");
        })
    }
}

impl Default for SharedTrust {
    fn default() -> Self {
        Self::new(ProxyTrustConfig::default())
    }
}
