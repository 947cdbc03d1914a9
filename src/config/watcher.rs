//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ServiceConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ServiceConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ServiceConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for updates to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!("Config file change detected, reloading...");
                    match load_config(&path) {
                        Ok(new_config) => {
                            let _ = tx.send(new_config);
                        }
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                "Failed to reload config, keeping current configuration"
                            );
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use tokio::time::timeout;

    const TRUSTED: &str = "[proxy]\ntrust_proxy = true\n";

    fn write_config(path: &Path, content: &str) {
        std::fs::write(path, content).unwrap();
    }

    /// Overwrite in place without truncating, so no event ever sees an empty file.
    fn overwrite_config(path: &Path, content: &str) {
        let mut file = std::fs::OpenOptions::new().write(true).open(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.sync_all().unwrap();
    }

    async fn wait_for_trust(
        rx: &mut mpsc::UnboundedReceiver<ServiceConfig>,
        trust_proxy: bool,
    ) -> ServiceConfig {
        timeout(Duration::from_secs(5), async {
            loop {
                let config = rx.recv().await.expect("update channel closed");
                if config.proxy.trust_proxy == trust_proxy {
                    return config;
                }
            }
        })
        .await
        .expect("no matching config update")
    }

    #[tokio::test]
    async fn publishes_changed_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service.toml");
        write_config(&path, "[proxy]\ntrust_proxy = false\n");

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _watcher = watcher.run().unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        write_config(&path, TRUSTED);

        let config = wait_for_trust(&mut rx, true).await;
        assert!(config.proxy.resolver().trust_proxy());
    }

    #[tokio::test]
    async fn drops_invalid_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service.toml");
        write_config(&path, "[proxy]\ntrust_proxy = false\n");

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _watcher = watcher.run().unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        // Longer than the original content, and broken from the first line.
        overwrite_config(&path, "[proxy\ntrust_proxy = true\n# not a table header\n");
        assert!(
            timeout(Duration::from_secs(1), rx.recv()).await.is_err(),
            "invalid config was published"
        );

        // Still watching: a later valid edit goes through.
        write_config(&path, TRUSTED);
        wait_for_trust(&mut rx, true).await;
    }
}
