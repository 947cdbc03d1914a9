//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable by `RUST_LOG`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    format!("forwarded_proto={level},tower_http={level}")
}

/// Install the global tracing subscriber.
///
/// Calling this twice is harmless; the second call logs a warning.
pub fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into());

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
    {
        tracing::warn!(error = %e, "Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_targets_crate_and_tower_http() {
        assert_eq!(
            default_filter("DEBUG"),
            "forwarded_proto=debug,tower_http=debug"
        );
    }
}
