//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → shared.rs swaps the proxy trust setting
//!     → subsequent requests resolve with the new setting
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only proxy trust is reloadable; listener changes need a restart

pub mod loader;
pub mod schema;
pub mod shared;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, ProxyTrustConfig, ServiceConfig, TlsConfig};
pub use shared::SharedTrust;
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
