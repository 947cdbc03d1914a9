//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http middleware (resolved protocol + deciding source)
//!     → tracing events
//!     → logging.rs subscriber (stdout)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted messages
//! - The resolver itself stays silent; logging happens at the HTTP edge

pub mod logging;

pub use logging::init_logging;
