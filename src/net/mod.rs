//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, plaintext accept)
//!     → tls.rs (optional TLS handshake via rustls)
//!     → connection.rs (TransportSecurity recorded per request)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - TLS is optional and handled transparently
//! - A listener is either all-TLS or all-plaintext

pub mod connection;
pub mod listener;
pub mod tls;

pub use connection::TransportSecurity;
pub use listener::ListenerError;
