//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, TransportSecurity extension)
//!     → middleware/protocol.rs (resolve, attach RequestProtocol)
//!     → handlers read RequestProtocol
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use request::RequestProtocol;
pub use server::{app, HttpServer, ProtocolReport};
