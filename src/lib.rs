//! Effective request protocol resolution behind reverse proxies.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod protocol;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use protocol::{resolve, HeaderLookup, HeaderTable, ProtocolResolver};
