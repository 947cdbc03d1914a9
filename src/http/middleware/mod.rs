pub mod protocol;

pub use protocol::protocol_middleware;
