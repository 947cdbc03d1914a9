//! Per-connection transport state.
//!
//! # Responsibilities
//! - Record whether the connection a request arrived on is TLS-encrypted
//! - Carry that fact to the HTTP layer as a request extension
//!
//! # Design Decisions
//! - Describes this hop only; upstream hops are the forwarding headers' job
//! - A request without the extension is treated as plaintext

use axum::http::Extensions;

/// Encryption state of the connection carrying a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransportSecurity {
    #[default]
    Plain,
    Tls,
}

impl TransportSecurity {
    pub fn is_encrypted(&self) -> bool {
        matches!(self, TransportSecurity::Tls)
    }

    /// Read the state recorded on a request, defaulting to plaintext.
    pub fn from_extensions(extensions: &Extensions) -> Self {
        extensions.get::<Self>().copied().unwrap_or_default()
    }
}

impl std::fmt::Display for TransportSecurity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportSecurity::Plain => f.write_str("plain"),
            TransportSecurity::Tls => f.write_str("tls"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_extension_is_plain() {
        let extensions = Extensions::new();
        assert_eq!(
            TransportSecurity::from_extensions(&extensions),
            TransportSecurity::Plain
        );
    }

    #[test]
    fn tls_is_encrypted() {
        let mut extensions = Extensions::new();
        extensions.insert(TransportSecurity::Tls);
        assert!(TransportSecurity::from_extensions(&extensions).is_encrypted());
        assert!(!TransportSecurity::Plain.is_encrypted());
    }
}
