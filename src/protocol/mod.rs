//! Effective request protocol resolution.
//!
//! # Data Flow
//! ```text
//! (encrypted, trust_proxy, headers)
//!     → trust_proxy == false → socket state
//!     → Forwarded: first directive, proto=...      (if present)
//!     → X-Forwarded-Proto: first token, trimmed    (if non-empty)
//!     → socket state
//! ```
//!
//! # Design Decisions
//! - Trust gates every forwarding header at once, never per header
//! - Unusable values fall through to the next rule; nothing here errors
//! - Forwarded values are returned as sent, without checking for http/https
//! - Pure and allocation-free: results borrow from the header mapping

pub mod forwarded;
pub mod headers;

use std::fmt;

pub use forwarded::ForwardedDirective;
pub use headers::{HeaderLookup, HeaderTable};

pub const HTTP: &str = "http";
pub const HTTPS: &str = "https";

/// Lower-cased name of the RFC 7239 header.
pub const FORWARDED: &str = "forwarded";
/// Lower-cased name of the de-facto proxy protocol header.
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Which rule decided the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Encryption state of this connection.
    Socket,
    /// `proto` of the first `Forwarded` directive.
    Forwarded,
    /// First token of `X-Forwarded-Proto`.
    XForwardedProto,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Socket => "socket",
            Source::Forwarded => FORWARDED,
            Source::XForwardedProto => X_FORWARDED_PROTO,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the protocol the client originally used.
///
/// Returns `"https"` or `"http"` from the socket state, or, when the proxy is
/// trusted, whatever value a forwarding header carries.
pub fn resolve<'h, H>(encrypted: bool, proxy_trusted: bool, headers: &'h H) -> &'h str
where
    H: HeaderLookup + ?Sized,
{
    resolve_with_source(encrypted, proxy_trusted, headers).0
}

/// Like [`resolve`], also reporting which rule produced the value.
pub fn resolve_with_source<'h, H>(
    encrypted: bool,
    proxy_trusted: bool,
    headers: &'h H,
) -> (&'h str, Source)
where
    H: HeaderLookup + ?Sized,
{
    if proxy_trusted {
        if let Some(proto) = headers.get_header(FORWARDED).and_then(forwarded_proto) {
            return (proto, Source::Forwarded);
        }
        if let Some(proto) = headers.get_header(X_FORWARDED_PROTO).and_then(first_token) {
            return (proto, Source::XForwardedProto);
        }
    }
    (socket_protocol(encrypted), Source::Socket)
}

/// Protocol implied by the connection alone.
pub fn socket_protocol(encrypted: bool) -> &'static str {
    if encrypted {
        HTTPS
    } else {
        HTTP
    }
}

fn forwarded_proto(value: &str) -> Option<&str> {
    ForwardedDirective::first(value)?.proto()
}

fn first_token(value: &str) -> Option<&str> {
    let token = value.split(',').next()?.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolver bound to a proxy trust setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProtocolResolver {
    trust_proxy: bool,
}

impl ProtocolResolver {
    pub fn new(trust_proxy: bool) -> Self {
        Self { trust_proxy }
    }

    pub fn trust_proxy(&self) -> bool {
        self.trust_proxy
    }

    pub fn resolve<'h, H>(&self, encrypted: bool, headers: &'h H) -> &'h str
    where
        H: HeaderLookup + ?Sized,
    {
        resolve(encrypted, self.trust_proxy, headers)
    }

    pub fn resolve_with_source<'h, H>(&self, encrypted: bool, headers: &'h H) -> (&'h str, Source)
    where
        H: HeaderLookup + ?Sized,
    {
        resolve_with_source(encrypted, self.trust_proxy, headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HeaderTable {
        pairs.iter().copied().collect()
    }

    #[test]
    fn untrusted_ignores_headers() {
        let h = headers(&[
            ("Forwarded", "proto=https"),
            ("X-Forwarded-Proto", "https"),
        ]);
        for encrypted in [true, false] {
            assert_eq!(
                resolve_with_source(encrypted, false, &h),
                (socket_protocol(encrypted), Source::Socket)
            );
        }
    }

    #[test]
    fn forwarded_outranks_x_forwarded_proto() {
        let h = headers(&[
            ("forwarded", "for=127.0.0.1;proto=https,proto=http"),
            ("x-forwarded-proto", "http, https"),
        ]);
        assert_eq!(resolve_with_source(false, true, &h), ("https", Source::Forwarded));
    }

    #[test]
    fn forwarded_outranks_socket() {
        let h = headers(&[("forwarded", "proto=http")]);
        assert_eq!(resolve(true, true, &h), "http");
    }

    #[test]
    fn forwarded_without_proto_falls_through() {
        let h = headers(&[
            ("forwarded", "for=127.0.0.1"),
            ("x-forwarded-proto", "https, http"),
        ]);
        assert_eq!(
            resolve_with_source(false, true, &h),
            ("https", Source::XForwardedProto)
        );
    }

    #[test]
    fn only_first_forwarded_directive_counts() {
        let h = headers(&[("forwarded", "for=10.0.0.1,proto=https")]);
        assert_eq!(resolve_with_source(false, true, &h), ("http", Source::Socket));
    }

    #[test]
    fn empty_forwarded_falls_through() {
        let h = headers(&[("forwarded", ""), ("x-forwarded-proto", "https")]);
        assert_eq!(resolve(false, true, &h), "https");
    }

    #[test]
    fn x_forwarded_proto_token_is_trimmed() {
        let h = headers(&[("x-forwarded-proto", "  https  ,http")]);
        assert_eq!(resolve(false, true, &h), "https");
    }

    #[test]
    fn blank_x_forwarded_proto_uses_socket() {
        for value in ["", "   ", " , https"] {
            let h = headers(&[("x-forwarded-proto", value)]);
            assert_eq!(resolve(false, true, &h), "http", "value {value:?}");
            assert_eq!(resolve(true, true, &h), "https", "value {value:?}");
        }
    }

    #[test]
    fn pass_through_is_unvalidated() {
        let h = headers(&[("x-forwarded-proto", "wss")]);
        assert_eq!(resolve(false, true, &h), "wss");
    }

    #[test]
    fn resolver_carries_trust() {
        let h = headers(&[("x-forwarded-proto", "https")]);
        assert_eq!(ProtocolResolver::new(true).resolve(false, &h), "https");
        assert_eq!(ProtocolResolver::default().resolve(false, &h), "http");
    }

    #[test]
    fn source_names() {
        assert_eq!(Source::Socket.to_string(), "socket");
        assert_eq!(Source::Forwarded.to_string(), "forwarded");
        assert_eq!(Source::XForwardedProto.to_string(), "x-forwarded-proto");
    }
}
