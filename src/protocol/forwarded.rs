//! `Forwarded` header directives (RFC 7239).
//!
//! A header value is a comma-separated list of directives, one per hop.
//! Each directive is a semicolon-separated list of `key=value` pairs:
//!
//! ```text
//! Forwarded: for=127.0.0.1;proto=https, for=10.0.0.2;proto=http
//!            └────────── first ───────┘ └────── second ───────┘
//! ```
//!
//! Only the `proto` parameter is interpreted. Parsing is lenient: pairs
//! without `=` are skipped, whitespace around keys and values is ignored,
//! and a value wrapped in double quotes is unwrapped. Nothing here allocates.

/// One comma-separated segment of a `Forwarded` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardedDirective<'a> {
    raw: &'a str,
}

impl<'a> ForwardedDirective<'a> {
    /// Wrap a single directive, e.g. `for=127.0.0.1;proto=https`.
    pub fn new(raw: &'a str) -> Self {
        Self { raw: raw.trim() }
    }

    /// The leftmost directive of a header value, or `None` if it is blank.
    pub fn first(header: &'a str) -> Option<Self> {
        let directive = Self::new(header.split(',').next()?);
        (!directive.raw.is_empty()).then_some(directive)
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Iterate over well-formed `key=value` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.raw.split(';').filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key, unquote(value.trim())))
        })
    }

    /// Value of the first pair whose key matches `key` (ASCII case-insensitive).
    ///
    /// Empty values are treated as missing.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
            .filter(|v| !v.is_empty())
    }

    /// The `proto` parameter, passed through without validation.
    ///
    /// Returned verbatim after whitespace trimming and quoted-string unwrapping,
    /// so `proto="https"` yields `https`.
    pub fn proto(&self) -> Option<&'a str> {
        self.get("proto")
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_directive_only() {
        let d = ForwardedDirective::first("for=127.0.0.1;proto=https,proto=http").unwrap();
        assert_eq!(d.as_str(), "for=127.0.0.1;proto=https");
        assert_eq!(d.proto(), Some("https"));
        assert_eq!(d.get("for"), Some("127.0.0.1"));
    }

    #[test]
    fn missing_proto() {
        let d = ForwardedDirective::first("for=127.0.0.1").unwrap();
        assert_eq!(d.proto(), None);
    }

    #[test]
    fn key_is_case_insensitive() {
        let d = ForwardedDirective::new("For=192.0.2.60;PROTO=https;By=203.0.113.43");
        assert_eq!(d.proto(), Some("https"));
        assert_eq!(d.get("by"), Some("203.0.113.43"));
    }

    #[test]
    fn quoted_and_padded_values() {
        let d = ForwardedDirective::new(r#" for="[2001:db8:cafe::17]:4711" ; proto = "https" "#);
        assert_eq!(d.get("for"), Some("[2001:db8:cafe::17]:4711"));
        assert_eq!(d.proto(), Some("https"));
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let d = ForwardedDirective::new("garbage;=https;proto;host=example.com");
        assert_eq!(d.proto(), None);
        assert_eq!(d.get("host"), Some("example.com"));
        assert_eq!(d.pairs().count(), 1);
    }

    #[test]
    fn empty_value_is_missing() {
        assert_eq!(ForwardedDirective::new("proto=").proto(), None);
        assert_eq!(ForwardedDirective::new(r#"proto="""#).proto(), None);
    }

    #[test]
    fn value_is_not_validated() {
        let d = ForwardedDirective::new("proto=gopher");
        assert_eq!(d.proto(), Some("gopher"));
    }

    #[test]
    fn blank_header_has_no_directive() {
        assert!(ForwardedDirective::first("").is_none());
        assert!(ForwardedDirective::first("  ,proto=https").is_none());
    }
}
