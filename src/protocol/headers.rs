//! Case-insensitive header access.
//!
//! # Responsibilities
//! - Define the lookup boundary the resolver reads headers through
//! - Provide an owned table that normalizes names on insert
//! - Adapt `axum::http::HeaderMap` without copying
//!
//! # Design Decisions
//! - Names are stored lower-cased; lookups normalize before probing
//! - Values that are not valid UTF-8 are reported as absent

use std::collections::HashMap;

use axum::http::HeaderMap;

/// Read-only, case-insensitive view over a request's headers.
pub trait HeaderLookup {
    /// Returns the raw value of the header `name`, if it was sent.
    fn get_header(&self, name: &str) -> Option<&str>;
}

impl<T: HeaderLookup + ?Sized> HeaderLookup for &T {
    fn get_header(&self, name: &str) -> Option<&str> {
        (**self).get_header(name)
    }
}

impl HeaderLookup for HeaderMap {
    fn get_header(&self, name: &str) -> Option<&str> {
        // http's `HeaderName` parsing already folds case.
        self.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Owned header mapping keyed by lower-cased name.
///
/// Inserting the same name twice (in any casing) replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    entries: HashMap<String, String>,
}

impl HeaderTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, lower-casing its name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.entries
            .insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(lower-cased name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl HeaderLookup for HeaderTable {
    fn get_header(&self, name: &str) -> Option<&str> {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.entries
                .get(&name.to_ascii_lowercase())
                .map(String::as_str)
        } else {
            self.entries.get(name).map(String::as_str)
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for HeaderTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

impl From<&HeaderMap> for HeaderTable {
    /// Copies every UTF-8 header value; the first value wins for repeated names.
    fn from(map: &HeaderMap) -> Self {
        let mut table = Self::new();
        for name in map.keys() {
            if let Some(value) = map.get_header(name.as_str()) {
                table.insert(name.as_str(), value);
            }
        }
        table
    }
}
