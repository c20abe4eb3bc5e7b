//! Canonical request model shared by the normalizer, dispatcher, and marshaler.

use std::collections::BTreeMap;

/// Case-insensitive header map.
///
/// Gateway events deliver header names with inconsistent casing, so keys are
/// folded to lowercase on insert and lookup. Duplicate names are
/// last-write-wins. Iteration order is deterministic (sorted by name).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Looks up a header by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            let name: String = name.into();
            headers.insert(&name, value);
        }
        headers
    }
}

/// The adapter's format-agnostic view of one inbound HTTP request.
///
/// Invariants upheld by the normalizer: `method` is non-empty and upper-cased,
/// `path` begins with `/`, and `body` is the empty string when the event
/// carried no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    pub method: String,
    pub path: String,
    /// Single encoded query string, without the leading `?`. Empty when the
    /// original request had no query.
    pub query_string: String,
    pub headers: Headers,
    pub body: String,
}

impl CanonicalRequest {
    /// Length of the request body in bytes.
    #[must_use]
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "application/json");

        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(headers.get("x-missing"), None);
    }

    #[test]
    fn duplicate_header_names_are_last_write_wins() {
        let mut headers = Headers::new();
        headers.insert("X-Trace", "first");
        headers.insert("x-trace", "second");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Trace"), Some("second"));
    }

    #[test]
    fn empty_header_values_are_preserved() {
        let headers: Headers = [("X-Empty", "")].into_iter().collect();

        assert!(headers.contains("x-empty"));
        assert_eq!(headers.get("X-Empty"), Some(""));
    }

    #[test]
    fn content_length_tracks_body_bytes() {
        let request = CanonicalRequest {
            method: "POST".to_string(),
            path: "/api/chat".to_string(),
            query_string: String::new(),
            headers: Headers::new(),
            body: "{\"user_input\":\"hola\"}".to_string(),
        };

        assert_eq!(request.content_length(), request.body.len());
    }
}
