use serde::{Deserialize, Serialize};
use std::fmt;
use url::{Position, Url};

/// Local address of a stored fragment
///
/// A LocalPath is the part of an absolute identifier that follows its origin:
/// the absolute path plus any query and fragment (e.g. `/id/fragment/1` or
/// `/fragment?id=1`). It wraps a `String` to keep local paths from being mixed
/// up with absolute identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalPath(String);

impl LocalPath {
    /// Wrap a path as requested by a client, without validation
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Take everything after the origin of an absolute URL
    pub fn from_url(url: &Url) -> Self {
        Self(url[Position::BeforePath..].to_string())
    }

    /// Strip the origin from an absolute identifier
    ///
    /// Returns `None` when the identifier is not an absolute URL.
    pub fn without_origin(identifier: &str) -> Option<Self> {
        Url::parse(identifier).ok().map(|url| Self::from_url(&url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve this path against a base URL
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&self.0)
    }
}

impl fmt::Display for LocalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocalPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for LocalPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<LocalPath> for String {
    fn from(path: LocalPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_origin_keeps_path_and_query() {
        let path = LocalPath::without_origin("http://www.example.org/fragment?id=1").unwrap();
        assert_eq!(path.as_str(), "/fragment?id=1");
    }

    #[test]
    fn test_without_origin_rejects_relative_reference() {
        assert!(LocalPath::without_origin("/id/fragment/1").is_none());
    }

    #[test]
    fn test_resolve_against_base() {
        let base = Url::parse("http://sim.example:8080").unwrap();
        let url = LocalPath::from("/id/fragment/1").resolve(&base).unwrap();
        assert_eq!(url.as_str(), "http://sim.example:8080/id/fragment/1");
    }
}
