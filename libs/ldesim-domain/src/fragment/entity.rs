//! Domain entities for stored fragments
//!
//! A Fragment is one page of a paginated event-stream tree, stored under the
//! local path derived from its (rewritten) primary identifier together with
//! the response headers it must be served with.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::document::Document;
use super::ids::LocalPath;

/// Response headers, keyed by lower-case header name
pub type Headers = BTreeMap<String, String>;

pub const CACHE_CONTROL: &str = "cache-control";
pub const CONTENT_TYPE: &str = "content-type";

pub const JSON_LD_MEDIA_TYPE: &str = "application/ld+json";

/// Cache-control for fragments saved without an explicit max-age
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=604800, immutable";

/// A stored fragment
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Local path the fragment is served under
    pub id: LocalPath,
    pub content: Document,
    pub headers: Headers,
}

impl Fragment {
    pub fn new(id: LocalPath, content: Document, headers: Headers) -> Self {
        Self {
            id,
            content,
            headers,
        }
    }

    /// The media type the fragment was submitted with, if known
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).map(String::as_str)
    }
}

/// Options a caller can pass when creating a fragment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateFragmentOptions {
    /// Validity in seconds; absent or not positive means the fragment is immutable
    #[serde(rename = "max-age", default)]
    pub max_age: Option<f64>,
}

impl CreateFragmentOptions {
    pub fn with_max_age(seconds: f64) -> Self {
        Self {
            max_age: Some(seconds),
        }
    }

    /// The cache-control header value these options call for
    pub fn cache_control(&self) -> String {
        match self.max_age {
            Some(seconds) if seconds.is_finite() && seconds > 0.0 => format!("public, max-age={}", seconds),
            _ => IMMUTABLE_CACHE_CONTROL.to_string(),
        }
    }
}

/// Outcome of saving a fragment
///
/// An empty `id` means no primary identifier could be located in the
/// document and nothing was stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FragmentInfo {
    pub id: String,
    #[serde(flatten)]
    pub headers: Headers,
}

impl FragmentInfo {
    pub fn stored(id: &LocalPath, headers: Headers) -> Self {
        Self {
            id: id.to_string(),
            headers,
        }
    }

    /// The result for a document without a locatable primary identifier
    pub fn missing() -> Self {
        Self::default()
    }

    /// Whether the fragment was actually written
    pub fn is_stored(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Merge caller-supplied headers with the computed cache-control
///
/// Header names are lower-cased. The computed cache-control always wins.
pub fn response_headers(options: &CreateFragmentOptions, headers: Headers) -> Headers {
    let mut merged: Headers = headers
        .into_iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .collect();
    merged.insert(CACHE_CONTROL.to_string(), options.cache_control());
    merged
}
