//! Ports (trait definitions) for external dependencies
//!
//! Following hexagonal architecture, the domain defines what it needs and the
//! adapter crates provide implementations: an in-memory repository, an HTTP
//! context fetcher and an RDF/JSON-LD codec.
//!
//! ## Static Dispatch
//!
//! Async operations use native `impl Future` return types instead of
//! `async_trait`, so every adapter is monomorphized into the services that
//! use it.

use std::future::Future;
use std::path::Path;

use url::Url;

use crate::fragment::{Document, Fragment, FragmentError, LocalPath};

/// Port for fragment storage
///
/// Implementations keep fragments keyed by their local path. Saving is an
/// unconditional upsert; fragments are only ever removed all at once.
pub trait FragmentRepository: Send + Sync {
    /// Store a fragment under its id, replacing any fragment already there
    ///
    /// # Errors
    ///
    /// Returns `FragmentError::StorageFailure` if the backend cannot be written
    fn save(&self, fragment: Fragment) -> impl Future<Output = Result<(), FragmentError>> + Send;

    /// Look up the fragment stored under `id`
    ///
    /// Returns `Ok(None)` when nothing is stored there.
    fn get(
        &self,
        id: &LocalPath,
    ) -> impl Future<Output = Result<Option<Fragment>, FragmentError>> + Send;

    /// All ids currently stored
    fn keys(&self) -> impl Future<Output = Result<Vec<LocalPath>, FragmentError>> + Send;

    /// Remove every fragment and return how many were removed
    fn remove_all(&self) -> impl Future<Output = Result<usize, FragmentError>> + Send;
}

/// Port for retrieving remote JSON-LD context documents
///
/// Fetching is best effort: any failure (transport error, timeout, non-success
/// status) is reported as `None` and never aborts the save that asked for it.
pub trait ContextFetcher: Send + Sync {
    /// Fetch the body of the document at `url`
    fn fetch(&self, url: &Url) -> impl Future<Output = Option<Vec<u8>>> + Send;
}

/// A fetcher that never finds anything, leaving context references remote
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContextFetcher;

impl ContextFetcher for NoContextFetcher {
    fn fetch(&self, _url: &Url) -> impl Future<Output = Option<Vec<u8>>> + Send {
        std::future::ready(None)
    }
}

/// Port for turning payloads into documents
pub trait DocumentParser: Send + Sync {
    /// The media type files with this path's extension are parsed as
    ///
    /// Returns `None` for files the parser does not recognize.
    fn media_type_for(&self, path: &Path) -> Option<&'static str>;

    /// Parse a payload of the given media type
    ///
    /// # Errors
    ///
    /// Returns `FragmentError::InvalidDocument` if the payload is malformed or
    /// the media type is not supported
    fn parse(&self, bytes: &[u8], media_type: &str) -> Result<Document, FragmentError>;
}
