//! Fragment service - Business logic orchestration
//!
//! The service runs the rewriting engine over incoming documents, derives the
//! storage key, computes the response headers and coordinates with the
//! repository port. Remote JSON-LD contexts referenced by tree documents are
//! copied into the repository through the context fetcher port.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};
use url::Url;

use super::document::{Document, IdentifierRewrites};
use super::entity::{
    response_headers, CreateFragmentOptions, Fragment, FragmentInfo, Headers, CONTENT_TYPE,
    JSON_LD_MEDIA_TYPE,
};
use super::error::Result;
use super::ids::LocalPath;
use super::rewrite::OriginRewriter;
use super::tree::TreeDocument;
use crate::storage::{ContextFetcher, FragmentRepository, NoContextFetcher};

/// Service storing and serving fragments on the simulator's origin
///
/// This service encapsulates the business rules for fragments:
/// - Moves structural identifiers onto the base origin
/// - Derives the local path a fragment is stored under
/// - Computes an authoritative cache-control header
/// - Keeps local copies of remote JSON-LD contexts (best effort)
///
/// The service is generic over its repository and context fetcher, so each
/// adapter combination is compiled into its own specialized service.
pub struct FragmentService<R, F = NoContextFetcher> {
    repository: R,
    fetcher: F,
    rewriter: OriginRewriter,
    /// Remote context URL to the local URL its copy is served under
    contexts: Mutex<HashMap<String, Url>>,
}

impl<R> FragmentService<R>
where
    R: FragmentRepository,
{
    /// Create a service that leaves context references remote
    pub fn new(base_url: Url, repository: R) -> Self {
        Self::with_context_fetcher(base_url, repository, NoContextFetcher)
    }
}

impl<R, F> FragmentService<R, F>
where
    R: FragmentRepository,
    F: ContextFetcher,
{
    /// Create a service that copies remote contexts through `fetcher`
    pub fn with_context_fetcher(base_url: Url, repository: R, fetcher: F) -> Self {
        Self {
            repository,
            fetcher,
            rewriter: OriginRewriter::new(base_url),
            contexts: Mutex::new(HashMap::new()),
        }
    }

    /// The origin fragments are rewritten onto
    pub fn base_url(&self) -> &Url {
        self.rewriter.base()
    }

    /// Rewrite and store a fragment
    ///
    /// This is the main entry point for incoming fragments. It:
    /// 1. Moves the document's structural identifiers onto the base origin
    /// 2. Derives the local path from the new primary identifier
    /// 3. Copies referenced remote contexts (tree documents only)
    /// 4. Computes the response headers and persists the fragment
    ///
    /// A document without a usable primary identifier is not stored and yields
    /// a [`FragmentInfo`] with an empty id.
    ///
    /// # Errors
    ///
    /// Returns `FragmentError::StorageFailure` if the repository fails
    pub async fn save(
        &self,
        mut document: Document,
        options: &CreateFragmentOptions,
        headers: Headers,
    ) -> Result<FragmentInfo> {
        let Some(primary) = self.rewriter.rewrite(&mut document) else {
            warn!(shape = document.shape(), "No primary identifier found, fragment not stored");
            return Ok(FragmentInfo::missing());
        };

        let Some(id) = self.rewriter.local_path(&primary) else {
            warn!(primary = %primary, "Rewritten identifier is not on the base origin");
            return Ok(FragmentInfo::missing());
        };

        if let Document::Tree(tree) = &mut document {
            self.localize_contexts(tree).await;
        }

        let headers = response_headers(options, headers);
        self.repository
            .save(Fragment::new(id.clone(), document, headers.clone()))
            .await?;

        info!(id = %id, "Stored fragment");
        Ok(FragmentInfo::stored(&id, headers))
    }

    /// Retrieve the fragment stored under `id`
    pub async fn get(&self, id: &LocalPath) -> Result<Option<Fragment>> {
        self.repository.get(id).await
    }

    /// Ids of all stored fragments
    pub async fn fragment_ids(&self) -> Result<Vec<LocalPath>> {
        self.repository.keys().await
    }

    /// Remove all fragments, including local context copies
    pub async fn remove_all_fragments(&self) -> Result<usize> {
        self.contexts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.repository.remove_all().await
    }

    async fn localize_contexts(&self, tree: &mut TreeDocument) {
        let remotes: Vec<String> = tree
            .context_references()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut replacements = IdentifierRewrites::new();
        for remote in remotes {
            if replacements.contains_key(&remote) {
                continue;
            }
            if let Some(local) = self.localize_context(&remote).await {
                replacements.insert(remote, local.into());
            }
        }

        tree.replace_context_references(&replacements);
    }

    /// Copy one remote context into the repository and return its local URL
    ///
    /// Each distinct URL is fetched once; later fragments reuse the copy.
    async fn localize_context(&self, remote: &str) -> Option<Url> {
        let cached = self
            .contexts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(remote)
            .cloned();
        if cached.is_some() {
            return cached;
        }

        let remote_url = Url::parse(remote).ok()?;
        if remote_url.origin() == self.base_url().origin() {
            return None;
        }
        let local_url = self.rewriter.change_origin(remote)?;
        let id = self.rewriter.local_path(&local_url)?;

        let body = self.fetcher.fetch(&remote_url).await?;
        let value = match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(err) => {
                warn!(context = %remote_url, error = %err, "Remote context is not JSON, keeping remote reference");
                return None;
            }
        };

        let headers = response_headers(
            &CreateFragmentOptions::default(),
            Headers::from([(CONTENT_TYPE.to_string(), JSON_LD_MEDIA_TYPE.to_string())]),
        );
        let fragment = Fragment::new(id.clone(), Document::Tree(TreeDocument::new(value)), headers);
        if let Err(err) = self.repository.save(fragment).await {
            warn!(context = %remote_url, error = %err, "Failed to store context copy, keeping remote reference");
            return None;
        }

        debug!(context = %remote_url, id = %id, "Stored local copy of remote context");
        self.contexts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(remote.to_string(), local_url.clone());
        Some(local_url)
    }
}
