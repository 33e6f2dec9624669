//! In-Memory Fragment Repository Implementation
//!
//! This module implements the `FragmentRepository` trait with a map held in
//! process memory. Fragments are keyed by local path and kept in path order,
//! so listings are deterministic.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use ldesim_domain::{
    fragment::{Fragment, FragmentError, LocalPath},
    storage::FragmentRepository,
};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Map-backed implementation of the FragmentRepository port
///
/// Clones share the same underlying map, so the repository can be handed to
/// several services at once. Reads take a shared lock; saves and bulk removal
/// take an exclusive one.
#[derive(Clone, Default)]
pub struct InMemoryFragmentRepository {
    fragments: Arc<RwLock<BTreeMap<LocalPath, Fragment>>>,
}

impl InMemoryFragmentRepository {
    /// Create an empty repository
    ///
    /// # Example
    ///
    /// ```rust
    /// use ldesim_memory::InMemoryFragmentRepository;
    ///
    /// let repository = InMemoryFragmentRepository::new();
    /// ```
    pub fn new() -> Self {
        info!("Initializing InMemoryFragmentRepository");
        Self::default()
    }

    /// Number of fragments currently stored
    pub async fn len(&self) -> usize {
        self.fragments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.fragments.read().await.is_empty()
    }
}

impl FragmentRepository for InMemoryFragmentRepository {
    #[instrument(skip(self, fragment), fields(id = %fragment.id))]
    fn save(&self, fragment: Fragment) -> impl Future<Output = Result<(), FragmentError>> + Send {
        let fragments = self.fragments.clone();

        async move {
            let id = fragment.id.clone();
            let replaced = fragments.write().await.insert(id.clone(), fragment);

            if replaced.is_some() {
                debug!(id = %id, "Replaced stored fragment");
            } else {
                debug!(id = %id, "Stored new fragment");
            }
            Ok(())
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    fn get(
        &self,
        id: &LocalPath,
    ) -> impl Future<Output = Result<Option<Fragment>, FragmentError>> + Send {
        let fragments = self.fragments.clone();
        let id = id.clone();

        async move {
            let fragment = fragments.read().await.get(&id).cloned();
            debug!(id = %id, found = fragment.is_some(), "Looked up fragment");
            Ok(fragment)
        }
    }

    #[instrument(skip(self))]
    fn keys(&self) -> impl Future<Output = Result<Vec<LocalPath>, FragmentError>> + Send {
        let fragments = self.fragments.clone();

        async move { Ok(fragments.read().await.keys().cloned().collect()) }
    }

    #[instrument(skip(self))]
    fn remove_all(&self) -> impl Future<Output = Result<usize, FragmentError>> + Send {
        let fragments = self.fragments.clone();

        async move {
            let mut fragments = fragments.write().await;
            let count = fragments.len();
            fragments.clear();

            info!(count, "Removed all fragments");
            Ok(count)
        }
    }
}
