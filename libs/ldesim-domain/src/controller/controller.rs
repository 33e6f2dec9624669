//! Fragment controller - request-facing orchestration
//!
//! The controller sits between the transport and the fragment service. It owns
//! the alias table and the access statistics, decides between redirecting and
//! serving, and seeds the store from a directory of fragment files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use super::aliases::AliasTable;
use super::statistics::{ResponseStatistics, StatisticsTable};
use crate::fragment::{
    CreateFragmentOptions, Document, Fragment, FragmentError, FragmentInfo, FragmentService,
    Headers, LocalPath, Result, CONTENT_TYPE,
};
use crate::storage::{ContextFetcher, DocumentParser, FragmentRepository, NoContextFetcher};

/// Request to make `alias` redirect to `original`
///
/// Both are absolute URLs; only their paths are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AliasRequest {
    pub original: String,
    pub alias: String,
}

/// The redirect a stored alias results in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirection {
    pub from: LocalPath,
    pub to: LocalPath,
}

/// Snapshot of the simulator's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub aliases: Vec<LocalPath>,
    pub fragments: Vec<LocalPath>,
    pub responses: BTreeMap<String, ResponseStatistics>,
}

/// What a bulk delete removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllSummary {
    pub alias_count: usize,
    pub fragment_count: usize,
}

/// Result of reading a fragment
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentLookup {
    /// The id is stored directly
    Found(Fragment),
    /// The id is an alias; clients should follow the location
    Redirect(Url),
    NotFound,
}

/// Outcome of seeding a single file
#[derive(Debug)]
pub struct SeededFile {
    pub file: String,
    pub outcome: Result<FragmentInfo>,
}

/// Controller for fragment, alias and statistics requests
pub struct FragmentController<R, F = NoContextFetcher> {
    service: FragmentService<R, F>,
    aliases: Mutex<AliasTable>,
    statistics: Mutex<StatisticsTable>,
}

impl<R, F> FragmentController<R, F>
where
    R: FragmentRepository,
    F: ContextFetcher,
{
    pub fn new(service: FragmentService<R, F>) -> Self {
        Self {
            service,
            aliases: Mutex::new(AliasTable::new()),
            statistics: Mutex::new(StatisticsTable::new()),
        }
    }

    pub fn service(&self) -> &FragmentService<R, F> {
        &self.service
    }

    /// Store a fragment, rewriting its identifiers onto the simulator's origin
    ///
    /// The returned info has an empty id if the document has no primary node.
    pub async fn post_fragment(
        &self,
        document: Document,
        options: &CreateFragmentOptions,
        headers: Headers,
    ) -> Result<FragmentInfo> {
        self.service.save(document, options, headers).await
    }

    /// Read a fragment, following aliases
    ///
    /// Alias hits produce a redirect to the end of the chain, resolved against
    /// `base_url`, and are not counted. Every other request is counted under
    /// the id exactly as requested, whether or not a fragment is stored there.
    pub async fn get_fragment(&self, id: &str, base_url: &Url) -> Result<FragmentLookup> {
        let path = LocalPath::new(id);

        let target = self.alias_table().resolve(&path)?;
        if let Some(target) = target {
            let location = target.resolve(base_url).map_err(|err| {
                FragmentError::invalid_identifier(target.as_str(), err.to_string())
            })?;
            debug!(id = %id, location = %location, "Redirecting alias");
            return Ok(FragmentLookup::Redirect(location));
        }

        let fragment = if path.is_empty() {
            None
        } else {
            self.service.get(&path).await?
        };
        self.statistics_table().record(id, Utc::now());

        Ok(match fragment {
            Some(fragment) => FragmentLookup::Found(fragment),
            None => {
                debug!(id = %id, "Fragment not found");
                FragmentLookup::NotFound
            }
        })
    }

    /// Make an alias redirect to an original fragment (or to another alias)
    ///
    /// The returned `to` is where the alias resolves right now; aliases added
    /// later may extend the chain.
    ///
    /// # Errors
    ///
    /// - `FragmentError::InvalidIdentifier` if either URL cannot be parsed
    /// - `FragmentError::AliasCycle` if the alias would redirect to itself
    pub fn post_alias(&self, request: &AliasRequest) -> Result<Redirection> {
        let original = without_origin(&request.original)?;
        let alias = without_origin(&request.alias)?;

        let to = self.alias_table().insert(alias.clone(), original)?;
        info!(from = %alias, to = %to, "Stored alias");

        Ok(Redirection { from: alias, to })
    }

    /// Known aliases, stored fragments and direct request counts
    pub async fn statistics(&self) -> Result<Statistics> {
        let aliases = self.alias_table().aliases();
        let responses = self.statistics_table().responses();
        let fragments = self.service.fragment_ids().await?;

        Ok(Statistics {
            aliases,
            fragments,
            responses,
        })
    }

    /// Remove all aliases, statistics and fragments
    pub async fn delete_all(&self) -> Result<DeleteAllSummary> {
        let alias_count = self.alias_table().clear();
        self.statistics_table().clear();
        let fragment_count = self.service.remove_all_fragments().await?;

        info!(alias_count, fragment_count, "Removed all state");
        Ok(DeleteAllSummary {
            alias_count,
            fragment_count,
        })
    }

    /// Store every recognized fragment file found in `directory`
    ///
    /// Files are visited in name order. A file that cannot be read, parsed or
    /// stored is reported in its own outcome and does not stop the others.
    ///
    /// # Errors
    ///
    /// Returns `FragmentError::SeedFailure` if the directory cannot be listed
    pub async fn seed<P: DocumentParser>(
        &self,
        directory: &Path,
        parser: &P,
    ) -> Result<Vec<SeededFile>> {
        let listing_failed =
            |err: std::io::Error| FragmentError::seed_failure(directory.display().to_string(), err.to_string());
        let mut entries = tokio::fs::read_dir(directory).await.map_err(listing_failed)?;

        let mut files: Vec<PathBuf> = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(listing_failed)? {
            let path = entry.path();
            if tokio::fs::metadata(&path).await.is_ok_and(|metadata| metadata.is_file()) {
                files.push(path);
            }
        }
        files.sort();

        let mut seeded = Vec::new();
        for path in files {
            let Some(media_type) = parser.media_type_for(&path) else {
                debug!(path = %path.display(), "Skipping unrecognized seed file");
                continue;
            };

            let file = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let outcome = self.seed_file(&path, media_type, parser).await;
            match &outcome {
                Ok(fragment) => info!(file = %file, id = %fragment.id, "Seeded fragment"),
                Err(err) => warn!(file = %file, error = %err, "Failed to seed fragment"),
            }
            seeded.push(SeededFile { file, outcome });
        }

        Ok(seeded)
    }

    async fn seed_file<P: DocumentParser>(
        &self,
        path: &Path,
        media_type: &str,
        parser: &P,
    ) -> Result<FragmentInfo> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| FragmentError::seed_failure(path.display().to_string(), err.to_string()))?;
        let document = parser.parse(&bytes, media_type)?;
        let headers = Headers::from([(CONTENT_TYPE.to_string(), media_type.to_string())]);

        self.service
            .save(document, &CreateFragmentOptions::default(), headers)
            .await
    }

    fn alias_table(&self) -> MutexGuard<'_, AliasTable> {
        self.aliases.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn statistics_table(&self) -> MutexGuard<'_, StatisticsTable> {
        self.statistics.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn without_origin(identifier: &str) -> Result<LocalPath> {
    LocalPath::without_origin(identifier)
        .ok_or_else(|| FragmentError::invalid_identifier(identifier, "not an absolute URL"))
}
