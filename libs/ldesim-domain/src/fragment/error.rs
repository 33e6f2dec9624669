//! Domain errors for fragment operations
//!
//! These are domain-level errors that abstract away infrastructure details:
//! adapters convert their own failures (parser errors, storage errors) into
//! one of these variants.

use thiserror::Error;

/// Errors that can occur while storing, aliasing or serving fragments
///
/// A document without a locatable primary identifier is NOT an error: the
/// service reports it through an empty [`FragmentInfo`](super::FragmentInfo).
#[derive(Error, Debug)]
pub enum FragmentError {
    /// The repository backend failed
    #[error("Storage operation failed: {0}")]
    StorageFailure(String),

    /// The payload could not be turned into a document
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// An identifier supplied by a caller is not a usable URL
    #[error("Invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    /// Storing an alias would make its chain loop back onto itself
    #[error("Alias '{alias}' would create a redirect cycle through '{original}'")]
    AliasCycle { alias: String, original: String },

    /// A seed directory or file could not be read
    #[error("Seeding failed for '{path}': {reason}")]
    SeedFailure { path: String, reason: String },
}

impl FragmentError {
    /// Create a storage failure error with a message
    pub fn storage_failure(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }

    /// Create an invalid document error with a message
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Create an alias cycle error
    pub fn alias_cycle(alias: impl Into<String>, original: impl Into<String>) -> Self {
        Self::AliasCycle {
            alias: alias.into(),
            original: original.into(),
        }
    }

    /// Create a seed failure error
    pub fn seed_failure(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SeedFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for fragment operations
pub type Result<T> = std::result::Result<T, FragmentError>;
