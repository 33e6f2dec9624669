//! # LDES Simulator Domain Layer
//!
//! This crate contains the business logic of the LDES server simulator: taking
//! fragments of a paginated event-stream tree, moving every structurally
//! significant identifier onto the simulator's own origin, and serving the
//! stored fragments back through an alias-aware lookup.
//!
//! - **Entities**: fragments, documents and their identifiers
//! - **Ports**: traits for the repository, context fetching and document parsing
//! - **Services**: the rewriting engine, the fragment service and the controller
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (HTTP, RDF
//! parsers, storage engines). Those are expressed as traits in [`storage`] and
//! implemented by adapter crates.
//!
//! ## Example
//!
//! ```rust
//! use ldesim_domain::fragment::{CreateFragmentOptions, Document, FragmentService, Headers};
//! use ldesim_domain::storage::FragmentRepository;
//!
//! async fn example<R: FragmentRepository>(service: FragmentService<R>, document: Document) {
//!     let info = service
//!         .save(document, &CreateFragmentOptions::default(), Headers::new())
//!         .await
//!         .unwrap();
//!     println!("Stored fragment at {}", info.id);
//! }
//! ```

pub mod controller;
pub mod fragment;
pub mod storage;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use controller::FragmentController;
pub use fragment::{Document, Fragment, FragmentError, FragmentInfo, FragmentService, LocalPath};
pub use storage::{ContextFetcher, DocumentParser, FragmentRepository};
