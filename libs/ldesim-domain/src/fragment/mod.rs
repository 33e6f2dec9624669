//! Fragment domain module
//!
//! This module contains the documents a fragment can carry, the engine that
//! moves their identifiers onto the simulator's origin, and the service that
//! stores them.

mod document;
mod entity;
mod error;
mod graph;
mod ids;
mod rewrite;
mod service;
mod tree;
pub mod vocab;

pub use document::{Document, FragmentShape, IdentifierRewrites};
pub use entity::{
    response_headers, CreateFragmentOptions, Fragment, FragmentInfo, Headers, CACHE_CONTROL,
    CONTENT_TYPE, IMMUTABLE_CACHE_CONTROL, JSON_LD_MEDIA_TYPE,
};
pub use error::{FragmentError, Result};
pub use graph::{GraphDocument, Literal, Statement, Term};
pub use ids::LocalPath;
pub use rewrite::OriginRewriter;
pub use service::FragmentService;
pub use tree::TreeDocument;
