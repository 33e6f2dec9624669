//! # LDES Simulator Wire Codec
//!
//! Reads and writes fragments in the formats the simulator speaks:
//!
//! - **Turtle**, **N-Triples** and **N-Quads**, parsed into graph documents
//!   with `oxigraph`
//! - **JSON-LD**, kept as a tree document when it is a single node object with
//!   an `@id`, otherwise parsed into a graph document; graph documents are
//!   written to it in expanded form
//!
//! [`RdfCodec`] implements the domain's `DocumentParser` port so it can be
//! used for seeding, and adds serialization for serving.

pub mod error;
mod jsonld;
pub mod media_type;
mod rdf;

use std::path::Path;

use ldesim_domain::fragment::{Document, FragmentError};
use ldesim_domain::storage::DocumentParser;
use tracing::debug;

pub use error::{CodecError, Result};
pub use media_type::MediaType;

/// Parser and serializer for every supported wire format
#[derive(Debug, Clone, Copy, Default)]
pub struct RdfCodec;

impl RdfCodec {
    pub fn new() -> Self {
        Self
    }

    /// Parse a payload in the given format
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Syntax` if the payload is not valid for its format
    pub fn parse_as(&self, bytes: &[u8], media_type: MediaType) -> Result<Document> {
        let document = match media_type.rdf_format() {
            Some(format) => Document::Graph(rdf::parse(bytes, format)?),
            None => jsonld::parse(bytes)?,
        };
        debug!(media_type = %media_type, shape = document.shape(), "Parsed document");
        Ok(document)
    }

    /// Write a document in the given format
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnsupportedConversion` if the format is not one of
    /// [`RdfCodec::output_media_types`] for this document
    pub fn serialize(&self, document: &Document, media_type: MediaType) -> Result<Vec<u8>> {
        match (document, media_type.rdf_format()) {
            (Document::Graph(graph), Some(format)) => rdf::serialize(graph, format),
            (Document::Graph(graph), None) => jsonld::serialize_graph(graph),
            (Document::Tree(tree), None) => jsonld::serialize_tree(tree),
            (Document::Tree(_), Some(_)) => Err(CodecError::unsupported_conversion(
                document.shape(),
                media_type.as_str(),
            )),
        }
    }

    /// Formats a document can be served in, most preferred first
    pub fn output_media_types(&self, document: &Document) -> Vec<MediaType> {
        match document {
            Document::Tree(_) => vec![MediaType::JsonLd],
            Document::Graph(graph) => MediaType::PREFERENCE
                .into_iter()
                .filter(|media_type| match media_type.rdf_format() {
                    Some(format) => format.supports_datasets() || !rdf::has_named_graphs(graph),
                    None => true,
                })
                .collect(),
        }
    }
}

impl DocumentParser for RdfCodec {
    fn media_type_for(&self, path: &Path) -> Option<&'static str> {
        MediaType::from_extension(path).map(MediaType::as_str)
    }

    fn parse(&self, bytes: &[u8], media_type: &str) -> std::result::Result<Document, FragmentError> {
        let media_type = media_type.parse::<MediaType>()?;
        Ok(self.parse_as(bytes, media_type)?)
    }
}
