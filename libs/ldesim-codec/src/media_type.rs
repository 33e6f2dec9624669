//! Supported wire formats and how they are named

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use oxigraph::io::RdfFormat;

use crate::error::CodecError;

/// A wire format the simulator reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Turtle,
    NTriples,
    NQuads,
    JsonLd,
}

impl MediaType {
    /// Every supported format, in the order offered when the client has no
    /// preference
    pub const PREFERENCE: [MediaType; 4] = [
        MediaType::Turtle,
        MediaType::NTriples,
        MediaType::NQuads,
        MediaType::JsonLd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Turtle => "text/turtle",
            MediaType::NTriples => "application/n-triples",
            MediaType::NQuads => "application/n-quads",
            MediaType::JsonLd => "application/ld+json",
        }
    }

    /// Parse a `Content-Type` value, ignoring parameters and case
    pub fn from_content_type(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        Self::PREFERENCE
            .into_iter()
            .find(|media_type| media_type.as_str().eq_ignore_ascii_case(essence))
    }

    /// The format a file holds, judged by its extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "ttl" => Some(MediaType::Turtle),
            "nt" => Some(MediaType::NTriples),
            "nq" => Some(MediaType::NQuads),
            "jsonld" => Some(MediaType::JsonLd),
            _ => None,
        }
    }

    /// The matching RDF syntax, for the statement-based formats
    pub(crate) fn rdf_format(self) -> Option<RdfFormat> {
        match self {
            MediaType::Turtle => Some(RdfFormat::Turtle),
            MediaType::NTriples => Some(RdfFormat::NTriples),
            MediaType::NQuads => Some(RdfFormat::NQuads),
            MediaType::JsonLd => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_content_type(s).ok_or_else(|| CodecError::unsupported_media_type(s))
    }
}
