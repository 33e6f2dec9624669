//! Error types for the wire codec

use ldesim_domain::fragment::FragmentError;
use thiserror::Error;

/// Errors raised while reading or writing a wire format
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The media type is not one of the supported wire formats
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The payload is not valid in its declared format
    #[error("Invalid {format} document: {message}")]
    Syntax {
        format: &'static str,
        message: String,
    },

    /// The document cannot be expressed in the requested format
    #[error("Cannot write a {shape} document as {format}")]
    UnsupportedConversion {
        shape: &'static str,
        format: &'static str,
    },

    /// Writing the document failed
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl CodecError {
    pub fn unsupported_media_type(media_type: impl Into<String>) -> Self {
        Self::UnsupportedMediaType(media_type.into())
    }

    pub fn syntax(format: &'static str, message: impl Into<String>) -> Self {
        Self::Syntax {
            format,
            message: message.into(),
        }
    }

    pub fn unsupported_conversion(shape: &'static str, format: &'static str) -> Self {
        Self::UnsupportedConversion { shape, format }
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<CodecError> for FragmentError {
    fn from(err: CodecError) -> Self {
        FragmentError::invalid_document(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
