//! Error types for document decoding
//!
//! Every failure aborts the whole decode call. The variants map one-to-one
//! onto the kinds callers are expected to tell apart.

use std::num::ParseIntError;
use thiserror::Error;

/// Result type alias for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// The error kinds a decode call can fail with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    MissingCollection,
    Shape,
    Schema,
    Type,
    Conversion,
}

/// Errors produced while resolving or merging a document
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Input bytes were not well-formed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document has no entry under the expected collection key
    #[error("expected root document to include a '{collection}' key but it didn't")]
    MissingCollection { collection: String },

    /// A value is present but is not the container the decoder expects
    #[error("Shape error at '{location}': expected {expected}")]
    Shape { location: String, expected: String },

    /// The record type lacks a field the document requires, or its
    /// descriptor table is malformed
    #[error("Schema error on record '{record}': {message}")]
    Schema { record: String, message: String },

    /// A present value has the wrong scalar type
    #[error("Type error on field '{field}': {message}")]
    Type { field: String, message: String },

    /// A string identifier could not be parsed into the field's numeric type
    #[error("Conversion error on field '{field}': cannot parse '{value}' as an integer: {source}")]
    Conversion {
        field: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl DecodeError {
    pub fn shape(location: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Shape {
            location: location.into(),
            expected: expected.into(),
        }
    }

    pub fn schema(record: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            record: record.into(),
            message: message.into(),
        }
    }

    pub fn type_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Type {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The kind of this error, for callers that branch on it
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Parse(_) => ErrorKind::Parse,
            DecodeError::MissingCollection { .. } => ErrorKind::MissingCollection,
            DecodeError::Shape { .. } => ErrorKind::Shape,
            DecodeError::Schema { .. } => ErrorKind::Schema,
            DecodeError::Type { .. } => ErrorKind::Type,
            DecodeError::Conversion { .. } => ErrorKind::Conversion,
        }
    }
}
