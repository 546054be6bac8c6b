use crate::error::{DecodeError, Result};
use crate::types::{Document, RawEntry};
use serde_json::Value;

/// Locate the entries stored under `collection` in a document
///
/// Read-only: the document is never modified. A `null` value counts as absent.
pub fn resolve_collection<'a>(document: &'a Document, collection: &str) -> Result<Vec<&'a RawEntry>> {
    let Value::Object(root) = document else {
        return Err(DecodeError::shape("document root", "an object"));
    };

    let entries = match root.get(collection) {
        None | Some(Value::Null) => {
            return Err(DecodeError::MissingCollection {
                collection: collection.to_string(),
            });
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(DecodeError::shape(collection, "an array of entries"));
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| match entry {
            Value::Object(attributes) => Ok(attributes),
            _ => Err(DecodeError::shape(
                format!("{}[{}]", collection, idx),
                "an object",
            )),
        })
        .collect()
}
