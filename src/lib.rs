//! # jsonapi-decode - JSON:API Document Decoding
//!
//! Decodes already-parsed JSON:API style documents into collections of
//! strongly typed records, upserting by identity.
//!
//! ## Modules
//!
//! - **schema**: per-record descriptor tables (identity, attributes, relationships)
//! - **decode**: collection resolution and identity-based merging
//! - **naming**: wire-name and field-name conventions
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonapi_decode::{decode, Record, RecordSchema};
//! use once_cell::sync::Lazy;
//! use serde_json::json;
//!
//! #[derive(Debug, Clone, Default)]
//! struct Post {
//!     id: i64,
//!     title: String,
//!     author_id: i64,
//!     tags_ids: Vec<String>,
//! }
//!
//! impl Record for Post {
//!     fn schema() -> &'static RecordSchema<Self> {
//!         static SCHEMA: Lazy<RecordSchema<Post>> = Lazy::new(|| {
//!             RecordSchema::<Post>::builder("Post")
//!                 .id(|p| &p.id, |p| &mut p.id)
//!                 .attribute("Title", |p| &mut p.title)
//!                 .to_one("AuthorID", |p| &mut p.author_id)
//!                 .to_many("TagsIDs", |p| &mut p.tags_ids)
//!                 .build()
//!                 .expect("valid Post schema")
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let document = json!({
//!     "posts": [
//!         {"id": "1", "title": "Hello", "links": {"author": "7", "tags": ["a", "b"]}}
//!     ]
//! });
//!
//! let mut posts: Vec<Post> = Vec::new();
//! decode(&document, &mut posts)?;
//!
//! assert_eq!(posts[0].id, 1);
//! assert_eq!(posts[0].author_id, 7);
//! assert_eq!(posts[0].tags_ids, vec!["a", "b"]);
//! # Ok(())
//! # }
//! ```

pub mod decode;
pub mod error;
pub mod naming;
pub mod schema;
pub mod types;

// Re-export commonly used types for convenience
pub use decode::Decoder;
pub use error::{DecodeError, ErrorKind, Result};
pub use naming::Naming;
pub use schema::{Identifier, Record, RecordSchema, RecordSchemaBuilder};
pub use types::{DecodeConfig, Document, MergeOutcome, RawEntry};

/// Decode an already-parsed document into `target` with the default configuration
pub fn decode<R: Record>(document: &Document, target: &mut Vec<R>) -> Result<MergeOutcome> {
    Decoder::default().decode(document, target)
}

/// Parse `bytes` as JSON and decode into `target` with the default configuration
pub fn decode_bytes<R: Record>(bytes: &[u8], target: &mut Vec<R>) -> Result<MergeOutcome> {
    Decoder::default().decode_bytes(bytes, target)
}

/// Parse `json` and decode into `target` with the default configuration
pub fn decode_str<R: Record>(json: &str, target: &mut Vec<R>) -> Result<MergeOutcome> {
    Decoder::default().decode_str(json, target)
}
