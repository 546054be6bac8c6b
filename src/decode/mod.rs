//! Document-to-record decoding
//!
//! The `Decoder` resolves the collection named after a record type and
//! merges its entries into a target collection by identity.

pub mod index;
pub mod merger;
pub mod resolver;

pub use index::IdentityIndex;
pub use merger::Merger;
pub use resolver::resolve_collection;

use crate::error::Result;
use crate::naming::Naming;
use crate::schema::Record;
use crate::types::{DecodeConfig, Document, MergeOutcome, RawEntry};
use tracing::debug;

/// Decodes documents into typed record collections
#[derive(Debug, Clone)]
pub struct Decoder {
    config: DecodeConfig,
    naming: Naming,
}

impl Decoder {
    pub fn new(config: DecodeConfig) -> Self {
        let naming = Naming::new(&config);
        Decoder { config, naming }
    }

    /// The document key holding entries for record type `R`
    pub fn collection_name<R: Record>(&self) -> String {
        self.naming.collection_name(R::schema().type_name())
    }

    /// Locate the raw entries for record type `R`
    pub fn resolve<'a, R: Record>(&self, document: &'a Document) -> Result<Vec<&'a RawEntry>> {
        let collection = self.collection_name::<R>();
        let entries = resolve_collection(document, &collection)?;
        debug!(collection = %collection, entries = entries.len(), "Resolved collection");
        Ok(entries)
    }

    /// Merge raw entries into `target`
    ///
    /// On error `target` is left untouched.
    pub fn merge<R: Record>(&self, entries: &[&RawEntry], target: &mut Vec<R>) -> Result<MergeOutcome> {
        Merger::new(&self.config, &self.naming).merge(entries, target)
    }

    /// Resolve and merge the collection for `R` from an already-parsed document
    pub fn decode<R: Record>(&self, document: &Document, target: &mut Vec<R>) -> Result<MergeOutcome> {
        let entries = self.resolve::<R>(document)?;
        self.merge(&entries, target)
    }

    /// Parse `bytes` as JSON, then decode
    pub fn decode_bytes<R: Record>(&self, bytes: &[u8], target: &mut Vec<R>) -> Result<MergeOutcome> {
        let document: Document = serde_json::from_slice(bytes)?;
        self.decode(&document, target)
    }

    /// Parse `json` as JSON, then decode
    pub fn decode_str<R: Record>(&self, json: &str, target: &mut Vec<R>) -> Result<MergeOutcome> {
        let document: Document = serde_json::from_str(json)?;
        self.decode(&document, target)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new(DecodeConfig::default())
    }
}
