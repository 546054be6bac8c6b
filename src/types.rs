use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An already-parsed document: collection names mapped to arrays of entries
pub type Document = Value;

/// One untyped entry of a collection
pub type RawEntry = Map<String, Value>;

/// Configuration for the decoding process
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// Word separator used by wire names, e.g. "-" for "blog-posts"
    pub separator: String,

    /// Words rendered fully upper-case in record field names ("author-id" -> "AuthorID")
    pub acronyms: Vec<String>,

    /// Irregular (singular, plural) pairs consulted before the regular rules
    pub irregular_plurals: Vec<(String, String)>,

    /// Reserved entry key holding the identity
    pub id_key: String,

    /// Reserved entry key holding the relationship map
    pub links_key: String,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig {
            separator: String::from("-"),
            acronyms: vec![String::from("ID"), String::from("URL")],
            irregular_plurals: vec![
                (String::from("person"), String::from("people")),
                (String::from("child"), String::from("children")),
                (String::from("man"), String::from("men")),
                (String::from("woman"), String::from("women")),
            ],
            id_key: String::from("id"),
            links_key: String::from("links"),
        }
    }
}

/// Summary of a successful merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Entries that produced a new record at the end of the collection
    pub appended: usize,

    /// Entries that updated a record already in the collection
    pub updated: usize,
}

impl MergeOutcome {
    /// Total number of entries processed
    pub fn total(&self) -> usize {
        self.appended + self.updated
    }
}
