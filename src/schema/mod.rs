//! Record descriptor tables
//!
//! A record type declares its identity, attribute and relationship fields
//! once, through `RecordSchema::builder`, instead of having them discovered
//! by name at decode time. Field names follow the record convention:
//! CamelCase, identity named `ID`, to-one relationships ending in `ID` and
//! to-many relationships ending in `IDs`.

pub mod builder;
pub mod ident;

pub use builder::RecordSchemaBuilder;
pub use ident::Identifier;

use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;

/// Logical name of the identity field
pub const ID_FIELD: &str = "ID";

/// A statically typed record that documents can be decoded into
///
/// ```rust
/// use jsonapi_decode::{Record, RecordSchema};
/// use once_cell::sync::Lazy;
///
/// #[derive(Debug, Clone, Default)]
/// struct Post {
///     id: i64,
///     title: String,
///     tags_ids: Vec<String>,
/// }
///
/// impl Record for Post {
///     fn schema() -> &'static RecordSchema<Self> {
///         static SCHEMA: Lazy<RecordSchema<Post>> = Lazy::new(|| {
///             RecordSchema::<Post>::builder("Post")
///                 .id(|p| &p.id, |p| &mut p.id)
///                 .attribute("Title", |p| &mut p.title)
///                 .to_many("TagsIDs", |p| &mut p.tags_ids)
///                 .build()
///                 .expect("valid Post schema")
///         });
///         &SCHEMA
///     }
/// }
/// ```
pub trait Record: Clone + Default + 'static {
    fn schema() -> &'static RecordSchema<Self>;
}

pub(crate) type AttributeSetter<R> = Box<dyn Fn(&mut R, &Value) -> Result<()> + Send + Sync>;
pub(crate) type OneSetter<R> = Box<dyn Fn(&mut R, &str) -> Result<()> + Send + Sync>;
pub(crate) type ManySetter<R> = Box<dyn Fn(&mut R, &[&str]) -> Result<()> + Send + Sync>;

/// Accessor pair for the identity field
pub struct IdField<R> {
    pub(crate) render: Box<dyn Fn(&R) -> String + Send + Sync>,
    pub(crate) assign: OneSetter<R>,
}

impl<R> IdField<R> {
    /// String form of a record's identity
    pub fn render(&self, record: &R) -> String {
        (self.render)(record)
    }

    /// Parse `raw` into the identity field
    pub fn assign(&self, record: &mut R, raw: &str) -> Result<()> {
        (self.assign)(record, raw)
    }
}

/// Setter for a relationship identifier field
pub enum RelationshipField<R> {
    ToOne(OneSetter<R>),
    ToMany(ManySetter<R>),
}

/// Descriptor table for one record type
pub struct RecordSchema<R> {
    type_name: String,
    id: Option<IdField<R>>,
    attributes: HashMap<String, AttributeSetter<R>>,
    relationships: HashMap<String, RelationshipField<R>>,
}

impl<R: 'static> RecordSchema<R> {
    /// Start a descriptor table for the record type `type_name`
    pub fn builder(type_name: impl Into<String>) -> RecordSchemaBuilder<R> {
        RecordSchemaBuilder::new(type_name)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn id_field(&self) -> Option<&IdField<R>> {
        self.id.as_ref()
    }

    /// Assign a raw attribute value, returning `None` when no such field exists
    pub fn assign_attribute(&self, record: &mut R, field: &str, value: &Value) -> Option<Result<()>> {
        self.attributes.get(field).map(|set| set(record, value))
    }

    pub fn relationship(&self, field: &str) -> Option<&RelationshipField<R>> {
        self.relationships.get(field)
    }

    /// All declared field names, sorted
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .attributes
            .keys()
            .chain(self.relationships.keys())
            .map(|k| k.as_str())
            .collect();
        if self.id.is_some() {
            names.push(ID_FIELD);
        }
        names.sort_unstable();
        names
    }
}
