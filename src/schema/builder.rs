//! Registration-time construction of record descriptor tables
//!
//! Each builder method captures a typed accessor and erases it behind a
//! setter closure. Naming mistakes are collected as they are registered and
//! reported by `build`, so a malformed table never reaches the decoder.

use super::{
    AttributeSetter, IdField, Identifier, RecordSchema, RelationshipField, ID_FIELD,
};
use crate::error::{DecodeError, Result};
use crate::naming::is_field_name;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

const TO_ONE_SUFFIX: &str = "ID";
const TO_MANY_SUFFIX: &str = "IDs";

/// Builder for a `RecordSchema`
pub struct RecordSchemaBuilder<R> {
    type_name: String,
    id: Option<IdField<R>>,
    attributes: HashMap<String, AttributeSetter<R>>,
    relationships: HashMap<String, RelationshipField<R>>,
    names: HashSet<String>,
    errors: Vec<String>,
}

impl<R: 'static> RecordSchemaBuilder<R> {
    pub fn new(type_name: impl Into<String>) -> Self {
        RecordSchemaBuilder {
            type_name: type_name.into(),
            id: None,
            attributes: HashMap::new(),
            relationships: HashMap::new(),
            names: HashSet::new(),
            errors: Vec::new(),
        }
    }

    /// Declare the identity field (`ID`)
    pub fn id<T, G, S>(mut self, get: G, set: S) -> Self
    where
        T: Identifier,
        G: Fn(&R) -> &T + Send + Sync + 'static,
        S: Fn(&mut R) -> &mut T + Send + Sync + 'static,
    {
        if self.id.is_some() {
            self.errors.push(format!("field '{}' registered twice", ID_FIELD));
        }
        self.id = Some(IdField {
            render: Box::new(move |record: &R| get(record).render()),
            assign: Box::new(move |record: &mut R, raw: &str| -> Result<()> {
                *set(record) = T::parse_id(raw, ID_FIELD)?;
                Ok(())
            }),
        });
        self
    }

    /// Declare a plain attribute field
    ///
    /// The raw value is deserialized into `T` as-is; use `Option<T>` to accept `null`.
    pub fn attribute<T, S>(mut self, field: &str, set: S) -> Self
    where
        T: DeserializeOwned + 'static,
        S: Fn(&mut R) -> &mut T + Send + Sync + 'static,
    {
        if field == ID_FIELD {
            self.errors
                .push(format!("'{}' is the identity field; declare it with id()", ID_FIELD));
            return self;
        }
        if !self.register(field) {
            return self;
        }

        let name = field.to_string();
        self.attributes.insert(
            field.to_string(),
            Box::new(move |record: &mut R, value: &Value| -> Result<()> {
                let decoded = T::deserialize(value)
                    .map_err(|e| DecodeError::type_error(&name, e.to_string()))?;
                *set(record) = decoded;
                Ok(())
            }),
        );
        self
    }

    /// Declare a to-one relationship field; the name must end in `ID`
    pub fn to_one<T, S>(mut self, field: &str, set: S) -> Self
    where
        T: Identifier,
        S: Fn(&mut R) -> &mut T + Send + Sync + 'static,
    {
        if !has_relationship_suffix(field, TO_ONE_SUFFIX) {
            self.errors.push(format!(
                "to-one relationship field '{}' must end in '{}'",
                field, TO_ONE_SUFFIX
            ));
            return self;
        }
        if !self.register(field) {
            return self;
        }

        let name = field.to_string();
        self.relationships.insert(
            field.to_string(),
            RelationshipField::ToOne(Box::new(move |record: &mut R, raw: &str| -> Result<()> {
                *set(record) = T::parse_id(raw, &name)?;
                Ok(())
            })),
        );
        self
    }

    /// Declare a to-many relationship field; the name must end in `IDs`
    pub fn to_many<T, S>(mut self, field: &str, set: S) -> Self
    where
        T: Identifier,
        S: Fn(&mut R) -> &mut Vec<T> + Send + Sync + 'static,
    {
        if !has_relationship_suffix(field, TO_MANY_SUFFIX) {
            self.errors.push(format!(
                "to-many relationship field '{}' must end in '{}'",
                field, TO_MANY_SUFFIX
            ));
            return self;
        }
        if !self.register(field) {
            return self;
        }

        let name = field.to_string();
        self.relationships.insert(
            field.to_string(),
            RelationshipField::ToMany(Box::new(move |record: &mut R, raw: &[&str]| -> Result<()> {
                let ids = raw
                    .iter()
                    .map(|id| T::parse_id(id, &name))
                    .collect::<Result<Vec<T>>>()?;
                *set(record) = ids;
                Ok(())
            })),
        );
        self
    }

    /// Validate the registrations and produce the descriptor table
    pub fn build(self) -> Result<RecordSchema<R>> {
        if !is_field_name(&self.type_name) {
            return Err(DecodeError::schema(
                &self.type_name,
                "record type name must be CamelCase",
            ));
        }
        if let Some(first) = self.errors.into_iter().next() {
            return Err(DecodeError::schema(&self.type_name, first));
        }

        Ok(RecordSchema {
            type_name: self.type_name,
            id: self.id,
            attributes: self.attributes,
            relationships: self.relationships,
        })
    }

    /// Record a field name, noting invalid or duplicate names
    fn register(&mut self, field: &str) -> bool {
        if !is_field_name(field) {
            self.errors
                .push(format!("field name '{}' must be CamelCase", field));
            return false;
        }
        if !self.names.insert(field.to_string()) {
            self.errors.push(format!("field '{}' registered twice", field));
            return false;
        }
        true
    }
}

fn has_relationship_suffix(field: &str, suffix: &str) -> bool {
    field.len() > suffix.len() && field.ends_with(suffix)
}
