//! Upsert of raw entries into a typed record collection
//!
//! Entries are applied to a working copy of the target. The caller's
//! collection is replaced only after every entry has been applied, so a
//! failing entry leaves it exactly as it was.

use crate::decode::index::IdentityIndex;
use crate::error::{DecodeError, Result};
use crate::naming::Naming;
use crate::schema::{Record, RecordSchema, RelationshipField, ID_FIELD};
use crate::types::{DecodeConfig, MergeOutcome, RawEntry};
use serde_json::Value;
use tracing::{debug, trace};

pub struct Merger<'a, R: Record> {
    config: &'a DecodeConfig,
    naming: &'a Naming,
    schema: &'static RecordSchema<R>,
}

impl<'a, R: Record> Merger<'a, R> {
    pub fn new(config: &'a DecodeConfig, naming: &'a Naming) -> Self {
        Merger {
            config,
            naming,
            schema: R::schema(),
        }
    }

    /// Merge `entries` into `target`, publishing the result only on success
    pub fn merge(&self, entries: &[&RawEntry], target: &mut Vec<R>) -> Result<MergeOutcome> {
        let mut working = target.clone();
        let mut index = self
            .schema
            .id_field()
            .map(|id_field| IdentityIndex::build(&working, id_field));
        let mut outcome = MergeOutcome::default();

        for entry in entries {
            self.merge_entry(entry, &mut working, &mut index, &mut outcome)?;
        }

        debug!(
            record = self.schema.type_name(),
            appended = outcome.appended,
            updated = outcome.updated,
            "Merged entries"
        );
        *target = working;
        Ok(outcome)
    }

    fn merge_entry(
        &self,
        entry: &RawEntry,
        working: &mut Vec<R>,
        index: &mut Option<IdentityIndex>,
        outcome: &mut MergeOutcome,
    ) -> Result<()> {
        let id = match entry.get(&self.config.id_key) {
            None => None,
            Some(Value::String(id)) => Some(id.as_str()),
            Some(_) => {
                return Err(DecodeError::type_error(&self.config.id_key, "id must be a string"));
            }
        };

        let existing = match (id, index.as_ref()) {
            (None, _) => None,
            (Some(id), Some(index)) => index.lookup(id),
            (Some(_), None) => return Err(self.missing_id_field()),
        };

        match existing {
            Some(position) => {
                trace!(record = self.schema.type_name(), id = ?id, position, "Updating existing record");
                self.write_fields(entry, &mut working[position])?;
                outcome.updated += 1;
            }
            None => {
                trace!(record = self.schema.type_name(), id = ?id, "Appending new record");
                let mut record = R::default();
                self.write_fields(entry, &mut record)?;
                if let (Some(index), Some(id_field)) = (index.as_mut(), self.schema.id_field()) {
                    index.insert(id_field.render(&record), working.len());
                }
                working.push(record);
                outcome.appended += 1;
            }
        }

        Ok(())
    }

    fn write_fields(&self, entry: &RawEntry, record: &mut R) -> Result<()> {
        for (key, value) in entry {
            if *key == self.config.links_key {
                self.write_links(value, record)?;
            } else if *key == self.config.id_key {
                let Value::String(id) = value else {
                    return Err(DecodeError::type_error(key, "expected id to be of type string"));
                };
                let id_field = self.schema.id_field().ok_or_else(|| self.missing_id_field())?;
                id_field.assign(record, id)?;
            } else {
                let field = self.naming.to_field_case(key);
                self.schema
                    .assign_attribute(record, &field, value)
                    .unwrap_or_else(|| {
                        Err(DecodeError::schema(
                            self.schema.type_name(),
                            format!(
                                "expected record to have field {} for key '{}' (declared: {})",
                                field,
                                key,
                                self.schema.field_names().join(", ")
                            ),
                        ))
                    })?;
            }
        }
        Ok(())
    }

    fn write_links(&self, links: &Value, record: &mut R) -> Result<()> {
        let Value::Object(links) = links else {
            return Err(DecodeError::shape(&self.config.links_key, "an object"));
        };

        for (name, link) in links {
            let base = self.naming.to_field_case(name);
            let plural = format!("{}IDs", base);
            let singular = format!("{}ID", base);

            let (field_name, field) = match self.schema.relationship(&plural) {
                Some(field) => (plural, field),
                None => match self.schema.relationship(&singular) {
                    Some(field) => (singular, field),
                    None => {
                        return Err(DecodeError::schema(
                            self.schema.type_name(),
                            format!(
                                "expected record to have a {} or {} field (declared: {})",
                                plural,
                                singular,
                                self.schema.field_names().join(", ")
                            ),
                        ));
                    }
                },
            };

            match link {
                Value::Array(items) => {
                    // Element types are checked before the field's cardinality.
                    let ids = items
                        .iter()
                        .map(|item| {
                            item.as_str().ok_or_else(|| {
                                DecodeError::type_error(
                                    &field_name,
                                    format!("expected {} to contain string IDs", name),
                                )
                            })
                        })
                        .collect::<Result<Vec<&str>>>()?;
                    let RelationshipField::ToMany(set) = field else {
                        return Err(DecodeError::shape(
                            format!("{}.{}", self.config.links_key, name),
                            format!("a single identifier for {}", field_name),
                        ));
                    };
                    set(record, ids.as_slice())?;
                }
                Value::String(id) => {
                    let RelationshipField::ToOne(set) = field else {
                        return Err(DecodeError::shape(
                            format!("{}.{}", self.config.links_key, name),
                            format!("a list of identifiers for {}", field_name),
                        ));
                    };
                    set(record, id.as_str())?;
                }
                _ => {
                    return Err(DecodeError::type_error(
                        &field_name,
                        format!("expected {} to contain string IDs", name),
                    ));
                }
            }
        }

        Ok(())
    }

    fn missing_id_field(&self) -> DecodeError {
        DecodeError::schema(
            self.schema.type_name(),
            format!("expected record to have field '{}'", ID_FIELD),
        )
    }
}
