//! Identity index over a target collection
//!
//! Maps the rendered identity of each record to the position of its first
//! occurrence. Lookups therefore agree with a front-to-back scan of the
//! collection, including when it already holds duplicate identities.

use crate::schema::IdField;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct IdentityIndex {
    positions: HashMap<String, usize>,
}

impl IdentityIndex {
    /// Index every record of `records`
    pub fn build<R>(records: &[R], id_field: &IdField<R>) -> Self {
        let mut index = IdentityIndex {
            positions: HashMap::with_capacity(records.len()),
        };
        for (position, record) in records.iter().enumerate() {
            index.insert(id_field.render(record), position);
        }
        index
    }

    /// Position of the first record whose identity renders to `id`
    pub fn lookup(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Note a record at `position`; an identity already present keeps its earlier position
    pub fn insert(&mut self, id: String, position: usize) {
        self.positions.entry(id).or_insert(position);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordSchema;

    #[derive(Debug, Clone, Default)]
    struct Tag {
        id: i64,
    }

    #[test]
    fn test_first_occurrence_wins() {
        let schema = RecordSchema::<Tag>::builder("Tag")
            .id(|t| &t.id, |t| &mut t.id)
            .build()
            .unwrap();
        let tags = vec![Tag { id: 7 }, Tag { id: 8 }, Tag { id: 7 }];

        let mut index = IdentityIndex::build(&tags, schema.id_field().unwrap());
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("7"), Some(0));
        assert_eq!(index.lookup("8"), Some(1));
        assert_eq!(index.lookup("9"), None);

        index.insert("8".to_string(), 3);
        index.insert("9".to_string(), 4);
        assert_eq!(index.lookup("8"), Some(1));
        assert_eq!(index.lookup("9"), Some(4));
    }
}
