//! Table storage for one entity type.
//!
//! Each table has:
//! - Rows ordered by primary key behind a shared, copy-on-write map
//! - A sequence generator for integer keys
//!
//! Cloning a table is O(1); the first write after a clone copies the map.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::entity::{Entity, PrimaryKey};
use crate::error::DbError;

/// Rows of a single table keyed by primary key.
#[derive(Debug, Clone)]
pub struct Table<E: Entity> {
    /// Table name
    pub name: &'static str,
    /// Rows in primary key order
    rows: Arc<BTreeMap<E::Key, E>>,
    /// Next generated key value; may sit one past `i32::MAX`
    next_id: i64,
}

impl<E: Entity> Table<E> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            name: E::TABLE,
            rows: Arc::new(BTreeMap::new()),
            next_id: 1, // Start IDs at 1
        }
    }

    /// Creates a table holding `rows`.
    ///
    /// Rows keep their keys; rows with an unassigned integer key receive
    /// the next sequence value. Every row is validated.
    pub fn from_rows(rows: impl IntoIterator<Item = E>) -> Result<Self, DbError> {
        let mut table = Self::new();
        for row in rows {
            row.validate()?;
            table.insert(row)?;
        }
        Ok(table)
    }

    /// Returns the row with the given key.
    pub fn get(&self, key: &E::Key) -> Option<&E> {
        self.rows.get(key)
    }

    /// Returns `true` if a row with the given key exists.
    pub fn contains(&self, key: &E::Key) -> bool {
        self.rows.contains_key(key)
    }

    /// Iterates rows in primary key order.
    pub fn rows(&self) -> impl Iterator<Item = &E> {
        self.rows.values()
    }

    /// Iterates keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &E::Key> {
        self.rows.keys()
    }

    /// Returns the number of rows.
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the value the next generated key will take.
    pub fn current_next_id(&self) -> i64 {
        self.next_id
    }

    /// Inserts a row, generating its key if unassigned.
    ///
    /// # Returns
    /// `Result<E::Key, DbError>` containing the key the row was stored under.
    pub fn insert(&mut self, mut row: E) -> Result<E::Key, DbError> {
        if row.key().is_unassigned() {
            let next = i32::try_from(self.next_id).map_err(|_| DbError::CapacityOverflow {
                operation: "key generation",
            })?;
            let key = E::Key::from_sequence(next).ok_or_else(|| {
                DbError::RequiredFieldMissing {
                    table: self.name.to_string(),
                    field: E::KEY_FIELD.to_string(),
                }
            })?;
            row.set_key(key);
        }

        let key = row.key();
        if self.rows.contains_key(&key) {
            return Err(DbError::DuplicateKey {
                table: self.name.to_string(),
                key: key.to_string(),
            });
        }

        // Explicit keys push the sequence past themselves
        if let Some(value) = key.sequence_value() {
            self.next_id = self.next_id.max(i64::from(value) + 1);
        }

        Arc::make_mut(&mut self.rows).insert(key.clone(), row);
        Ok(key)
    }

    /// Replaces the row stored under the row's key.
    pub fn update(&mut self, row: E) -> Result<(), DbError> {
        let key = row.key();
        match Arc::make_mut(&mut self.rows).get_mut(&key) {
            Some(slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(DbError::RecordNotFound {
                table: self.name.to_string(),
                key: key.to_string(),
            }),
        }
    }

    /// Deletes the row with the given key, returning it.
    pub fn delete(&mut self, key: &E::Key) -> Result<E, DbError> {
        if !self.rows.contains_key(key) {
            return Err(DbError::RecordNotFound {
                table: self.name.to_string(),
                key: key.to_string(),
            });
        }
        Arc::make_mut(&mut self.rows)
            .remove(key)
            .ok_or_else(|| DbError::DataCorruption(format!("row '{}' vanished", key)))
    }
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self::new()
    }
}
