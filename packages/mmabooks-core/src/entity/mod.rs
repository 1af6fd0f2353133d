//! Entity definitions mirroring the rows of each table.

mod account;
mod customer;
mod equipment;
mod invoice;
mod product;
mod state;
mod supplier;

pub use account::Account;
pub use customer::Customer;
pub use equipment::Equipment;
pub use invoice::Invoice;
pub use product::Product;
pub use state::State;
pub use supplier::Supplier;

use std::fmt;
use std::hash::Hash;

use crate::error::DbError;

/// Primary key of a table row.
///
/// Integer keys are generated from the table sequence when left at zero;
/// string keys are always supplied by the caller.
pub trait PrimaryKey: Clone + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Returns `true` if the key still has to be assigned by the store.
    fn is_unassigned(&self) -> bool;

    /// Builds a key from the next sequence value, if the key is generated.
    fn from_sequence(value: i32) -> Option<Self>;

    /// Returns the sequence value this key occupies, if the key is generated.
    fn sequence_value(&self) -> Option<i32>;
}

impl PrimaryKey for i32 {
    fn is_unassigned(&self) -> bool {
        *self == 0
    }

    fn from_sequence(value: i32) -> Option<Self> {
        Some(value)
    }

    fn sequence_value(&self) -> Option<i32> {
        Some(*self)
    }
}

impl PrimaryKey for String {
    fn is_unassigned(&self) -> bool {
        self.trim().is_empty()
    }

    fn from_sequence(_value: i32) -> Option<Self> {
        None
    }

    fn sequence_value(&self) -> Option<i32> {
        None
    }
}

/// A row type stored in one table and keyed by a single primary key.
pub trait Entity: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Primary key type
    type Key: PrimaryKey;

    /// Table name
    const TABLE: &'static str;

    /// Primary key column name
    const KEY_FIELD: &'static str;

    /// Returns the primary key of this row.
    fn key(&self) -> Self::Key;

    /// Overwrites the primary key (used when the store generates one).
    fn set_key(&mut self, key: Self::Key);

    /// Checks column constraints before the row is written.
    fn validate(&self) -> Result<(), DbError> {
        Ok(())
    }
}

/// Fails with `RequiredFieldMissing` when `value` is blank.
pub(crate) fn require(table: &str, field: &str, value: &str) -> Result<(), DbError> {
    if value.trim().is_empty() {
        return Err(DbError::RequiredFieldMissing {
            table: table.to_string(),
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Fails with `InvalidValue` when `ok` is false.
pub(crate) fn check(table: &str, field: &str, ok: bool, reason: &str) -> Result<(), DbError> {
    if !ok {
        return Err(DbError::InvalidValue {
            table: table.to_string(),
            field: field.to_string(),
            reason: reason.to_string(),
        });
    }
    Ok(())
}
