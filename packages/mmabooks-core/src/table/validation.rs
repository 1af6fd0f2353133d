//! Cross-table constraint checks run before a snapshot is published.

use super::Relation;
use crate::entity::{Customer, Invoice, State};
use crate::error::DbError;
use crate::schema::{Stored, Tables};

/// Checks that every child row of `C` references an existing `P` row.
pub(crate) fn check_relation<P, C>(tables: &Tables) -> Result<(), DbError>
where
    P: Relation<C> + Stored,
    C: Stored,
{
    let parents = P::table(tables);
    for child in C::table(tables).rows() {
        let value = P::foreign_key(child);
        if !parents.contains(value) {
            return Err(DbError::ForeignKeyViolation {
                table: C::TABLE.to_string(),
                key: child.key().to_string(),
                field: P::FOREIGN_KEY.to_string(),
                value: value.to_string(),
                target: P::TABLE.to_string(),
            });
        }
    }
    Ok(())
}

/// Checks every foreign key declared in the schema.
pub(crate) fn check_foreign_keys(tables: &Tables) -> Result<(), DbError> {
    check_relation::<State, Customer>(tables)?;
    check_relation::<Customer, Invoice>(tables)
}

/// Checks that no table holds more than `limit` rows.
pub(crate) fn check_row_limits(tables: &Tables, limit: usize) -> Result<(), DbError> {
    for (table, count) in tables.row_counts() {
        if count > limit {
            return Err(DbError::MemoryLimitExceeded {
                requested: count,
                limit,
                table: table.to_string(),
            });
        }
    }
    Ok(())
}
