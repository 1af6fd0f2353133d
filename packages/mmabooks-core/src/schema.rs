//! Table layout of the MMABooks store.
//!
//! Declares one table per entity and generates the snapshot type
//! ([`Tables`]), the per-table staging area of a unit of work
//! ([`ChangeSet`]) and the [`Stored`] accessors tying them together.

use crate::entity::{Account, Customer, Entity, Equipment, Invoice, Product, State, Supplier};
use crate::error::DbError;
use crate::table::Table;
use crate::transaction::{CommitSummary, StagingBuffer};

/// An entity with a table in [`Tables`] and a staging buffer in [`ChangeSet`].
pub trait Stored: Entity {
    fn table(tables: &Tables) -> &Table<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;
    fn staging(changes: &ChangeSet) -> &StagingBuffer<Self>;
    fn staging_mut(changes: &mut ChangeSet) -> &mut StagingBuffer<Self>;
}

macro_rules! schema {
    ($($field:ident => $entity:ty),+ $(,)?) => {
        /// Immutable snapshot of every table in the store.
        #[derive(Debug, Clone, Default)]
        pub struct Tables {
            $(pub $field: Table<$entity>,)+
        }

        impl Tables {
            /// Returns `(table name, row count)` for every table.
            pub fn row_counts(&self) -> Vec<(&'static str, usize)> {
                vec![$((<$entity as Entity>::TABLE, self.$field.record_count()),)+]
            }

            /// Returns the names of all tables.
            pub fn table_names() -> Vec<&'static str> {
                vec![$(<$entity as Entity>::TABLE,)+]
            }
        }

        /// Staged changes of a unit of work, one buffer per table.
        #[derive(Debug, Default)]
        pub struct ChangeSet {
            $(pub(crate) $field: StagingBuffer<$entity>,)+
        }

        impl ChangeSet {
            /// Returns `true` if any table has staged adds, edits or removes.
            pub fn has_changes(&self) -> bool {
                false $(|| self.$field.has_changes())+
            }

            /// Returns the number of entities in the identity map.
            pub fn tracked_count(&self) -> usize {
                0 $(+ self.$field.tracked_count())+
            }

            /// Applies every staged change to `tables`.
            ///
            /// Generated keys are held in scratch space until
            /// [`ChangeSet::accept`] or [`ChangeSet::reject`].
            pub(crate) fn apply_to(&mut self, tables: &mut Tables) -> Result<CommitSummary, DbError> {
                let mut summary = CommitSummary::default();
                $(
                    let counts = self.$field.apply(&mut tables.$field)?;
                    summary.record(<$entity as Entity>::TABLE, counts);
                )+
                Ok(summary)
            }

            /// Marks everything applied as persisted.
            pub(crate) fn accept(&mut self) {
                $(self.$field.accept();)+
            }

            /// Drops scratch state after a failed apply.
            pub(crate) fn reject(&mut self) {
                $(self.$field.reject();)+
            }

            /// Forgets all tracked entities and staged changes.
            pub(crate) fn clear(&mut self) {
                $(self.$field.clear();)+
            }
        }

        $(
            impl Stored for $entity {
                fn table(tables: &Tables) -> &Table<Self> {
                    &tables.$field
                }

                fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
                    &mut tables.$field
                }

                fn staging(changes: &ChangeSet) -> &StagingBuffer<Self> {
                    &changes.$field
                }

                fn staging_mut(changes: &mut ChangeSet) -> &mut StagingBuffer<Self> {
                    &mut changes.$field
                }
            }
        )+
    };
}

schema! {
    states => State,
    accounts => Account,
    customers => Customer,
    invoices => Invoice,
    products => Product,
    suppliers => Supplier,
    equipment => Equipment,
}

impl Tables {
    /// Returns the row count of the named table.
    pub fn record_count(&self, table: &str) -> Result<usize, DbError> {
        self.row_counts()
            .into_iter()
            .find(|(name, _)| *name == table)
            .map(|(_, count)| count)
            .ok_or_else(|| DbError::TableNotFound {
                table: table.to_string(),
            })
    }
}
