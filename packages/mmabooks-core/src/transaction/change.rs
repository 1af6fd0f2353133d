use crate::entity::Entity;

/// Identity of an entity inside one unit of work.
///
/// Stable from the moment an entity is loaded or added until the unit of
/// work forgets it, including across the commit that assigns its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackingId(pub(crate) u64);

/// Lifecycle state of a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Loaded and not marked for change
    Unchanged,
    /// Staged for insertion
    Added,
    /// Marked dirty; written on commit if its value differs
    Modified,
    /// Staged for deletion
    Deleted,
}

/// An entity held in the identity map.
#[derive(Debug, Clone)]
pub struct TrackedEntry<E: Entity> {
    /// Key the row is persisted under (None until an add is committed)
    pub key: Option<E::Key>,
    /// Value as last loaded or committed
    pub original: Option<E>,
    /// Value as seen by the caller
    pub current: E,
    pub state: EntryState,
}

/// Represents a single staged change to a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Change<E: Entity> {
    /// Insert a new row
    Insert {
        /// Row to insert (key may still be unassigned)
        row: E,
    },
    /// Replace an existing row
    Update {
        /// Key of the row to update
        key: E::Key,
        /// Value as loaded
        old: E,
        /// Value to write
        new: E,
    },
    /// Delete a row
    Delete {
        /// Key of the row to delete
        key: E::Key,
        /// Row as loaded
        original: E,
    },
}

/// Number of rows written to one table by a commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl TableCounts {
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.deleted
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Rows written by a commit, per table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Tables that received at least one write, in commit order
    pub tables: Vec<(&'static str, TableCounts)>,
}

impl CommitSummary {
    pub(crate) fn record(&mut self, table: &'static str, counts: TableCounts) {
        if !counts.is_empty() {
            self.tables.push((table, counts));
        }
    }

    /// Returns the counts for `table` (zero if untouched).
    pub fn for_table(&self, table: &str) -> TableCounts {
        self.tables
            .iter()
            .find(|(name, _)| *name == table)
            .map(|(_, counts)| *counts)
            .unwrap_or_default()
    }

    pub fn inserted(&self) -> usize {
        self.tables.iter().map(|(_, c)| c.inserted).sum()
    }

    pub fn updated(&self) -> usize {
        self.tables.iter().map(|(_, c)| c.updated).sum()
    }

    pub fn deleted(&self) -> usize {
        self.tables.iter().map(|(_, c)| c.deleted).sum()
    }

    pub fn total(&self) -> usize {
        self.inserted() + self.updated() + self.deleted()
    }

    /// Returns `true` if the commit wrote nothing.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
