use crate::schema::{ChangeSet, Stored, Tables};

use super::change::TrackingId;

/// Scoped set of tracked entities and staged changes, committed together
/// or not at all.
///
/// Loaded rows enter the identity map once per key; edits are recorded in
/// an explicit dirty set rather than discovered by scanning.
#[derive(Debug, Default)]
pub struct UnitOfWork {
    /// Per-table staging buffers
    pub(crate) changes: ChangeSet,
    /// Last tracking id handed out
    last_id: u64,
}

impl UnitOfWork {
    /// Creates an empty unit of work.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_tracking_id(&mut self) -> TrackingId {
        self.last_id += 1;
        TrackingId(self.last_id)
    }

    /// Returns the identity of the row with `key`, loading it from
    /// `snapshot` into the identity map on first access.
    ///
    /// # Returns
    /// `None` if the row is neither tracked nor present in the snapshot.
    pub fn track<E: Stored>(&mut self, snapshot: &Tables, key: &E::Key) -> Option<TrackingId> {
        if let Some(id) = E::staging(&self.changes).tracked_id(key) {
            return Some(id);
        }
        let row = E::table(snapshot).get(key)?.clone();
        let id = self.next_tracking_id();
        E::staging_mut(&mut self.changes).attach(id, row);
        Some(id)
    }

    /// Stages `row` for insertion.
    pub fn add<E: Stored>(&mut self, row: E) -> TrackingId {
        let id = self.next_tracking_id();
        E::staging_mut(&mut self.changes).stage_add(id, row);
        id
    }

    /// Rows of `E` as seen through this unit of work.
    pub fn visible_rows<E: Stored>(&self, snapshot: &Tables) -> Vec<E> {
        E::staging(&self.changes).visible_rows(E::table(snapshot))
    }

    /// Returns the staged changes of every table.
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Returns `true` if anything is staged.
    pub fn has_changes(&self) -> bool {
        self.changes.has_changes()
    }

    /// Returns the number of tracked entities across all tables.
    pub fn tracked_count(&self) -> usize {
        self.changes.tracked_count()
    }

    /// Discards all staged changes and tracked entities.
    pub fn clear(&mut self) {
        self.changes.clear();
    }
}
