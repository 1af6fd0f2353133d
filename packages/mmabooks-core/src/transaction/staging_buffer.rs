use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::entity::Entity;
use crate::error::DbError;
use crate::table::Table;

use super::change::{Change, EntryState, TableCounts, TrackedEntry, TrackingId};

/// Identity map and dirty set of one table inside a unit of work.
///
/// Changes are isolated from the table until commit.
#[derive(Debug)]
pub struct StagingBuffer<E: Entity> {
    /// Name of the table this buffer belongs to
    pub table_name: &'static str,
    /// Tracked entities by identity
    entries: BTreeMap<TrackingId, TrackedEntry<E>>,
    /// Persisted key to identity; at most one entry per key
    by_key: HashMap<E::Key, TrackingId>,
    /// Identities with staged adds, edits or removes
    dirty: BTreeSet<TrackingId>,
    /// Keys generated by an apply that has not been accepted yet
    assigned: Vec<(TrackingId, E::Key)>,
}

impl<E: Entity> StagingBuffer<E> {
    /// Creates an empty staging buffer.
    pub fn new() -> Self {
        Self {
            table_name: E::TABLE,
            entries: BTreeMap::new(),
            by_key: HashMap::new(),
            dirty: BTreeSet::new(),
            assigned: Vec::new(),
        }
    }

    /// Returns the identity tracking the row with `key`, if any.
    pub fn tracked_id(&self, key: &E::Key) -> Option<TrackingId> {
        self.by_key.get(key).copied()
    }

    /// Returns the tracked entry for `id`.
    pub fn entry(&self, id: TrackingId) -> Option<&TrackedEntry<E>> {
        self.entries.get(&id)
    }

    /// Returns the caller-visible value of `id`.
    pub fn current(&self, id: TrackingId) -> Option<&E> {
        self.entries.get(&id).map(|entry| &entry.current)
    }

    /// Returns the persisted key of `id` (None for uncommitted adds).
    pub fn key_of(&self, id: TrackingId) -> Option<E::Key> {
        self.entries.get(&id).and_then(|entry| entry.key.clone())
    }

    /// Starts tracking a row loaded from the table.
    pub(crate) fn attach(&mut self, id: TrackingId, row: E) {
        let key = row.key();
        self.by_key.insert(key.clone(), id);
        self.entries.insert(
            id,
            TrackedEntry {
                key: Some(key),
                original: Some(row.clone()),
                current: row,
                state: EntryState::Unchanged,
            },
        );
    }

    /// Stages a row for insertion.
    pub(crate) fn stage_add(&mut self, id: TrackingId, row: E) {
        self.entries.insert(
            id,
            TrackedEntry {
                key: None,
                original: None,
                current: row,
                state: EntryState::Added,
            },
        );
        self.dirty.insert(id);
    }

    /// Marks `id` dirty and hands out its value for mutation.
    ///
    /// Returns `None` for unknown or deleted entities.
    pub(crate) fn mark_modified(&mut self, id: TrackingId) -> Option<&mut E> {
        if self.entries.get(&id)?.state == EntryState::Deleted {
            return None;
        }
        self.dirty.insert(id);
        let entry = self.entries.get_mut(&id)?;
        if entry.state == EntryState::Unchanged {
            entry.state = EntryState::Modified;
        }
        Some(&mut entry.current)
    }

    /// Stages `row` as the new value of `id`.
    pub(crate) fn stage_update(&mut self, id: TrackingId, row: E) -> Result<(), DbError> {
        let table = self.table_name;
        let key = row.key().to_string();
        match self.mark_modified(id) {
            Some(current) => {
                *current = row;
                Ok(())
            }
            None => Err(DbError::EntityNotTracked {
                table: table.to_string(),
                key,
            }),
        }
    }

    /// Stages `id` for deletion. Removing an uncommitted add forgets it.
    pub(crate) fn stage_delete(&mut self, id: TrackingId) -> Result<(), DbError> {
        let table = self.table_name;
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| DbError::EntityNotTracked {
                table: table.to_string(),
                key: format!("#{}", id.0),
            })?;

        match entry.state {
            EntryState::Added => {
                self.entries.remove(&id);
                self.dirty.remove(&id);
            }
            EntryState::Deleted => {}
            EntryState::Unchanged | EntryState::Modified => {
                entry.state = EntryState::Deleted;
                self.dirty.insert(id);
            }
        }
        Ok(())
    }

    /// Rows as seen through this unit of work: table rows overlaid with
    /// tracked values, followed by uncommitted adds.
    pub fn visible_rows(&self, table: &Table<E>) -> Vec<E> {
        let mut rows: Vec<E> = table
            .rows()
            .map(|row| {
                self.by_key
                    .get(&row.key())
                    .and_then(|id| self.entries.get(id))
                    .map_or_else(|| row.clone(), |entry| entry.current.clone())
            })
            .collect();
        rows.extend(
            self.entries
                .values()
                .filter(|entry| entry.state == EntryState::Added)
                .map(|entry| entry.current.clone()),
        );
        rows
    }

    /// Lists the changes a commit would write, in staging order.
    pub fn pending_changes(&self) -> Vec<Change<E>> {
        self.dirty
            .iter()
            .filter_map(|id| self.entries.get(id))
            .filter_map(|entry| match (entry.state, &entry.key, &entry.original) {
                (EntryState::Added, _, _) => Some(Change::Insert {
                    row: entry.current.clone(),
                }),
                (EntryState::Modified, Some(key), Some(old)) if *old != entry.current => {
                    Some(Change::Update {
                        key: key.clone(),
                        old: old.clone(),
                        new: entry.current.clone(),
                    })
                }
                (EntryState::Deleted, Some(key), Some(original)) => Some(Change::Delete {
                    key: key.clone(),
                    original: original.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Writes staged changes into `table`: deletes, then edits, then adds.
    ///
    /// The buffer itself is left untouched apart from the scratch list of
    /// generated keys, so a failed commit can be retried or discarded.
    pub(crate) fn apply(&mut self, table: &mut Table<E>) -> Result<TableCounts, DbError> {
        self.assigned.clear();
        let mut counts = TableCounts::default();

        for entry in self.dirty_entries(EntryState::Deleted) {
            let key = self.persisted_key(entry)?;
            table.delete(key)?;
            counts.deleted += 1;
        }

        for entry in self.dirty_entries(EntryState::Modified) {
            if entry.original.as_ref() == Some(&entry.current) {
                continue;
            }
            let key = self.persisted_key(entry)?;
            if entry.current.key() != *key {
                return Err(DbError::KeyModified {
                    table: self.table_name.to_string(),
                    key: key.to_string(),
                });
            }
            entry.current.validate()?;
            table.update(entry.current.clone())?;
            counts.updated += 1;
        }

        let mut assigned = Vec::new();
        for id in &self.dirty {
            let Some(entry) = self.entries.get(id) else {
                continue;
            };
            if entry.state != EntryState::Added {
                continue;
            }
            entry.current.validate()?;
            let key = table.insert(entry.current.clone())?;
            assigned.push((*id, key));
            counts.inserted += 1;
        }
        self.assigned = assigned;

        Ok(counts)
    }

    /// Marks the last apply as persisted.
    pub(crate) fn accept(&mut self) {
        let deleted: Vec<TrackingId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.state == EntryState::Deleted)
            .map(|(id, _)| *id)
            .collect();
        for id in deleted {
            if let Some(key) = self.entries.remove(&id).and_then(|entry| entry.key) {
                if self.by_key.get(&key) == Some(&id) {
                    self.by_key.remove(&key);
                }
            }
        }

        for (id, key) in std::mem::take(&mut self.assigned) {
            if let Some(entry) = self.entries.get_mut(&id) {
                entry.current.set_key(key.clone());
                entry.key = Some(key.clone());
                self.by_key.insert(key, id);
            }
        }

        for entry in self.entries.values_mut() {
            if entry.state != EntryState::Unchanged {
                entry.original = Some(entry.current.clone());
                entry.state = EntryState::Unchanged;
            }
        }
        self.dirty.clear();
    }

    /// Drops the scratch state of a failed apply.
    pub(crate) fn reject(&mut self) {
        self.assigned.clear();
    }

    /// Forgets every tracked entity.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.by_key.clear();
        self.dirty.clear();
        self.assigned.clear();
    }

    /// Returns `true` if anything is staged.
    pub fn has_changes(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns the number of tracked entities.
    pub fn tracked_count(&self) -> usize {
        self.entries.len()
    }

    fn dirty_entries(&self, state: EntryState) -> impl Iterator<Item = &TrackedEntry<E>> {
        self.dirty
            .iter()
            .filter_map(|id| self.entries.get(id))
            .filter(move |entry| entry.state == state)
    }

    fn persisted_key<'e>(&self, entry: &'e TrackedEntry<E>) -> Result<&'e E::Key, DbError> {
        entry.key.as_ref().ok_or_else(|| {
            DbError::DataCorruption(format!(
                "tracked entity in '{}' has no persisted key",
                self.table_name
            ))
        })
    }
}

impl<E: Entity> Default for StagingBuffer<E> {
    fn default() -> Self {
        Self::new()
    }
}
