//! Data context: typed access to every table through one unit of work.
//!
//! A [`DataContext`] owns a [`UnitOfWork`] against a shared [`Database`].
//! [`DataContext::set`] (or one of the named accessors) borrows an
//! [`EntitySet`] for a single entity type; changes staged through any set
//! are committed together by [`DataContext::save_changes`].

use std::marker::PhantomData;
use std::sync::Arc;

use crate::database::Database;
use crate::entity::{Account, Customer, Equipment, Invoice, Product, State, Supplier};
use crate::error::DbError;
use crate::schema::Stored;
use crate::table::{Loaded, Query, Relation};
use crate::transaction::{Change, CommitSummary, EntryState, TrackingId, UnitOfWork};

/// Session over a [`Database`] holding one unit of work.
#[derive(Debug)]
pub struct DataContext {
    db: Arc<Database>,
    uow: UnitOfWork,
}

impl DataContext {
    /// Opens a context with an empty unit of work.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            uow: UnitOfWork::new(),
        }
    }

    /// Returns the database this context works against.
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Returns the typed collection for `E`.
    pub fn set<E: Stored>(&mut self) -> EntitySet<'_, E> {
        EntitySet {
            db: &self.db,
            uow: &mut self.uow,
            _entity: PhantomData,
        }
    }

    pub fn accounts(&mut self) -> EntitySet<'_, Account> {
        self.set()
    }

    pub fn customers(&mut self) -> EntitySet<'_, Customer> {
        self.set()
    }

    pub fn products(&mut self) -> EntitySet<'_, Product> {
        self.set()
    }

    pub fn suppliers(&mut self) -> EntitySet<'_, Supplier> {
        self.set()
    }

    pub fn equipment(&mut self) -> EntitySet<'_, Equipment> {
        self.set()
    }

    pub fn invoices(&mut self) -> EntitySet<'_, Invoice> {
        self.set()
    }

    pub fn states(&mut self) -> EntitySet<'_, State> {
        self.set()
    }

    /// All rows of `E` as seen by this context.
    ///
    /// Takes `&self`, so two queries can be built side by side for a join.
    pub fn query<E: Stored>(&self) -> Query<E> {
        Query::from_rows(self.uow.visible_rows::<E>(&self.db.snapshot()))
    }

    /// Commits every staged add, edit and remove as one transaction.
    ///
    /// On failure the store is untouched and the staged changes are kept.
    pub fn save_changes(&mut self) -> Result<CommitSummary, DbError> {
        self.db.commit(&mut self.uow.changes)
    }

    /// Alias of [`DataContext::save_changes`].
    pub fn commit(&mut self) -> Result<CommitSummary, DbError> {
        self.save_changes()
    }

    /// Drops all staged changes and tracked entities.
    pub fn discard(&mut self) {
        if self.uow.has_changes() {
            tracing::debug!("Discarding staged changes");
        }
        self.uow.clear();
    }

    /// Returns `true` if anything is staged.
    pub fn has_changes(&self) -> bool {
        self.uow.has_changes()
    }

    /// Returns the number of entities in the identity map.
    pub fn tracked_count(&self) -> usize {
        self.uow.tracked_count()
    }

    pub fn unit_of_work(&self) -> &UnitOfWork {
        &self.uow
    }
}

impl Drop for DataContext {
    fn drop(&mut self) {
        if self.uow.has_changes() {
            tracing::debug!(
                "Data context dropped with {} uncommitted tracked entities",
                self.uow.tracked_count()
            );
        }
    }
}

/// Queryable collection of one entity type inside a [`DataContext`].
pub struct EntitySet<'a, E: Stored> {
    db: &'a Database,
    uow: &'a mut UnitOfWork,
    _entity: PhantomData<E>,
}

impl<'a, E: Stored> EntitySet<'a, E> {
    /// Looks up a row by primary key and tracks it.
    ///
    /// Returns the tracked value, including uncommitted edits. `None` when
    /// the row does not exist, is staged for removal, or was only added in
    /// this unit of work.
    pub fn find(&mut self, key: &E::Key) -> Option<E> {
        let snapshot = self.db.snapshot();
        let id = self.uow.track::<E>(&snapshot, key)?;
        let entry = E::staging(&self.uow.changes).entry(id)?;
        if entry.state == EntryState::Deleted {
            return None;
        }
        Some(entry.current.clone())
    }

    /// Looks up a row by primary key and returns the tracked instance for
    /// mutation. The row is marked dirty.
    pub fn find_mut(self, key: &E::Key) -> Option<&'a mut E> {
        let snapshot = self.db.snapshot();
        let uow = self.uow;
        let id = uow.track::<E>(&snapshot, key)?;
        E::staging_mut(&mut uow.changes).mark_modified(id)
    }

    /// Returns the row with the lowest key for mutation, skipping rows
    /// staged for removal.
    pub fn first_mut(self) -> Option<&'a mut E> {
        let snapshot = self.db.snapshot();
        let staging = E::staging(&self.uow.changes);
        let key = E::table(&snapshot)
            .keys()
            .find(|key| {
                staging
                    .tracked_id(key)
                    .and_then(|id| staging.entry(id))
                    .map_or(true, |entry| entry.state != EntryState::Deleted)
            })?
            .clone();
        self.find_mut(&key)
    }

    /// All rows of `E` as seen by this unit of work.
    pub fn query(&self) -> Query<E> {
        Query::from_rows(self.uow.visible_rows::<E>(&self.db.snapshot()))
    }

    /// Stages `row` for insertion.
    ///
    /// The returned id resolves to the stored key after commit through
    /// [`EntitySet::key_of`].
    pub fn add(&mut self, row: E) -> TrackingId {
        self.uow.add(row)
    }

    /// Stages `row` as the new value of the persisted row with the same key.
    pub fn update(&mut self, row: E) -> Result<(), DbError> {
        let key = row.key();
        let snapshot = self.db.snapshot();
        let id = self
            .uow
            .track::<E>(&snapshot, &key)
            .ok_or_else(|| DbError::RecordNotFound {
                table: E::TABLE.to_string(),
                key: key.to_string(),
            })?;
        E::staging_mut(&mut self.uow.changes).stage_update(id, row)
    }

    /// Stages the tracked row with `key` for removal.
    ///
    /// # Errors
    /// `EntityNotTracked` if no row with `key` was loaded in this unit of work.
    pub fn remove(&mut self, key: &E::Key) -> Result<(), DbError> {
        let id = E::staging(&self.uow.changes)
            .tracked_id(key)
            .ok_or_else(|| DbError::EntityNotTracked {
                table: E::TABLE.to_string(),
                key: key.to_string(),
            })?;
        E::staging_mut(&mut self.uow.changes).stage_delete(id)
    }

    /// Stages the entity behind `id` for removal. Removing an uncommitted
    /// add just drops it.
    pub fn remove_tracked(&mut self, id: TrackingId) -> Result<(), DbError> {
        E::staging_mut(&mut self.uow.changes).stage_delete(id)
    }

    /// Returns the stored key of `id` (`None` before commit).
    pub fn key_of(&self, id: TrackingId) -> Option<E::Key> {
        E::staging(&self.uow.changes).key_of(id)
    }

    /// Returns the tracked value of `id`.
    pub fn get(&self, id: TrackingId) -> Option<E> {
        E::staging(&self.uow.changes).current(id).cloned()
    }

    /// Returns the tracking state of the row with `key`, if tracked.
    pub fn entry_state(&self, key: &E::Key) -> Option<EntryState> {
        let staging = E::staging(&self.uow.changes);
        staging
            .tracked_id(key)
            .and_then(|id| staging.entry(id))
            .map(|entry| entry.state)
    }

    /// Loads the row with `key` together with its children of type `C`.
    pub fn include<C>(&mut self, key: &E::Key) -> Option<Loaded<E, C>>
    where
        E: Relation<C>,
        C: Stored,
    {
        let parent = self.find(key)?;
        let children = self
            .uow
            .visible_rows::<C>(&self.db.snapshot())
            .into_iter()
            .filter(|child| E::foreign_key(child) == key)
            .collect();
        Some(Loaded { parent, children })
    }

    /// Lists the changes a commit would write for this table.
    pub fn pending_changes(&self) -> Vec<Change<E>> {
        E::staging(&self.uow.changes).pending_changes()
    }
}
