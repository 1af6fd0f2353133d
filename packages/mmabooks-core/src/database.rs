//! Database container holding the table snapshot, seed and procedures.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;

use crate::config::DbConfig;
use crate::error::DbError;
use crate::procedure::{self, ProcedureRegistry};
use crate::schema::{ChangeSet, Tables};
use crate::seed::{self, SeedData};
use crate::table::validation;
use crate::transaction::CommitSummary;

/// Procedure function signature.
///
/// Procedures are Rust functions registered by name and invoked like
/// stored procedures. They receive:
/// - A reference to the database
/// - JSON parameters (`null` when called without arguments)
/// - Return a JSON result or error
pub type ProcedureFn = fn(db: &Database, params: serde_json::Value) -> Result<serde_json::Value, DbError>;

/// Database container holding all tables and runtime state.
///
/// The tables form one immutable snapshot. Commits build the next snapshot
/// and publish it with a single atomic swap, so readers see either all of
/// a commit or none of it.
pub struct Database {
    /// Current snapshot of every table
    state: ArcSwap<Tables>,
    /// Snapshot restored by the reset procedure
    seed: Arc<Tables>,
    /// Serializes writers
    commit_lock: Mutex<()>,
    /// Registered stored procedures
    procedures: ProcedureRegistry,
    config: DbConfig,
}

impl Database {
    /// Opens an empty database and prepares its seed snapshot.
    ///
    /// The seed comes from `config.seed_path` when set, otherwise from the
    /// built-in dataset. The reset procedure is registered under
    /// `config.reset_procedure`. Tables stay empty until it runs.
    pub fn open(config: DbConfig) -> Result<Self, DbError> {
        let seed_data = match &config.seed_path {
            Some(path) => seed::load_seed_file(path, &config)?,
            None => SeedData::builtin()?,
        };
        Self::with_seed(config, seed_data)
    }

    /// Opens an empty database with an explicit seed dataset.
    pub fn with_seed(config: DbConfig, seed_data: SeedData) -> Result<Self, DbError> {
        let seed = Arc::new(seed_data.into_tables()?);
        let procedures = ProcedureRegistry::new();
        procedures.register(config.reset_procedure.clone(), procedure::reset_data);

        tracing::debug!(
            "Prepared seed snapshot: {:?}",
            seed.row_counts()
        );

        Ok(Self {
            state: ArcSwap::from_pointee(Tables::default()),
            seed,
            commit_lock: Mutex::new(()),
            procedures,
            config,
        })
    }

    /// Opens a database and runs the reset procedure once.
    pub fn open_seeded(config: DbConfig) -> Result<Self, DbError> {
        let db = Self::open(config)?;
        db.reset()?;
        Ok(db)
    }

    /// Returns the configuration the database was opened with.
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Returns the current snapshot of all tables.
    pub fn snapshot(&self) -> Arc<Tables> {
        self.state.load_full()
    }

    /// Returns the names of all tables.
    pub fn table_names(&self) -> Vec<&'static str> {
        Tables::table_names()
    }

    /// Returns the number of rows in the named table.
    pub fn record_count(&self, table: &str) -> Result<usize, DbError> {
        self.state.load().record_count(table)
    }

    /// Registers a stored procedure.
    pub fn register_procedure(&self, name: impl Into<String>, func: ProcedureFn) {
        self.procedures.register(name, func);
    }

    /// Returns the names of all registered procedures.
    pub fn procedure_names(&self) -> Vec<String> {
        self.procedures.list()
    }

    /// Calls a procedure without arguments.
    pub fn call_procedure(&self, name: &str) -> Result<serde_json::Value, DbError> {
        self.call_procedure_with(name, serde_json::Value::Null)
    }

    /// Calls a procedure with JSON parameters.
    ///
    /// A panicking procedure is reported as `ProcedurePanic`.
    pub fn call_procedure_with(
        &self,
        name: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, DbError> {
        let func = self.procedures.get(name)?;
        tracing::debug!("Calling procedure {}", name);

        match std::panic::catch_unwind(AssertUnwindSafe(|| func(self, params))) {
            Ok(result) => result,
            Err(panic) => {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!("Procedure {} panicked: {}", name, msg);
                Err(DbError::ProcedurePanic(msg))
            }
        }
    }

    /// Runs the configured reset procedure.
    pub fn reset(&self) -> Result<(), DbError> {
        self.call_procedure(&self.config.reset_procedure)
            .map(|_| ())
    }

    /// Replaces every table with the seed snapshot.
    pub fn restore_seed(&self) -> Result<(), DbError> {
        let _guard = self.commit_lock.lock().map_err(|_| DbError::LockPoisoned)?;
        self.state.store(Arc::clone(&self.seed));
        tracing::debug!("Restored seed data");
        Ok(())
    }

    /// Commits a change set atomically.
    ///
    /// All staged changes are applied to a copy of the current snapshot,
    /// foreign keys and row limits are checked, and the copy is published.
    /// On any error nothing is published and `changes` keeps its staged
    /// state.
    ///
    /// # Returns
    /// `Result<CommitSummary, DbError>` with the rows written per table.
    pub fn commit(&self, changes: &mut ChangeSet) -> Result<CommitSummary, DbError> {
        if !changes.has_changes() {
            return Ok(CommitSummary::default());
        }

        let _guard = self.commit_lock.lock().map_err(|_| DbError::LockPoisoned)?;
        let mut next = Tables::clone(&self.state.load_full());

        let result = changes.apply_to(&mut next).and_then(|summary| {
            validation::check_foreign_keys(&next)?;
            validation::check_row_limits(&next, self.config.max_rows_per_table)?;
            Ok(summary)
        });

        match result {
            Ok(summary) => {
                self.state.store(Arc::new(next));
                changes.accept();
                tracing::debug!(
                    "Committed {} inserted, {} updated, {} deleted across {} tables",
                    summary.inserted(),
                    summary.updated(),
                    summary.deleted(),
                    summary.tables.len()
                );
                Ok(summary)
            }
            Err(e) => {
                changes.reject();
                tracing::warn!("Commit rejected: {}", e);
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("tables", &self.state.load().row_counts())
            .field("procedures", &self.procedures)
            .field("config", &self.config)
            .finish()
    }
}
