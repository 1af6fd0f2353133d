//! Stored procedure registry.

use parking_lot::RwLock;
use std::collections::HashMap;

use serde_json::Value;

use crate::database::{Database, ProcedureFn};
use crate::error::DbError;

/// Registry of available procedures.
#[derive(Default)]
pub struct ProcedureRegistry {
    procedures: RwLock<HashMap<String, ProcedureFn>>,
}

impl ProcedureRegistry {
    /// Creates a new empty procedure registry.
    pub fn new() -> Self {
        Self {
            procedures: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a procedure, replacing any previous one with the same name.
    pub fn register(&self, name: impl Into<String>, func: ProcedureFn) {
        self.procedures.write().insert(name.into(), func);
    }

    /// Looks up a procedure by name.
    pub fn get(&self, name: &str) -> Result<ProcedureFn, DbError> {
        self.procedures
            .read()
            .get(name)
            .copied()
            .ok_or_else(|| DbError::ProcedureNotFound(name.to_string()))
    }

    /// Returns whether a procedure with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.procedures.read().contains_key(name)
    }

    /// Returns a sorted list of registered procedure names.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.procedures.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for ProcedureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcedureRegistry")
            .field("procedures", &self.list())
            .finish()
    }
}

/// Restores the seed dataset. Registered as the reset procedure.
///
/// Takes no parameters and returns `null`.
pub fn reset_data(db: &Database, _params: Value) -> Result<Value, DbError> {
    db.restore_seed()?;
    Ok(Value::Null)
}
