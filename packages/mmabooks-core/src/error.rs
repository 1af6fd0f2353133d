//! Database error types.

use thiserror::Error;

/// Database operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// Table not found
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },

    /// Record not found
    #[error("Record with key '{key}' not found in table '{table}'")]
    RecordNotFound { table: String, key: String },

    /// Primary key already present in the table
    #[error("Duplicate key '{key}' in table '{table}'")]
    DuplicateKey { table: String, key: String },

    /// Required column left empty
    #[error("Required field '{field}' missing in table '{table}'")]
    RequiredFieldMissing { table: String, field: String },

    /// Column value outside its allowed range
    #[error("Invalid value for '{field}' in table '{table}': {reason}")]
    InvalidValue {
        table: String,
        field: String,
        reason: String,
    },

    /// Foreign key references a row that does not exist
    #[error("Foreign key violation: {table}.{field} = '{value}' (row '{key}') has no match in '{target}'")]
    ForeignKeyViolation {
        table: String,
        key: String,
        field: String,
        value: String,
        target: String,
    },

    /// Entity is not tracked by the unit of work
    #[error("Entity with key '{key}' in table '{table}' is not tracked")]
    EntityNotTracked { table: String, key: String },

    /// Primary key of a tracked entity was changed
    #[error("Primary key of tracked entity '{key}' in table '{table}' was modified")]
    KeyModified { table: String, key: String },

    /// Sequence could not produce another key
    #[error("Capacity overflow during {operation}")]
    CapacityOverflow { operation: &'static str },

    /// Query expected at most one row
    #[error("Expected at most one row, found {count}")]
    MultipleRows { count: usize },

    /// Row limit exceeded for a table
    #[error("Memory limit exceeded for table '{table}': requested {requested} rows, limit {limit} rows")]
    MemoryLimitExceeded {
        requested: usize,
        limit: usize,
        table: String,
    },

    /// Procedure not registered
    #[error("Procedure '{0}' not found")]
    ProcedureNotFound(String),

    /// Procedure panic
    #[error("Procedure panic: {0}")]
    ProcedurePanic(String),

    /// Lock poisoned (Mutex poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Data corruption detected
    #[error("Data corruption detected: {0}")]
    DataCorruption(String),

    /// Disk full error while writing seed files
    #[error("Disk full: {0}")]
    DiskFull(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// Transient I/O error that may succeed on retry
    #[error("Transient I/O error: {0}")]
    TransientIoError(String),
}
