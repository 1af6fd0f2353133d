//! Core data-access layer for the MMABooks database.
//!
//! Provides the entity model, typed in-memory tables, query expressions,
//! the unit of work with its identity map, stored procedures, and the
//! seed dataset restored before every fixture.

pub mod config;
pub mod context;
pub mod database;
pub mod entity;
pub mod error;
pub mod procedure;
pub mod schema;
pub mod seed;
pub mod table;
pub mod transaction;

pub use context::{DataContext, EntitySet};
pub use database::{Database, ProcedureFn};
pub use error::DbError;
