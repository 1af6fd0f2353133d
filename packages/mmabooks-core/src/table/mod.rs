//! Typed tables, query expressions, relations and constraint validation.

mod query;
mod relation;
#[allow(clippy::module_inception)]
mod table;
pub(crate) mod validation;

pub use query::Query;
pub use relation::{Loaded, Relation};
pub use table::Table;
