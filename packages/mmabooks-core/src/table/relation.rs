//! Relations between tables for foreign key references.

use crate::entity::{Customer, Entity, Invoice, State};

/// One-to-many relation from `Self` (the parent) to `C` (the child).
///
/// The child holds the parent's primary key in the column named
/// [`Relation::FOREIGN_KEY`].
pub trait Relation<C: Entity>: Entity {
    /// Field name in the child table
    const FOREIGN_KEY: &'static str;

    /// Returns the parent key referenced by `child`.
    fn foreign_key(child: &C) -> &Self::Key;
}

/// A parent row loaded together with its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<P, C> {
    pub parent: P,
    pub children: Vec<C>,
}

impl Relation<Customer> for State {
    const FOREIGN_KEY: &'static str = "state_code";

    fn foreign_key(child: &Customer) -> &String {
        &child.state_code
    }
}

impl Relation<Invoice> for Customer {
    const FOREIGN_KEY: &'static str = "customer_id";

    fn foreign_key(child: &Invoice) -> &i32 {
        &child.customer_id
    }
}
