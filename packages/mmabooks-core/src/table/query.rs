//! Query expressions over a materialized row sequence.
//!
//! A [`Query`] is taken from a consistent snapshot, so every operator
//! works on plain values: filter, order, page, project and join.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::DbError;

/// Rows produced by a query, transformed by chained operators.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<T> {
    rows: Vec<T>,
}

impl<T> Query<T> {
    /// Wraps already materialized rows.
    pub fn from_rows(rows: Vec<T>) -> Self {
        Self { rows }
    }

    /// Keeps only rows matching `predicate`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool,
    {
        self.rows.retain(|row| predicate(row));
        self
    }

    /// Sorts rows ascending by `key`. The sort is stable.
    pub fn order_by<K, F>(mut self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.rows.sort_by_key(|row| key(row));
        self
    }

    /// Sorts rows descending by `key`. The sort is stable.
    pub fn order_by_desc<K, F>(mut self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.rows.sort_by(|a, b| key(b).cmp(&key(a)));
        self
    }

    /// Sorts rows with an explicit comparator (e.g. for float columns).
    pub fn order_with<F>(mut self, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.rows.sort_by(compare);
        self
    }

    /// Skips the first `count` rows.
    pub fn skip(mut self, count: usize) -> Self {
        let count = count.min(self.rows.len());
        self.rows.drain(..count);
        self
    }

    /// Keeps at most `count` rows.
    pub fn take(mut self, count: usize) -> Self {
        self.rows.truncate(count);
        self
    }

    /// Projects every row into a new shape.
    pub fn select<R, F>(self, project: F) -> Query<R>
    where
        F: FnMut(T) -> R,
    {
        Query {
            rows: self.rows.into_iter().map(project).collect(),
        }
    }

    /// Inner join with `other` on equal keys, projecting each matching pair.
    ///
    /// Output follows the order of `self`, then the order of `other` for
    /// rows sharing a key. Callers order the result explicitly when they
    /// need a different order.
    pub fn join<R, K, U, LK, RK, P>(
        self,
        other: Query<R>,
        left_key: LK,
        right_key: RK,
        mut project: P,
    ) -> Query<U>
    where
        K: Eq + Hash,
        LK: Fn(&T) -> K,
        RK: Fn(&R) -> K,
        P: FnMut(&T, &R) -> U,
    {
        let mut index: HashMap<K, Vec<&R>> = HashMap::with_capacity(other.rows.len());
        for row in &other.rows {
            index.entry(right_key(row)).or_default().push(row);
        }

        let mut rows = Vec::new();
        for left in &self.rows {
            if let Some(matches) = index.get(&left_key(left)) {
                rows.extend(matches.iter().map(|right| project(left, right)));
            }
        }
        Query { rows }
    }

    /// Returns the first row, if any.
    pub fn first(self) -> Option<T> {
        self.rows.into_iter().next()
    }

    /// Returns the only row, `None` when empty, or `MultipleRows`.
    pub fn single(self) -> Result<Option<T>, DbError> {
        match self.rows.len() {
            0 | 1 => Ok(self.rows.into_iter().next()),
            count => Err(DbError::MultipleRows { count }),
        }
    }

    /// Returns `true` if any row matches `predicate`.
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.rows.iter().any(predicate)
    }

    /// Returns the number of rows.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates rows in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// Consumes the query, returning its rows.
    pub fn to_list(self) -> Vec<T> {
        self.rows
    }
}

impl<T> IntoIterator for Query<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
