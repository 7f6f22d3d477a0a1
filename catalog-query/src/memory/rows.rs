//! In-memory collection handle

use std::collections::HashSet;
use std::hash::Hash;

use crate::clause::{Criteria, Order, Selector};
use crate::error::Result;
use crate::traits::Queryable;

/// An owned, ordered set of rows.
///
/// This is the collection handle handed out by
/// [`MemoryStore`](super::MemoryStore). It can also wrap any `Vec` directly,
/// which is handy for evaluating a specification over data that is already
/// loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rows<T> {
    rows: Vec<T>,
}

impl<T> Rows<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.rows
    }
}

impl<T> From<Vec<T>> for Rows<T> {
    fn from(rows: Vec<T>) -> Self {
        Self::new(rows)
    }
}

impl<T> Queryable<T> for Rows<T> {
    fn filter(self, criteria: &Criteria<T>) -> Self {
        Self {
            rows: self
                .rows
                .into_iter()
                .filter(|row| criteria.matches(row))
                .collect(),
        }
    }

    fn distinct_by<K, F>(self, key: F) -> Self
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        let mut seen = HashSet::with_capacity(self.rows.len());
        Self {
            rows: self
                .rows
                .into_iter()
                .filter(|row| seen.insert(key(row)))
                .collect(),
        }
    }

    fn order_by(mut self, order: &Order<T>) -> Self {
        // sort_by is stable: ties keep their store order
        self.rows.sort_by(|a, b| order.compare(a, b));
        self
    }

    fn window(self, skip: usize, take: usize) -> Self {
        Self {
            rows: self.rows.into_iter().skip(skip).take(take).collect(),
        }
    }

    fn project<R>(self, selector: &Selector<T, R>) -> Result<Vec<R>> {
        Ok(self.rows.iter().map(|row| selector.apply(row)).collect())
    }

    fn count(self) -> Result<u64> {
        Ok(self.rows.len() as u64)
    }
}
