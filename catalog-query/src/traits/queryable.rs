//! Collection handle primitives

use std::hash::Hash;

use crate::clause::{Criteria, Order, Selector};
use crate::error::Result;

/// A handle over a collection of `T` that a store adapter exposes to the
/// evaluator.
///
/// Any adapter offering these six primitives can host
/// [`evaluate`](crate::evaluator::evaluate). The reshaping primitives consume
/// and return the handle so they can be chained; [`project`](Self::project)
/// and [`count`](Self::count) are terminal.
///
/// A handle may defer all work to the terminal call, so the terminals are
/// where a store fault surfaces.
pub trait Queryable<T>: Sized {
    /// Keep only entities matching the predicate.
    fn filter(self, criteria: &Criteria<T>) -> Self;

    /// Collapse entities with equal keys, keeping the first occurrence.
    fn distinct_by<K, F>(self, key: F) -> Self
    where
        K: Eq + Hash,
        F: Fn(&T) -> K;

    /// Stable sort by a single ordering.
    fn order_by(self, order: &Order<T>) -> Self;

    /// Skip `skip` entities, then keep at most `take`.
    fn window(self, skip: usize, take: usize) -> Self;

    /// Materialize every entity through the selector.
    fn project<R>(self, selector: &Selector<T, R>) -> Result<Vec<R>>;

    /// Number of entities in the handle.
    fn count(self) -> Result<u64>;
}
