//! Predicate, selector and ordering clauses
//!
//! Clauses are opaque function objects. The evaluator applies them to a
//! [`Queryable`](crate::Queryable) without looking inside.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A boolean predicate over `T`.
pub struct Criteria<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: 'static> Criteria<T> {
    /// Wrap a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Combine with another predicate using logical AND.
    pub fn and(self, other: Criteria<T>) -> Self {
        let (left, right) = (self.predicate, other.predicate);
        Self {
            predicate: Arc::new(move |entity| left(entity) && right(entity)),
        }
    }
}

impl<T> Criteria<T> {
    /// Test an entity against the predicate.
    pub fn matches(&self, entity: &T) -> bool {
        (self.predicate)(entity)
    }
}

impl<T> Clone for Criteria<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Criteria<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Criteria(..)")
    }
}

/// Element-wise projection from `T` to `R`.
pub struct Selector<T, R> {
    project: Arc<dyn Fn(&T) -> R + Send + Sync>,
}

impl<T: 'static, R: 'static> Selector<T, R> {
    /// Wrap a projection function.
    pub fn new<F>(project: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        Self {
            project: Arc::new(project),
        }
    }
}

impl<T: Clone + 'static> Selector<T, T> {
    /// The identity projection.
    pub fn identity() -> Self {
        Self::new(T::clone)
    }
}

impl<T, R> Selector<T, R> {
    /// Project one entity.
    pub fn apply(&self, entity: &T) -> R {
        (self.project)(entity)
    }
}

impl<T, R> Clone for Selector<T, R> {
    fn clone(&self) -> Self {
        Self {
            project: Arc::clone(&self.project),
        }
    }
}

impl<T, R> fmt::Debug for Selector<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Selector(..)")
    }
}

/// A type-erased equality and hash key.
///
/// Distinct compares projected values, but only specifications that ask for
/// distinct need those values to be hashable. The key is erased when
/// [`Specification::distinct`](crate::Specification::distinct) is called, so
/// the rest of the pipeline carries no `Eq + Hash` bound on the row type.
pub struct DistinctKey(Box<dyn ErasedKey>);

impl DistinctKey {
    pub fn new<K: Eq + Hash + 'static>(key: K) -> Self {
        Self(Box::new(key))
    }
}

impl PartialEq for DistinctKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_key(other.0.as_ref())
    }
}

impl Eq for DistinctKey {}

impl Hash for DistinctKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash_key(state);
    }
}

impl fmt::Debug for DistinctKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DistinctKey(..)")
    }
}

trait ErasedKey {
    fn as_any(&self) -> &dyn Any;
    fn eq_key(&self, other: &dyn ErasedKey) -> bool;
    fn hash_key(&self, state: &mut dyn Hasher);
}

impl<K: Eq + Hash + 'static> ErasedKey for K {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_key(&self, other: &dyn ErasedKey) -> bool {
        other
            .as_any()
            .downcast_ref::<K>()
            .is_some_and(|other| self == other)
    }

    fn hash_key(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => f.write_str("asc"),
            Direction::Descending => f.write_str("desc"),
        }
    }
}

/// A single named ordering key with a direction.
pub struct Order<T> {
    key: &'static str,
    direction: Direction,
    compare: Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
}

impl<T: 'static> Order<T> {
    /// Order by the value extracted by `key_fn`.
    ///
    /// `key` names the ordering for plans and logs.
    pub fn new<K, F>(key: &'static str, direction: Direction, key_fn: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            key,
            direction,
            compare: Arc::new(move |a, b| key_fn(a).cmp(&key_fn(b))),
        }
    }
}

impl<T> Order<T> {
    /// Name of the ordering key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Compare two entities, honouring the direction.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let ordering = (self.compare)(a, b);
        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

impl<T> Clone for Order<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            direction: self.direction,
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T> fmt::Debug for Order<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("key", &self.key)
            .field("direction", &self.direction)
            .finish()
    }
}
