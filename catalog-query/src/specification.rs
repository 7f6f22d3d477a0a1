//! Declarative query descriptions

use std::fmt;
use std::hash::Hash;

use crate::clause::{Criteria, Direction, DistinctKey, Order, Selector};
use crate::error::{Error, Result};

/// A declarative description of a query over entities of type `T`,
/// producing rows of type `R`.
///
/// A specification is pure data: building one never touches a store. It is
/// evaluated by [`evaluate`](crate::evaluator::evaluate) inside
/// [`Repository::list`](crate::Repository::list) and
/// [`Repository::count`](crate::Repository::count).
///
/// Only `Specification<T, T>` can be built without a projector, so an
/// unprojected specification always yields whole entities. The row type `R`
/// needs no `Eq` or `Hash` unless [`distinct`](Self::distinct) is requested,
/// so projections to `f64` or plain DTOs list and page normally.
///
/// # Example
///
/// ```ignore
/// use catalog_query::Specification;
///
/// let spec = Specification::new()
///     .filter(|p: &Product| p.brand == "Angular")
///     .order_by_descending("price", |p: &Product| p.price)
///     .paging(0, 6)?;
///
/// let brands = Specification::select(|p: &Product| p.brand.clone()).distinct();
/// ```
pub struct Specification<T, R = T> {
    criteria: Option<Criteria<T>>,
    distinct: Option<Selector<T, DistinctKey>>,
    order: Option<Order<T>>,
    skip: usize,
    take: usize,
    paging_enabled: bool,
    projector: Selector<T, R>,
    projected: bool,
}

impl<T: Clone + 'static> Specification<T, T> {
    /// An unprojected specification matching every entity.
    pub fn new() -> Self {
        Self::with_projector(Selector::identity(), false)
    }
}

impl<T: Clone + 'static> Default for Specification<T, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static, R: 'static> Specification<T, R> {
    /// A specification projecting every surviving entity through `projector`.
    pub fn select<F>(projector: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        Self::with_projector(Selector::new(projector), true)
    }

    fn with_projector(projector: Selector<T, R>, projected: bool) -> Self {
        Self {
            criteria: None,
            distinct: None,
            order: None,
            skip: 0,
            take: 0,
            paging_enabled: false,
            projector,
            projected,
        }
    }

    /// Add a predicate. Multiple predicates are combined with logical AND.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let clause = Criteria::new(predicate);
        self.criteria = Some(match self.criteria.take() {
            Some(existing) => existing.and(clause),
            None => clause,
        });
        self
    }

    /// Order ascending by `key_fn`, replacing any previous ordering.
    pub fn order_by<K, F>(self, key: &'static str, key_fn: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.ordered(Order::new(key, Direction::Ascending, key_fn))
    }

    /// Order descending by `key_fn`, replacing any previous ordering.
    pub fn order_by_descending<K, F>(self, key: &'static str, key_fn: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.ordered(Order::new(key, Direction::Descending, key_fn))
    }

    /// Set the single active ordering.
    pub fn ordered(mut self, order: Order<T>) -> Self {
        self.order = Some(order);
        self
    }

    /// Enable paging with the given window.
    ///
    /// `take == 0` is a caller error, not "all rows".
    pub fn paging(mut self, skip: usize, take: usize) -> Result<Self> {
        if take == 0 {
            return Err(Error::InvalidSpecification(
                "paging requires take >= 1".into(),
            ));
        }
        self.skip = skip;
        self.take = take;
        self.paging_enabled = true;
        Ok(self)
    }

    /// Check the specification for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.paging_enabled && self.take == 0 {
            return Err(Error::InvalidSpecification(
                "paging requires take >= 1".into(),
            ));
        }
        if let Some(order) = &self.order {
            if order.key().trim().is_empty() {
                return Err(Error::InvalidSpecification(
                    "ordering requested without an order key".into(),
                ));
            }
        }
        Ok(())
    }
}

impl<T: 'static, R: Eq + Hash + 'static> Specification<T, R> {
    /// Collapse duplicate rows, compared by projected value.
    pub fn distinct(mut self) -> Self {
        let projector = self.projector.clone();
        self.distinct = Some(Selector::new(move |entity: &T| {
            DistinctKey::new(projector.apply(entity))
        }));
        self
    }
}

impl<T, R> Specification<T, R> {
    pub fn criteria(&self) -> Option<&Criteria<T>> {
        self.criteria.as_ref()
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct.is_some()
    }

    /// Key the distinct stage compares, derived from the projector.
    pub fn distinct_key(&self) -> Option<&Selector<T, DistinctKey>> {
        self.distinct.as_ref()
    }

    pub fn order(&self) -> Option<&Order<T>> {
        self.order.as_ref()
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn take(&self) -> usize {
        self.take
    }

    pub fn is_paging_enabled(&self) -> bool {
        self.paging_enabled
    }

    /// The projector. For unprojected specifications this is the identity.
    pub fn projector(&self) -> &Selector<T, R> {
        &self.projector
    }

    /// Whether a projector other than the identity was supplied.
    pub fn is_projected(&self) -> bool {
        self.projected
    }
}

impl<T, R> Clone for Specification<T, R> {
    fn clone(&self) -> Self {
        Self {
            criteria: self.criteria.clone(),
            distinct: self.distinct.clone(),
            order: self.order.clone(),
            skip: self.skip,
            take: self.take,
            paging_enabled: self.paging_enabled,
            projector: self.projector.clone(),
            projected: self.projected,
        }
    }
}

impl<T, R> fmt::Debug for Specification<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("criteria", &self.criteria.is_some())
            .field("distinct", &self.distinct.is_some())
            .field("order", &self.order)
            .field("skip", &self.skip)
            .field("take", &self.take)
            .field("paging_enabled", &self.paging_enabled)
            .field("projected", &self.projected)
            .finish()
    }
}
