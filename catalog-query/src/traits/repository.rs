//! Repository trait for specification-driven access

use crate::error::Result;
use crate::specification::Specification;
use crate::traits::Entity;
use async_trait::async_trait;

/// Access point for one entity type.
///
/// Reads take `&self` and may run concurrently. Mutations are staged with
/// `&mut self` and only reach the store on [`save_all`](Self::save_all), so a
/// repository instance is scoped to one unit of work.
///
/// # Example
///
/// ```ignore
/// let mut repo = GenericRepository::new(store.clone());
/// repo.add(product);
/// if !repo.save_all().await? {
///     // nothing was written
/// }
/// ```
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Fetch by identity. A missing entity is `Ok(None)`.
    async fn get_by_id(&self, id: &T::Id) -> Result<Option<T>>;

    /// Evaluate the full specification: criteria, distinct, order, paging,
    /// projection.
    async fn list<R>(&self, spec: &Specification<T, R>) -> Result<Vec<R>>
    where
        R: Send + 'static;

    /// Count the rows matching the specification's criteria, after distinct.
    /// Ordering, paging and projection are ignored.
    async fn count<R>(&self, spec: &Specification<T, R>) -> Result<u64>
    where
        R: Send + 'static;

    /// Check presence by identity.
    async fn exists(&self, id: &T::Id) -> Result<bool>;

    /// Stage an insert.
    fn add(&mut self, entity: T);

    /// Stage an update.
    fn update(&mut self, entity: T);

    /// Stage a delete.
    fn remove(&mut self, entity: T);

    /// Commit every staged change as one unit.
    ///
    /// Returns `Ok(true)` if at least one row was affected and `Ok(false)`
    /// if nothing changed. Store faults are returned as errors.
    async fn save_all(&mut self) -> Result<bool>;
}
