//! Generic repository over any [`Store`]

use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::evaluator::{evaluate, evaluate_count};
use crate::specification::Specification;
use crate::traits::{Change, Entity, Repository, Store};

/// A repository for entities of type `T` backed by store `S`.
///
/// The repository owns a unit of work: [`add`](Repository::add),
/// [`update`](Repository::update) and [`remove`](Repository::remove) only
/// stage changes, and [`save_all`](Repository::save_all) hands the whole
/// batch to the store in one commit.
///
/// Creating a repository is cheap. Share the store (`Arc<S>` or `&S`) and
/// create one repository per request.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(MemoryStore::<Product>::new());
/// let mut repo = GenericRepository::new(store.clone());
///
/// repo.add(product);
/// assert!(repo.save_all().await?);
///
/// let found = repo.get_by_id(&product_id).await?;
/// ```
pub struct GenericRepository<T: Entity, S> {
    store: S,
    pending: Vec<Change<T>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, S: Store<T>> GenericRepository<T, S> {
    /// Create a repository with an empty unit of work.
    pub fn new(store: S) -> Self {
        Self {
            store,
            pending: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Changes staged since the last [`save_all`](Repository::save_all).
    pub fn pending(&self) -> &[Change<T>] {
        &self.pending
    }

    /// Drop every staged change without touching the store.
    pub fn discard_changes(&mut self) {
        self.pending.clear();
    }

    fn stage(&mut self, change: Change<T>) {
        debug!(entity = T::NAME, kind = change.kind(), id = ?change.entity().id(), "staged change");
        self.pending.push(change);
    }
}

#[async_trait]
impl<T: Entity, S: Store<T>> Repository<T> for GenericRepository<T, S> {
    async fn get_by_id(&self, id: &T::Id) -> Result<Option<T>> {
        let found = self.store.find(id).await?;
        if found.is_none() {
            debug!(entity = T::NAME, ?id, "not found");
        }
        Ok(found)
    }

    async fn list<R>(&self, spec: &Specification<T, R>) -> Result<Vec<R>>
    where
        R: Send + 'static,
    {
        let source = self.store.source().await?;
        evaluate(source, spec)
    }

    async fn count<R>(&self, spec: &Specification<T, R>) -> Result<u64>
    where
        R: Send + 'static,
    {
        let source = self.store.source().await?;
        evaluate_count(source, spec)
    }

    async fn exists(&self, id: &T::Id) -> Result<bool> {
        self.store.contains(id).await
    }

    fn add(&mut self, entity: T) {
        self.stage(Change::Add(entity));
    }

    fn update(&mut self, entity: T) {
        self.stage(Change::Update(entity));
    }

    fn remove(&mut self, entity: T) {
        self.stage(Change::Remove(entity));
    }

    async fn save_all(&mut self) -> Result<bool> {
        if self.pending.is_empty() {
            debug!(entity = T::NAME, "nothing to save");
            return Ok(false);
        }

        // The unit of work is spent whether or not the commit succeeds
        let changes = std::mem::take(&mut self.pending);
        let staged = changes.len();
        match self.store.commit(changes).await {
            Ok(result) => {
                debug!(
                    entity = T::NAME,
                    staged,
                    rows_affected = result.rows_affected,
                    "saved changes"
                );
                Ok(result.rows_affected > 0)
            }
            Err(e) => {
                warn!(entity = T::NAME, staged, error = %e, "commit rejected");
                Err(e)
            }
        }
    }
}
