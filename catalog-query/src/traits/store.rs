//! Store trait for backing data stores

use crate::error::Result;
use crate::traits::{Entity, Queryable};
use async_trait::async_trait;
use std::sync::Arc;

/// A staged mutation in a unit of work.
#[derive(Debug, Clone, PartialEq)]
pub enum Change<T> {
    /// Insert a new entity
    Add(T),
    /// Replace the entity with the same identity
    Update(T),
    /// Delete the entity with the same identity
    Remove(T),
}

impl<T> Change<T> {
    /// The entity carried by this change.
    pub fn entity(&self) -> &T {
        match self {
            Change::Add(entity) | Change::Update(entity) | Change::Remove(entity) => entity,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Change::Add(_) => "add",
            Change::Update(_) => "update",
            Change::Remove(_) => "remove",
        }
    }
}

/// Result of a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommitResult {
    /// Number of rows affected by the commit
    pub rows_affected: u64,
}

/// Trait for backing data stores.
///
/// This trait abstracts over storage engines so the same repository and
/// specification code works against any of them. Reads may run
/// concurrently. [`commit`](Self::commit) applies a whole unit of work or
/// nothing.
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    /// Collection handle the evaluator runs against.
    type Source: Queryable<T> + Send;

    /// A handle over the whole, unfiltered collection.
    async fn source(&self) -> Result<Self::Source>;

    /// Fetch a single entity by identity.
    async fn find(&self, id: &T::Id) -> Result<Option<T>>;

    /// Check whether an entity with this identity exists.
    async fn contains(&self, id: &T::Id) -> Result<bool>;

    /// Apply all changes atomically.
    ///
    /// Either every change is applied, or the store is left untouched and an
    /// error is returned.
    async fn commit(&self, changes: Vec<Change<T>>) -> Result<CommitResult>;
}

// Implement Store for shared handles so one store can back many repositories
#[async_trait]
impl<T: Entity, S: Store<T>> Store<T> for Arc<S> {
    type Source = S::Source;

    async fn source(&self) -> Result<Self::Source> {
        (**self).source().await
    }

    async fn find(&self, id: &T::Id) -> Result<Option<T>> {
        (**self).find(id).await
    }

    async fn contains(&self, id: &T::Id) -> Result<bool> {
        (**self).contains(id).await
    }

    async fn commit(&self, changes: Vec<Change<T>>) -> Result<CommitResult> {
        (**self).commit(changes).await
    }
}

// Implement Store for references
#[async_trait]
impl<'a, T: Entity, S: Store<T>> Store<T> for &'a S {
    type Source = S::Source;

    async fn source(&self) -> Result<Self::Source> {
        (**self).source().await
    }

    async fn find(&self, id: &T::Id) -> Result<Option<T>> {
        (**self).find(id).await
    }

    async fn contains(&self, id: &T::Id) -> Result<bool> {
        (**self).contains(id).await
    }

    async fn commit(&self, changes: Vec<Change<T>>) -> Result<CommitResult> {
        (**self).commit(changes).await
    }
}
