//! In-memory store

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::{Change, CommitResult, Entity, Store};

use super::rows::Rows;

/// An insertion-ordered in-memory store.
///
/// Reads share a read lock. A commit takes the write lock once, applies the
/// whole unit of work to a working copy and swaps it in only when every
/// change applied cleanly.
///
/// Wrap it in an `Arc` to share one store between many repositories.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use catalog_query::{GenericRepository, MemoryStore};
///
/// let store = Arc::new(MemoryStore::from_json(include_str!("products.json"))?);
/// let repo = GenericRepository::new(store.clone());
/// ```
pub struct MemoryStore<T: Entity> {
    rows: RwLock<Vec<T>>,
    available: AtomicBool,
}

impl<T: Entity> MemoryStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Create a store seeded with rows, rejecting duplicate identities.
    pub fn with_rows(rows: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut seeded: Vec<T> = Vec::new();
        for row in rows {
            apply(&mut seeded, Change::Add(row))?;
        }
        Ok(Self {
            rows: RwLock::new(seeded),
            available: AtomicBool::new(true),
        })
    }

    /// Create a store seeded from a JSON array.
    pub fn from_json(json: &str) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        let rows: Vec<T> = serde_json::from_str(json)?;
        Self::with_rows(rows)
    }

    /// Simulate losing (or regaining) the connection to the store.
    ///
    /// While unavailable, every operation fails with
    /// [`Error::StoreUnavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the store holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::StoreUnavailable(format!(
                "{} store is not reachable",
                T::NAME
            )))
        }
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn position<T: Entity>(rows: &[T], id: &T::Id) -> Option<usize> {
    rows.iter().position(|row| row.id() == *id)
}

fn apply<T: Entity>(rows: &mut Vec<T>, change: Change<T>) -> Result<()> {
    match change {
        Change::Add(entity) => {
            let id = entity.id();
            if position(rows, &id).is_some() {
                return Err(Error::Constraint(format!(
                    "duplicate key {:?} in {}",
                    id,
                    T::NAME
                )));
            }
            rows.push(entity);
        }
        Change::Update(entity) => {
            let id = entity.id();
            let index = position(rows, &id).ok_or_else(|| {
                Error::Constraint(format!("no row with key {:?} in {} to update", id, T::NAME))
            })?;
            rows[index] = entity;
        }
        Change::Remove(entity) => {
            let id = entity.id();
            let index = position(rows, &id).ok_or_else(|| {
                Error::Constraint(format!("no row with key {:?} in {} to remove", id, T::NAME))
            })?;
            rows.remove(index);
        }
    }
    Ok(())
}

#[async_trait]
impl<T: Entity> Store<T> for MemoryStore<T> {
    type Source = Rows<T>;

    async fn source(&self) -> Result<Self::Source> {
        self.ensure_available()?;
        let rows = self.rows.read().await;
        Ok(Rows::new(rows.clone()))
    }

    async fn find(&self, id: &T::Id) -> Result<Option<T>> {
        self.ensure_available()?;
        let rows = self.rows.read().await;
        Ok(position(&rows, id).map(|index| rows[index].clone()))
    }

    async fn contains(&self, id: &T::Id) -> Result<bool> {
        self.ensure_available()?;
        let rows = self.rows.read().await;
        Ok(position(&rows, id).is_some())
    }

    async fn commit(&self, changes: Vec<Change<T>>) -> Result<CommitResult> {
        self.ensure_available()?;
        if changes.is_empty() {
            return Ok(CommitResult::default());
        }

        let mut rows = self.rows.write().await;
        let mut working = rows.clone();
        let mut rows_affected = 0;
        for change in changes {
            apply(&mut working, change)?;
            rows_affected += 1;
        }
        *rows = working;

        debug!(entity = T::NAME, rows_affected, "commit applied");
        Ok(CommitResult { rows_affected })
    }
}
