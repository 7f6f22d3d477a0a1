//! Core traits for catalog-query

mod entity;
mod queryable;
mod repository;
mod store;

pub use entity::Entity;
pub use queryable::Queryable;
pub use repository::Repository;
pub use store::{Change, CommitResult, Store};
