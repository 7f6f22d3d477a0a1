//! catalog-query - specifications, evaluation and pagination
//!
//! A query engine for listing endpoints. Callers describe what they want as
//! a [`Specification`]; a [`GenericRepository`] evaluates it against a
//! [`Store`] and [`paginate`] wraps the result in a [`Pagination`] envelope.
//!
//! # Features
//!
//! - **Declarative Specifications**: criteria, distinct, single-key ordering,
//!   paging and projection, built with fluent chaining
//! - **Fixed Evaluation Order**: criteria, distinct, order, paging, projection;
//!   counts use criteria and distinct only
//! - **Unit of Work**: staged add/update/remove committed atomically
//! - **Derive Macro**: `#[derive(Entity)]` for the identity accessor
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use catalog_query::catalog::{product_specification, Product, ProductSpecParams};
//! use catalog_query::{paginate, GenericRepository, MemoryStore, PageLimits};
//!
//! async fn first_page(store: Arc<MemoryStore<Product>>) -> catalog_query::Result<()> {
//!     let repo = GenericRepository::new(store);
//!     let limits = PageLimits::default();
//!     let params = ProductSpecParams::default().brands("Angular").sort("price-asc");
//!     let spec = product_specification(&params, &limits)?;
//!     let page = paginate(&repo, &spec, params.page_index, params.page_size(&limits)).await?;
//!     println!("{} of {} products", page.data.len(), page.count);
//!     Ok(())
//! }
//! ```

// Lets the derive macro's `catalog_query::` paths resolve inside this crate
extern crate self as catalog_query;

pub mod catalog;
pub mod clause;
pub mod error;
pub mod evaluator;
pub mod memory;
pub mod pagination;
pub mod repository;
pub mod specification;
pub mod traits;

// Re-export the derive macro
pub use catalog_query_derive::Entity;

// Re-export main types
pub use clause::{Criteria, Direction, DistinctKey, Order, Selector};
pub use error::{Error, Result};
pub use evaluator::{count_plan, evaluate, evaluate_count, plan, Plan, Stage, Terminal};
pub use memory::{MemoryStore, Rows};
pub use pagination::{paginate, PageLimits, Pagination};
pub use repository::GenericRepository;
pub use specification::Specification;
pub use traits::{Change, CommitResult, Entity, Queryable, Repository, Store};
