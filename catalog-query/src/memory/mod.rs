//! In-memory store implementation for catalog-query

mod rows;
mod store;

pub use rows::Rows;
pub use store::MemoryStore;
