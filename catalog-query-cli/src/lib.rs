//! catalog-query-cli: run catalog listings and edits from the command line
//!
//! Products are loaded from a JSON seed file into an in-memory store.
//! Listings go through the same specifications and pagination envelope a
//! service endpoint would use; edits go through a repository unit of work
//! and can be written back to the seed file.
//!
//! # CLI Usage
//!
//! ```bash
//! catalog-query --seed fixtures/products.json products --brands Angular --sort price-desc
//! catalog-query product 3
//! catalog-query brands
//! catalog-query --config catalog-query.toml remove 7
//! ```

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use error::{CliError, Result};
