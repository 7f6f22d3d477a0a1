//! Default configuration values - single source of truth

/// Default product seed file
pub const SEED_FILE: &str = "./fixtures/products.json";

/// Default page size for product listings
pub const DEFAULT_PAGE_SIZE: usize = catalog_query::pagination::DEFAULT_PAGE_SIZE;

/// Default cap on requested page sizes
pub const MAX_PAGE_SIZE: usize = catalog_query::pagination::MAX_PAGE_SIZE;

/// Whether edits are written back to the seed file by default
pub const WRITE_BACK: bool = true;
