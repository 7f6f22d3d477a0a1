//! Error types for catalog-query

use thiserror::Error;

/// Result type alias for catalog-query operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running a specification.
///
/// A missing entity is not an error: lookups return `Ok(None)` and a commit
/// that changes nothing returns `Ok(false)`.
#[derive(Error, Debug)]
pub enum Error {
    /// The specification is internally inconsistent and was rejected before
    /// reaching the evaluator
    #[error("Invalid specification: {0}")]
    InvalidSpecification(String),

    /// The backing store could not be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The backing store refused a change (duplicate or missing key)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Seed data could not be decoded
    #[error("Failed to decode seed data: {0}")]
    Seed(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error originated in the backing store.
    ///
    /// Store faults must reach the caller unmodified.
    pub fn is_store_fault(&self) -> bool {
        matches!(self, Error::StoreUnavailable(_) | Error::Constraint(_))
    }
}
