//! Error types for catalog-query-cli

use thiserror::Error;

/// Result type alias for catalog-query-cli operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while running catalog commands
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Product {0} not found")]
    NotFound(i32),

    #[error("Rejected: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Catalog(#[from] catalog_query::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Catalog(catalog_query::Error::Seed(err))
    }
}
