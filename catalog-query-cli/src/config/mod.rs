//! Configuration for catalog-query-cli

pub mod defaults;
mod settings;

pub use settings::CatalogConfig;
