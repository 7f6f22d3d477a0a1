//! Configuration settings for catalog-query-cli

use catalog_query::PageLimits;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{CliError, Result};

/// Main configuration struct for the catalog tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the JSON product seed file
    #[serde(default = "default_seed_file")]
    pub seed_file: PathBuf,

    /// Page size used when a listing does not ask for one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Largest page size a listing may request
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Write the store back to the seed file after a successful edit
    #[serde(default = "default_write_back")]
    pub write_back: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_seed_file() -> PathBuf {
    PathBuf::from(defaults::SEED_FILE)
}
fn default_page_size() -> usize {
    defaults::DEFAULT_PAGE_SIZE
}
fn default_max_page_size() -> usize {
    defaults::MAX_PAGE_SIZE
}
fn default_write_back() -> bool {
    defaults::WRITE_BACK
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_file: default_seed_file(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            write_back: default_write_back(),
            log_level: None,
        }
    }
}

impl CatalogConfig {
    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("catalog-query").required(false));
        }

        // Override with environment variables (CATALOG_*)
        builder = builder.add_source(Environment::with_prefix("CATALOG").try_parsing(true));

        let config: CatalogConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Paging limits for listings
    pub fn limits(&self) -> PageLimits {
        PageLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.seed_file.as_os_str().is_empty() {
            return Err(CliError::ValidationError("seed_file is required".into()));
        }

        if !self.seed_file.exists() {
            return Err(CliError::ValidationError(format!(
                "Seed file not found: {}",
                self.seed_file.display()
            )));
        }

        if self.max_page_size == 0 {
            return Err(CliError::ValidationError(
                "max_page_size must be at least 1".into(),
            ));
        }

        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(CliError::ValidationError(format!(
                "default_page_size must be between 1 and max_page_size ({})",
                self.max_page_size
            )));
        }

        Ok(())
    }
}
