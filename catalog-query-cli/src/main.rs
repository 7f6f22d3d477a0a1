//! CLI entry point for catalog-query

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_query::catalog::{Product, ProductSpecParams};
use catalog_query_cli::{Catalog, CatalogConfig};

#[derive(Parser)]
#[command(name = "catalog-query")]
#[command(about = "Run catalog listings and edits against a JSON product seed file")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the product seed file (overrides config)
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Do not write edits back to the seed file
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products (filtered, sorted, paged)
    Products(ListArgs),
    /// Show one product
    Product { id: i32 },
    /// List distinct brands
    Brands,
    /// List distinct product types
    Types,
    /// Add a product from a JSON file
    Add { file: PathBuf },
    /// Replace a product from a JSON file
    Update { id: i32, file: PathBuf },
    /// Delete a product
    Remove { id: i32 },
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive search on the product name
    #[arg(long)]
    search: Option<String>,

    /// Comma-separated brands to include
    #[arg(long)]
    brands: Option<String>,

    /// Comma-separated product types to include
    #[arg(long)]
    types: Option<String>,

    /// Sort mode: name-asc, price-asc, price-desc
    #[arg(long)]
    sort: Option<String>,

    /// Page to show (0-based)
    #[arg(long, default_value_t = 0)]
    page_index: usize,

    /// Products per page
    #[arg(long)]
    page_size: Option<usize>,
}

impl ListArgs {
    fn into_params(self) -> ProductSpecParams {
        let mut params = ProductSpecParams {
            page_index: self.page_index,
            page_size: self.page_size,
            sort: self.sort,
            search: self.search,
            ..Default::default()
        };
        if let Some(brands) = &self.brands {
            params = params.brands(brands);
        }
        if let Some(types) = &self.types {
            params = params.types(types);
        }
        params
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CatalogConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(seed) = cli.seed {
        config.seed_file = seed;
    }
    if cli.dry_run {
        config.write_back = false;
    }

    // Validate configuration
    config.validate()?;

    let catalog = Catalog::load(&config.seed_file, config.limits()).await?;

    let edited = match cli.command {
        Commands::Products(args) => {
            let page = catalog.products(&args.into_params()).await?;
            print_json(&page)?;
            false
        }
        Commands::Product { id } => {
            print_json(&catalog.product(id).await?)?;
            false
        }
        Commands::Brands => {
            print_json(&catalog.brands().await?)?;
            false
        }
        Commands::Types => {
            print_json(&catalog.types().await?)?;
            false
        }
        Commands::Add { file } => {
            let product = read_product(&file).await?;
            print_json(&catalog.create(product).await?)?;
            true
        }
        Commands::Update { id, file } => {
            let product = read_product(&file).await?;
            catalog.update(id, product).await?;
            info!(id, "product updated");
            true
        }
        Commands::Remove { id } => {
            catalog.delete(id).await?;
            info!(id, "product removed");
            true
        }
    };

    if edited {
        if config.write_back {
            catalog.save_to(&config.seed_file).await?;
        } else {
            info!("Dry run - seed file left unchanged");
        }
    }

    Ok(())
}

async fn read_product(path: &Path) -> Result<Product> {
    let json = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
