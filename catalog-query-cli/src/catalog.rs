//! Catalog operations backed by a JSON seed file

use std::path::Path;
use std::sync::Arc;

use catalog_query::catalog::{
    brand_list, product_specification, type_list, Product, ProductSpecParams,
};
use catalog_query::{
    paginate, GenericRepository, MemoryStore, PageLimits, Pagination, Repository, Specification,
};
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// The product catalog loaded into an in-memory store.
pub struct Catalog {
    store: Arc<MemoryStore<Product>>,
    limits: PageLimits,
}

impl Catalog {
    /// Create a catalog over an existing store.
    pub fn new(store: Arc<MemoryStore<Product>>, limits: PageLimits) -> Self {
        Self { store, limits }
    }

    /// Load the catalog from a JSON array of products.
    pub async fn load(seed_file: &Path, limits: PageLimits) -> Result<Self> {
        let json = tokio::fs::read_to_string(seed_file).await?;
        let store = MemoryStore::from_json(&json)?;
        info!(
            seed_file = %seed_file.display(),
            products = store.len().await,
            "loaded catalog"
        );
        Ok(Self::new(Arc::new(store), limits))
    }

    /// A fresh repository (and unit of work) over the shared store.
    fn repository(&self) -> GenericRepository<Product, Arc<MemoryStore<Product>>> {
        GenericRepository::new(Arc::clone(&self.store))
    }

    /// Filtered, sorted, paged product listing.
    pub async fn products(&self, params: &ProductSpecParams) -> Result<Pagination<Product>> {
        let spec = product_specification(params, &self.limits)?;
        let page = paginate(
            &self.repository(),
            &spec,
            params.page_index,
            params.page_size(&self.limits),
        )
        .await?;
        debug!(count = page.count, returned = page.data.len(), "listed products");
        Ok(page)
    }

    /// A single product by id.
    pub async fn product(&self, id: i32) -> Result<Product> {
        self.repository()
            .get_by_id(&id)
            .await?
            .ok_or(CliError::NotFound(id))
    }

    /// Every distinct brand.
    pub async fn brands(&self) -> Result<Vec<String>> {
        Ok(self.repository().list(&brand_list()).await?)
    }

    /// Every distinct product type.
    pub async fn types(&self) -> Result<Vec<String>> {
        Ok(self.repository().list(&type_list()).await?)
    }

    /// Add a new product.
    pub async fn create(&self, product: Product) -> Result<Product> {
        let mut repo = self.repository();
        repo.add(product.clone());
        if repo.save_all().await? {
            Ok(product)
        } else {
            Err(CliError::BadRequest("Problem creating the product".into()))
        }
    }

    /// Replace the product with the given id.
    pub async fn update(&self, id: i32, product: Product) -> Result<()> {
        let mut repo = self.repository();
        if product.id != id || !repo.exists(&id).await? {
            return Err(CliError::BadRequest("Cannot update this product".into()));
        }
        repo.update(product);
        if repo.save_all().await? {
            Ok(())
        } else {
            Err(CliError::BadRequest("Problem updating the product".into()))
        }
    }

    /// Delete the product with the given id.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let mut repo = self.repository();
        let product = repo.get_by_id(&id).await?.ok_or(CliError::NotFound(id))?;
        repo.remove(product);
        if repo.save_all().await? {
            Ok(())
        } else {
            Err(CliError::BadRequest("Problem deleting the product".into()))
        }
    }

    /// Write every product back to a JSON file, in store order.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let all = self.repository().list(&Specification::new()).await?;
        let json = serde_json::to_string_pretty(&all)?;
        tokio::fs::write(path, json).await?;
        info!(path = %path.display(), products = all.len(), "wrote catalog");
        Ok(())
    }
}
