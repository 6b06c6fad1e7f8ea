//! Product domain service

use crate::core::{CatalogError, CatalogResult, Database, ProductService};
use crate::entities::{Product, ProductInput};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

const INVALID_PRODUCT_ID: &str = "The product ID provided is invalid.";
const INVALID_STORE_ID: &str = "The store ID provided is invalid.";
const INVALID_PRODUCT: &str = "The product provided is invalid.";

/// [`ProductService`] over a [`Database`]
#[derive(Clone)]
pub struct ProductDomainService {
    db: Arc<dyn Database>,
}

impl ProductDomainService {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }
}

fn require_id(id: Uuid, argument: &str, message: &str) -> CatalogResult<()> {
    if id.is_nil() {
        return Err(CatalogError::invalid_argument(argument, message));
    }
    Ok(())
}

#[async_trait]
impl ProductService for ProductDomainService {
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Product> {
        require_id(id, "productId", INVALID_PRODUCT_ID)?;

        let mut uow = self.db.begin().await?;
        uow.products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found::<Product>(id))
    }

    async fn get_by_store(&self, store_id: Uuid) -> CatalogResult<Vec<Product>> {
        require_id(store_id, "storeId", INVALID_STORE_ID)?;

        let mut uow = self.db.begin().await?;
        Ok(uow.products().get_by_store(store_id).await?)
    }

    async fn get_all(&self) -> CatalogResult<Vec<Product>> {
        let mut uow = self.db.begin().await?;
        Ok(uow.products().get_all().await?)
    }

    async fn create(&self, input: Option<ProductInput>) -> CatalogResult<Product> {
        let input =
            input.ok_or_else(|| CatalogError::invalid_argument("product", INVALID_PRODUCT))?;
        input
            .validate()
            .map_err(|e| CatalogError::invalid_fields("product", INVALID_PRODUCT, &e))?;

        let product = Product::from_input(Uuid::new_v4(), input);

        let mut uow = self.db.begin().await?;
        uow.products().add(product.clone());
        uow.commit().await?;

        tracing::debug!(product_id = ?product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, product: Option<Product>) -> CatalogResult<()> {
        let product =
            product.ok_or_else(|| CatalogError::invalid_argument("product", INVALID_PRODUCT))?;
        let id = product
            .id
            .filter(|id| !id.is_nil())
            .ok_or_else(|| CatalogError::invalid_argument("product", INVALID_PRODUCT))?;

        let mut uow = self.db.begin().await?;
        let mut existing = uow
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found::<Product>(id))?;

        existing.apply_update(product);
        uow.products().update(existing);
        uow.commit().await?;

        tracing::debug!(product_id = %id, "Updated product");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        require_id(id, "productId", INVALID_PRODUCT_ID)?;

        let mut uow = self.db.begin().await?;
        if uow.products().get_by_id(id).await?.is_none() {
            return Err(CatalogError::not_found::<Product>(id));
        }

        uow.products().remove(id);
        uow.commit().await?;

        tracing::debug!(product_id = %id, "Deleted product");
        Ok(())
    }
}
