//! Service traits for store and product operations
//!
//! The request handlers only ever talk to these traits, so either front end
//! can run against the domain services or against a stub.

use crate::core::error::CatalogResult;
use crate::entities::{Product, ProductInput, Store, StoreInput};
use async_trait::async_trait;
use uuid::Uuid;

/// Store operations
///
/// Every mutating call commits exactly once. Identifiers equal to the nil
/// UUID are rejected as invalid arguments before storage is touched.
#[async_trait]
pub trait StoreService: Send + Sync {
    /// Get a store by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Store>;

    /// List the stores of a company (possibly empty)
    async fn get_by_company(&self, company_id: Uuid) -> CatalogResult<Vec<Store>>;

    /// List all stores
    async fn get_all(&self) -> CatalogResult<Vec<Store>>;

    /// Create a store under a freshly generated ID
    async fn create(&self, input: Option<StoreInput>) -> CatalogResult<Store>;

    /// Replace every mutable field of an existing store
    async fn update(&self, store: Option<Store>) -> CatalogResult<()>;

    /// Delete a store and its listings
    async fn delete(&self, id: Uuid) -> CatalogResult<()>;
}

/// Product operations
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Product>;

    /// List the products carried by a store (possibly empty)
    async fn get_by_store(&self, store_id: Uuid) -> CatalogResult<Vec<Product>>;

    /// List all products
    async fn get_all(&self) -> CatalogResult<Vec<Product>>;

    /// Create a product under a freshly generated ID
    async fn create(&self, input: Option<ProductInput>) -> CatalogResult<Product>;

    /// Rename an existing product; a blank name keeps the current one
    async fn update(&self, product: Option<Product>) -> CatalogResult<()>;

    /// Delete a product and its listings
    async fn delete(&self, id: Uuid) -> CatalogResult<()>;
}
