//! Store domain service

use crate::core::{CatalogError, CatalogResult, Database, StoreService};
use crate::entities::{Store, StoreInput};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

const INVALID_STORE_ID: &str = "The store ID provided is invalid.";
const INVALID_COMPANY_ID: &str = "The company ID provided is invalid.";
const INVALID_STORE: &str = "The store provided is invalid.";

/// [`StoreService`] over a [`Database`].
///
/// Every call opens its own unit of work; mutating calls commit it once.
#[derive(Clone)]
pub struct StoreDomainService {
    db: Arc<dyn Database>,
}

impl StoreDomainService {
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
impl StoreService for StoreDomainService {
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Store> {
        require_id(id, "storeId", INVALID_STORE_ID)?;

        let mut uow = self.db.begin().await?;
        uow.stores()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found::<Store>(id))
    }

    async fn get_by_company(&self, company_id: Uuid) -> CatalogResult<Vec<Store>> {
        require_id(company_id, "companyId", INVALID_COMPANY_ID)?;

        let mut uow = self.db.begin().await?;
        Ok(uow.stores().get_by_company(company_id).await?)
    }

    async fn get_all(&self) -> CatalogResult<Vec<Store>> {
        let mut uow = self.db.begin().await?;
        Ok(uow.stores().get_all().await?)
    }

    async fn create(&self, input: Option<StoreInput>) -> CatalogResult<Store> {
        let input = input.ok_or_else(|| CatalogError::invalid_argument("store", INVALID_STORE))?;
        input
            .validate()
            .map_err(|e| CatalogError::invalid_fields("store", INVALID_STORE, &e))?;

        let store = Store::from_input(Uuid::new_v4(), input);

        let mut uow = self.db.begin().await?;
        uow.stores().add(store.clone());
        uow.commit().await?;

        tracing::debug!(store_id = %store.id, "Created store");
        Ok(store)
    }

    async fn update(&self, store: Option<Store>) -> CatalogResult<()> {
        let store = store.ok_or_else(|| CatalogError::invalid_argument("store", INVALID_STORE))?;
        require_id(store.id, "store", INVALID_STORE)?;
        store
            .validate()
            .map_err(|e| CatalogError::invalid_fields("store", INVALID_STORE, &e))?;

        let mut uow = self.db.begin().await?;
        let mut existing = uow
            .stores()
            .get_by_id(store.id)
            .await?
            .ok_or_else(|| CatalogError::not_found::<Store>(store.id))?;

        existing.replace_with(store);
        let id = existing.id;
        uow.stores().update(existing);
        uow.commit().await?;

        tracing::debug!(store_id = %id, "Updated store");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        require_id(id, "storeId", INVALID_STORE_ID)?;

        let mut uow = self.db.begin().await?;
        if uow.stores().get_by_id(id).await?.is_none() {
            return Err(CatalogError::not_found::<Store>(id));
        }

        uow.stores().remove(id);
        uow.commit().await?;

        tracing::debug!(store_id = %id, "Deleted store");
        Ok(())
    }
}
