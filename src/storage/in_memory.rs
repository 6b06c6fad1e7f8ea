//! In-memory implementation of [`Database`] for tests and development
//!
//! Tables are kept in insertion order behind a single `RwLock`. Listings live
//! in their own table keyed by `(product_id, store_id)` and are joined onto
//! stores and products on read, the same way the relational backend does.

use crate::core::{
    ChangeSet, Database, ProductRepository, StagedChange, StorageError, StorageResult,
    StoreRepository, UnitOfWork,
};
use crate::entities::{Product, ProductStore, Store};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

type ListingKey = (Uuid, Uuid);

#[derive(Debug, Default, Clone)]
struct Tables {
    stores: IndexMap<Uuid, Store>,
    products: IndexMap<Uuid, Product>,
    listings: IndexMap<ListingKey, ProductStore>,
}

impl Tables {
    fn store_with_listings(&self, store: &Store) -> Store {
        let mut store = store.clone();
        store.product_store = self
            .listings
            .values()
            .filter(|l| l.store_id == store.id)
            .cloned()
            .collect();
        store
    }

    fn product_with_listings(&self, id: Uuid, product: &Product) -> Product {
        let mut product = product.clone();
        product.product_store = self
            .listings
            .values()
            .filter(|l| l.product_id == id)
            .cloned()
            .collect();
        product
    }

    /// Apply a unit of work's changes: product upserts, store upserts,
    /// store removals, then product removals.
    fn apply(
        &mut self,
        stores: ChangeSet<Store>,
        products: ChangeSet<Product>,
    ) -> StorageResult<()> {
        let (product_upserts, product_removals) = products.partition();
        let (store_upserts, store_removals) = stores.partition();

        for change in product_upserts {
            match change {
                StagedChange::Add(product) => self.insert_product(product)?,
                StagedChange::Update(product) => self.rename_product(product)?,
                StagedChange::Remove(_) => {}
            }
        }

        for change in store_upserts {
            match change {
                StagedChange::Add(store) => self.insert_store(store)?,
                StagedChange::Update(store) => self.replace_store(store)?,
                StagedChange::Remove(_) => {}
            }
        }

        for id in store_removals {
            if self.stores.shift_remove(&id).is_none() {
                return Err(missing("store", id));
            }
            self.listings.retain(|(_, store_id), _| *store_id != id);
        }

        for id in product_removals {
            if self.products.shift_remove(&id).is_none() {
                return Err(missing("product", id));
            }
            self.listings.retain(|(product_id, _), _| *product_id != id);
        }

        Ok(())
    }

    fn insert_product(&mut self, mut product: Product) -> StorageResult<()> {
        let id = product_key(&product)?;
        if self.products.contains_key(&id) {
            return Err(StorageError::integrity(format!("duplicate product id '{}'", id)));
        }
        product.product_store.clear();
        self.products.insert(id, product);
        Ok(())
    }

    fn rename_product(&mut self, product: Product) -> StorageResult<()> {
        let id = product_key(&product)?;
        let existing = self
            .products
            .get_mut(&id)
            .ok_or_else(|| missing("product", id))?;
        existing.name = product.name;
        Ok(())
    }

    fn insert_store(&mut self, mut store: Store) -> StorageResult<()> {
        if store.id.is_nil() {
            return Err(StorageError::integrity("store id must not be nil"));
        }
        if self.stores.contains_key(&store.id) {
            return Err(StorageError::integrity(format!("duplicate store id '{}'", store.id)));
        }
        let listings = std::mem::take(&mut store.product_store);
        let id = store.id;
        self.stores.insert(id, store);
        self.insert_listings(id, listings)
    }

    fn replace_store(&mut self, mut store: Store) -> StorageResult<()> {
        let id = store.id;
        let listings = std::mem::take(&mut store.product_store);
        let existing = self
            .stores
            .get_mut(&id)
            .ok_or_else(|| missing("store", id))?;
        *existing = store;

        self.listings.retain(|(_, store_id), _| *store_id != id);
        self.insert_listings(id, listings)
    }

    fn insert_listings(
        &mut self,
        store_id: Uuid,
        listings: Vec<ProductStore>,
    ) -> StorageResult<()> {
        for mut listing in listings {
            listing.store_id = store_id;
            if !self.products.contains_key(&listing.product_id) {
                return Err(StorageError::integrity(format!(
                    "product '{}' referenced by store '{}' does not exist",
                    listing.product_id, store_id
                )));
            }
            let key = listing.key();
            if self.listings.contains_key(&key) {
                return Err(StorageError::integrity(format!(
                    "product '{}' is already listed in store '{}'",
                    listing.product_id, store_id
                )));
            }
            self.listings.insert(key, listing);
        }
        Ok(())
    }
}

fn missing(entity: &str, id: Uuid) -> StorageError {
    StorageError::integrity(format!("{} '{}' does not exist", entity, id))
}

fn product_key(product: &Product) -> StorageResult<Uuid> {
    product
        .id
        .filter(|id| !id.is_nil())
        .ok_or_else(|| StorageError::integrity("product id must be set"))
}

fn read(tables: &RwLock<Tables>) -> StorageResult<RwLockReadGuard<'_, Tables>> {
    tables.read().map_err(|e| StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: format!("Failed to acquire read lock: {}", e),
    })
}

fn write(tables: &RwLock<Tables>) -> StorageResult<RwLockWriteGuard<'_, Tables>> {
    tables.write().map_err(|e| StorageError::TransactionError {
        message: format!("Failed to acquire write lock: {}", e),
    })
}

// =============================================================================
// Database
// =============================================================================

/// In-memory database
///
/// Cloning is cheap and every clone shares the same tables.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    /// Create a new, empty in-memory database
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn begin(&self) -> StorageResult<Box<dyn UnitOfWork>> {
        Ok(Box::new(InMemoryUnitOfWork {
            stores: InMemoryStores {
                tables: self.tables.clone(),
                changes: ChangeSet::new(),
            },
            products: InMemoryProducts {
                tables: self.tables.clone(),
                changes: ChangeSet::new(),
            },
        }))
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}

/// Unit of work over the in-memory tables
pub struct InMemoryUnitOfWork {
    stores: InMemoryStores,
    products: InMemoryProducts,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn stores(&mut self) -> &mut dyn StoreRepository {
        &mut self.stores
    }

    fn products(&mut self) -> &mut dyn ProductRepository {
        &mut self.products
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        let InMemoryUnitOfWork { stores, products } = *self;
        if stores.changes.is_empty() && products.changes.is_empty() {
            return Ok(());
        }

        let mut guard = write(&stores.tables)?;
        let mut next = guard.clone();
        if let Err(e) = next.apply(stores.changes, products.changes) {
            tracing::warn!(backend = BACKEND, "Commit rejected: {}", e);
            return Err(e);
        }
        *guard = next;
        Ok(())
    }
}

// =============================================================================
// Repositories
// =============================================================================

struct InMemoryStores {
    tables: Arc<RwLock<Tables>>,
    changes: ChangeSet<Store>,
}

#[async_trait]
impl StoreRepository for InMemoryStores {
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Store>> {
        let tables = read(&self.tables)?;
        Ok(tables.stores.get(&id).map(|s| tables.store_with_listings(s)))
    }

    async fn get_by_company(&self, company_id: Uuid) -> StorageResult<Vec<Store>> {
        let tables = read(&self.tables)?;
        Ok(tables
            .stores
            .values()
            .filter(|s| s.company_id == company_id)
            .map(|s| tables.store_with_listings(s))
            .collect())
    }

    async fn get_all(&self) -> StorageResult<Vec<Store>> {
        let tables = read(&self.tables)?;
        Ok(tables
            .stores
            .values()
            .map(|s| tables.store_with_listings(s))
            .collect())
    }

    fn add(&mut self, store: Store) {
        self.changes.add(store);
    }

    fn update(&mut self, store: Store) {
        self.changes.update(store);
    }

    fn remove(&mut self, id: Uuid) {
        self.changes.remove(id);
    }
}

struct InMemoryProducts {
    tables: Arc<RwLock<Tables>>,
    changes: ChangeSet<Product>,
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Product>> {
        let tables = read(&self.tables)?;
        Ok(tables
            .products
            .get(&id)
            .map(|p| tables.product_with_listings(id, p)))
    }

    async fn get_by_store(&self, store_id: Uuid) -> StorageResult<Vec<Product>> {
        let tables = read(&self.tables)?;
        Ok(tables
            .products
            .iter()
            .filter(|(id, _)| tables.listings.contains_key(&(**id, store_id)))
            .map(|(id, p)| tables.product_with_listings(*id, p))
            .collect())
    }

    async fn get_all(&self) -> StorageResult<Vec<Product>> {
        let tables = read(&self.tables)?;
        Ok(tables
            .products
            .iter()
            .map(|(id, p)| tables.product_with_listings(*id, p))
            .collect())
    }

    fn add(&mut self, product: Product) {
        self.changes.add(product);
    }

    fn update(&mut self, product: Product) {
        self.changes.update(product);
    }

    fn remove(&mut self, id: Uuid) {
        self.changes.remove(id);
    }
}
