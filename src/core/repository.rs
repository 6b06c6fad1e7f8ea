//! Persistence gateway traits
//!
//! A [`Database`] hands out one [`UnitOfWork`] per service call. Reads go
//! straight to the backend; `add`/`update`/`remove` only stage changes,
//! which reach storage when the unit of work is committed. Dropping a unit
//! of work without committing discards everything it staged.

use crate::core::error::StorageResult;
use crate::entities::{Product, Store};
use async_trait::async_trait;
use uuid::Uuid;

/// Store-side gateway of a unit of work
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Get a store (with its listings) by ID
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Store>>;

    /// Every store owned by a company
    async fn get_by_company(&self, company_id: Uuid) -> StorageResult<Vec<Store>>;

    /// Every store
    async fn get_all(&self) -> StorageResult<Vec<Store>>;

    /// Stage a new store
    fn add(&mut self, store: Store);

    /// Stage a full replacement of an existing store, listings included
    fn update(&mut self, store: Store);

    /// Stage the removal of a store and its listings
    fn remove(&mut self, id: Uuid);
}

/// Product-side gateway of a unit of work
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get a product (with its listings) by ID
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Product>>;

    /// Every product listed in a store
    async fn get_by_store(&self, store_id: Uuid) -> StorageResult<Vec<Product>>;

    /// Every product
    async fn get_all(&self) -> StorageResult<Vec<Product>>;

    /// Stage a new product
    fn add(&mut self, product: Product);

    /// Stage a name change of an existing product; listings are left alone
    fn update(&mut self, product: Product);

    /// Stage the removal of a product and its listings
    fn remove(&mut self, id: Uuid);
}

/// Scoped persistence session of a single service call
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn stores(&mut self) -> &mut dyn StoreRepository;

    fn products(&mut self) -> &mut dyn ProductRepository;

    /// Apply every staged change atomically.
    ///
    /// Either all staged changes become visible or none do.
    async fn commit(self: Box<Self>) -> StorageResult<()>;
}

/// Pooled database handle shared by the services
#[async_trait]
pub trait Database: Send + Sync {
    /// Open a new unit of work
    async fn begin(&self) -> StorageResult<Box<dyn UnitOfWork>>;

    /// Backend name used in logs and error messages
    fn backend_name(&self) -> &'static str;
}

// =============================================================================
// Change tracking shared by the backends
// =============================================================================

/// A change staged in a unit of work
#[derive(Debug, Clone, PartialEq)]
pub enum StagedChange<T> {
    Add(T),
    Update(T),
    Remove(Uuid),
}

/// Ordered list of staged changes for one entity type
#[derive(Debug, Clone)]
pub struct ChangeSet<T> {
    changes: Vec<StagedChange<T>>,
}

impl<T> ChangeSet<T> {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    pub fn add(&mut self, entity: T) {
        self.changes.push(StagedChange::Add(entity));
    }

    pub fn update(&mut self, entity: T) {
        self.changes.push(StagedChange::Update(entity));
    }

    pub fn remove(&mut self, id: Uuid) {
        self.changes.push(StagedChange::Remove(id));
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Split into (adds and updates in staging order, removals)
    pub fn partition(self) -> (Vec<StagedChange<T>>, Vec<Uuid>) {
        let mut upserts = Vec::new();
        let mut removals = Vec::new();
        for change in self.changes {
            match change {
                StagedChange::Remove(id) => removals.push(id),
                other => upserts.push(other),
            }
        }
        (upserts, removals)
    }
}

impl<T> Default for ChangeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for ChangeSet<T> {
    type Item = StagedChange<T>;
    type IntoIter = std::vec::IntoIter<StagedChange<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}
