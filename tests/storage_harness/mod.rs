//! Shared test harness for storage backend testing
//!
//! Provides sample entities, seeding helpers and two macro-generated
//! contract suites that any [`Database`] implementation must pass:
//!
//! - `database_tests!`: unit-of-work and repository behaviour
//! - `api_integration_tests!`: both front ends over HTTP
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! database_tests!(InMemoryDatabase::new());
//! ```

#![allow(dead_code)]


#[macro_use]
pub mod api_tests;

use rust_decimal::Decimal;
use store_manager::core::Database;
use store_manager::entities::{Product, ProductInput, ProductStore, Store, StoreInput};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Sample entities
// ---------------------------------------------------------------------------

/// A product with a fresh ID
pub fn sample_product(name: &str) -> Product {
    Product::from_input(Uuid::new_v4(), ProductInput::new(name))
}

/// A store with a fresh ID, owned by `company_id`, without listings
pub fn sample_store(name: &str, company_id: Uuid) -> Store {
    Store::from_input(Uuid::new_v4(), StoreInput::new(name, "New York", company_id))
}

/// A listing of `product` at the given quantity and price in cents
pub fn listing(product: &Product, stock_quantity: i32, price_cents: i64) -> ProductStore {
    ProductStore::new(
        product_id(product),
        Uuid::nil(),
        stock_quantity,
        Decimal::new(price_cents, 2),
    )
}

/// A store listing the given products
pub fn sample_store_with(name: &str, company_id: Uuid, listings: Vec<ProductStore>) -> Store {
    Store::from_input(
        Uuid::new_v4(),
        StoreInput::new(name, "New York", company_id).with_products(listings),
    )
}

pub fn product_id(product: &Product) -> Uuid {
    product.id.expect("sample products carry an id")
}

// ---------------------------------------------------------------------------
// Seeding helpers (one commit each)
// ---------------------------------------------------------------------------

pub async fn seed_products(db: &dyn Database, products: &[Product]) {
    let mut uow = db.begin().await.unwrap();
    for product in products {
        uow.products().add(product.clone());
    }
    uow.commit().await.unwrap();
}

pub async fn seed_stores(db: &dyn Database, stores: &[Store]) {
    let mut uow = db.begin().await.unwrap();
    for store in stores {
        uow.stores().add(store.clone());
    }
    uow.commit().await.unwrap();
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert that a list contains exactly `n` items.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

/// Assert that two sets of IDs match regardless of order.
pub fn assert_same_ids(actual: impl IntoIterator<Item = Uuid>, expected: &[Uuid]) {
    let mut actual: Vec<Uuid> = actual.into_iter().collect();
    let mut expected = expected.to_vec();
    actual.sort();
    expected.sort();
    assert_eq!(actual, expected);
}
