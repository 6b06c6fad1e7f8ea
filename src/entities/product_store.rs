//! Store-product association (one listing of a product in a store)

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Join record between a product and a store.
///
/// Keyed by the (`product_id`, `store_id`) pair. `store_id` may be omitted
/// by clients: the owning store re-keys its listings on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductStore {
    #[validate(custom(function = "not_nil"))]
    pub product_id: Uuid,

    #[serde(default)]
    pub store_id: Uuid,

    #[validate(range(min = 0))]
    pub stock_quantity: i32,

    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "storable_price"))]
    pub price: Decimal,
}

impl ProductStore {
    pub fn new(product_id: Uuid, store_id: Uuid, stock_quantity: i32, price: Decimal) -> Self {
        Self {
            product_id,
            store_id,
            stock_quantity,
            price,
        }
    }

    /// Composite key of the association
    pub fn key(&self) -> (Uuid, Uuid) {
        (self.product_id, self.store_id)
    }
}

/// Re-key a set of listings to the store that owns them
pub(crate) fn attach_to_store(listings: Vec<ProductStore>, store_id: Uuid) -> Vec<ProductStore> {
    listings
        .into_iter()
        .map(|listing| ProductStore {
            store_id,
            ..listing
        })
        .collect()
}

/// Validator: a store lists each product at most once
pub(crate) fn unique_products(listings: &[ProductStore]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(listings.len());
    for listing in listings {
        if !seen.insert(listing.product_id) {
            let mut err = ValidationError::new("duplicate_product");
            err.message =
                Some(format!("product '{}' is listed more than once", listing.product_id).into());
            return Err(err);
        }
    }
    Ok(())
}

/// Validator: identifier must not be the nil UUID
pub(crate) fn not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        let mut err = ValidationError::new("nil_identifier");
        err.message = Some("identifier must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Decimals kept by the listing price column (`NUMERIC(18, 2)`)
const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound of the listing price column
const PRICE_LIMIT: i64 = 10_000_000_000_000_000;

/// Validator: price is non-negative, has at most two decimals and fits the
/// listing column
fn storable_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut err = ValidationError::new("negative_price");
        err.message = Some("price must not be negative".into());
        return Err(err);
    }
    if price.normalize().scale() > PRICE_SCALE {
        let mut err = ValidationError::new("price_scale");
        err.message = Some(format!("price must have at most {} decimals", PRICE_SCALE).into());
        return Err(err);
    }
    if *price >= Decimal::from(PRICE_LIMIT) {
        let mut err = ValidationError::new("price_range");
        err.message = Some("price is too large".into());
        return Err(err);
    }
    Ok(())
}

/// Validator: text must contain something other than whitespace
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Deserialize an explicit JSON `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
