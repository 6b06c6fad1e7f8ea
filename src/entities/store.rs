//! Store entity and its creation input

use super::product_store::{
    ProductStore, attach_to_store, not_blank, not_nil, null_as_default, unique_products,
};
use crate::core::Entity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A store owned by a company, listing products through [`ProductStore`]
/// associations.
///
/// `id` defaults to the nil UUID when absent from a request body so that a
/// missing identifier is reported as an invalid argument rather than a
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default)]
    pub id: Uuid,

    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "location is required"))]
    pub location: String,

    #[validate(custom(function = "not_nil"))]
    pub company_id: Uuid,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(nested, custom(function = "unique_products"))]
    pub product_store: Vec<ProductStore>,
}

/// Payload accepted when creating a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StoreInput {
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "location is required"))]
    pub location: String,

    #[validate(custom(function = "not_nil"))]
    pub company_id: Uuid,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(nested, custom(function = "unique_products"))]
    pub product_store: Vec<ProductStore>,
}

impl StoreInput {
    pub fn new(name: impl Into<String>, location: impl Into<String>, company_id: Uuid) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            company_id,
            product_store: Vec::new(),
        }
    }

    pub fn with_products(mut self, product_store: Vec<ProductStore>) -> Self {
        self.product_store = product_store;
        self
    }
}

impl Store {
    /// Build a new store from its input under the given identifier
    pub fn from_input(id: Uuid, input: StoreInput) -> Self {
        Self {
            id,
            name: input.name,
            location: input.location,
            company_id: input.company_id,
            product_store: attach_to_store(input.product_store, id),
        }
    }

    /// Overwrite every mutable field with the values of `incoming`.
    ///
    /// The identifier is kept; listings are re-keyed to this store.
    pub fn replace_with(&mut self, incoming: Store) {
        self.name = incoming.name;
        self.location = incoming.location;
        self.company_id = incoming.company_id;
        self.product_store = attach_to_store(incoming.product_store, self.id);
    }
}

impl Entity for Store {
    fn display_name() -> &'static str {
        "Store"
    }

    fn entity_id(&self) -> Option<Uuid> {
        Some(self.id)
    }
}
