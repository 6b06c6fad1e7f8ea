//! Product entity and its creation input

use super::product_store::{ProductStore, not_blank, null_as_default};
use crate::core::Entity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A product that stores can list.
///
/// The identifier is optional until assigned at creation. Listings are
/// read-only here: they are maintained through the owning stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<Uuid>,

    /// Blank or `null` on update keeps the current name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub product_store: Vec<ProductStore>,
}

/// Payload accepted when creating a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,
}

impl ProductInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Product {
    /// Build a new product; only the name is taken from the input
    pub fn from_input(id: Uuid, input: ProductInput) -> Self {
        Self {
            id: Some(id),
            name: input.name,
            product_store: Vec::new(),
        }
    }

    /// Apply an update, keeping the current name when the incoming one is blank
    pub fn apply_update(&mut self, incoming: Product) {
        if !incoming.name.trim().is_empty() {
            self.name = incoming.name;
        }
    }
}

impl Entity for Product {
    fn display_name() -> &'static str {
        "Product"
    }

    fn entity_id(&self) -> Option<Uuid> {
        self.id
    }
}
