//! Catalog entities: stores, products and their associations

pub mod product;
pub mod product_store;
pub mod store;

pub use product::{Product, ProductInput};
pub use product_store::ProductStore;
pub use store::{Store, StoreInput};
