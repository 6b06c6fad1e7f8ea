//! Core module containing the fundamental traits and types of the catalog

pub mod entity;
pub mod error;
pub mod extractors;
pub mod repository;
pub mod service;

pub use entity::Entity;
pub use error::{
    CatalogError, CatalogResult, ErrorResponse, FieldViolation, RequestError, StorageError,
    StorageResult,
};
pub use extractors::{EntityId, OptionalJson};
pub use repository::{
    ChangeSet, Database, ProductRepository, StagedChange, StoreRepository, UnitOfWork,
};
pub use service::{ProductService, StoreService};
