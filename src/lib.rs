//! # Store Manager
//!
//! A store and product catalog served by two independent HTTP front ends.
//!
//! ## Features
//!
//! - **Store web API**: CRUD over stores under `/api/store`
//! - **Product function app**: CRUD over products under `/products`
//! - **Listings**: stores carry products with a stock quantity and a price
//! - **Unit of work**: every mutating call stages its changes and commits once
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind `postgres`
//! - **Typed errors**: invalid arguments, missing entities and backend
//!   failures map to stable HTTP responses
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use store_manager::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new(Exposure::StoreApi)
//!         .with_database(InMemoryDatabase::new())
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        CatalogError, CatalogResult, Database, Entity, ProductRepository, ProductService,
        StorageError, StoreRepository, StoreService, UnitOfWork,
    };

    // === Entities ===
    pub use crate::entities::{Product, ProductInput, ProductStore, Store, StoreInput};

    // === Services ===
    pub use crate::services::{ProductDomainService, StoreDomainService};

    // === Storage ===
    pub use crate::storage::InMemoryDatabase;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PgDatabase;

    // === Config ===
    pub use crate::config::{DatabaseBackend, DatabaseConfig, ServiceConfig};

    // === Server ===
    pub use crate::server::{Exposure, ServerBuilder, init_tracing};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
