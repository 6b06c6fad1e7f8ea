//! Server host for transport-agnostic API exposure
//!
//! The host holds the services a front end dispatches to. Exposures consume
//! an `Arc<ServerHost>` and produce an Axum router.

use crate::core::{ProductService, StoreService};
use anyhow::{Result, anyhow};
use std::sync::Arc;

/// Host context shared by the exposures
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(Some(stores), Some(products)));
/// let store_api = RestExposure::build_router(host.clone(), vec![])?;
/// let functions = FunctionsExposure::build_router(host, vec![])?;
/// ```
#[derive(Clone)]
pub struct ServerHost {
    stores: Option<Arc<dyn StoreService>>,
    products: Option<Arc<dyn ProductService>>,
}

impl ServerHost {
    pub fn new(
        stores: Option<Arc<dyn StoreService>>,
        products: Option<Arc<dyn ProductService>>,
    ) -> Self {
        Self { stores, products }
    }

    /// The store service, required by the store web API
    pub fn store_service(&self) -> Result<Arc<dyn StoreService>> {
        self.stores.clone().ok_or_else(|| {
            anyhow!("StoreService is required. Call .with_database() or .with_store_service()")
        })
    }

    /// The product service, required by the product function app
    pub fn product_service(&self) -> Result<Arc<dyn ProductService>> {
        self.products.clone().ok_or_else(|| {
            anyhow!("ProductService is required. Call .with_database() or .with_product_service()")
        })
    }

    /// Check whether both front ends can be exposed from this host
    pub fn is_ready(&self) -> bool {
        self.stores.is_some() && self.products.is_some()
    }
}
