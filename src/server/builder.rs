//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::{Exposure, FunctionsExposure, RestExposure};
use super::host::ServerHost;
use crate::core::{Database, ProductService, StoreService};
use crate::services::{ProductDomainService, StoreDomainService};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for one of the two front ends
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new(Exposure::StoreApi)
///     .with_database(InMemoryDatabase::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    exposure: Exposure,
    database: Option<Arc<dyn Database>>,
    store_service: Option<Arc<dyn StoreService>>,
    product_service: Option<Arc<dyn ProductService>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder for the given front end
    pub fn new(exposure: Exposure) -> Self {
        Self {
            exposure,
            database: None,
            store_service: None,
            product_service: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the database the domain services run against
    pub fn with_database(self, database: impl Database + 'static) -> Self {
        self.with_shared_database(Arc::new(database))
    }

    /// Set a database handle that is shared with other components
    pub fn with_shared_database(mut self, database: Arc<dyn Database>) -> Self {
        self.database = Some(database);
        self
    }

    /// Replace the store domain service
    pub fn with_store_service(mut self, service: Arc<dyn StoreService>) -> Self {
        self.store_service = Some(service);
        self
    }

    /// Replace the product domain service
    pub fn with_product_service(mut self, service: Arc<dyn ProductService>) -> Self {
        self.product_service = Some(service);
        self
    }

    /// Add custom routes to the server
    ///
    /// ```ignore
    /// let admin = Router::new().route("/version", get(version_handler));
    ///
    /// ServerBuilder::new(Exposure::StoreApi)
    ///     .with_database(db)
    ///     .with_custom_routes(admin)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    ///
    /// Services that were not replaced are built over the database.
    pub fn build_host(&mut self) -> ServerHost {
        let stores = self.store_service.take().or_else(|| {
            self.database
                .clone()
                .map(|db| Arc::new(StoreDomainService::new(db)) as Arc<dyn StoreService>)
        });
        let products = self.product_service.take().or_else(|| {
            self.database
                .clone()
                .map(|db| Arc::new(ProductDomainService::new(db)) as Arc<dyn ProductService>)
        });

        ServerHost::new(stores, products)
    }

    /// Build the router of the selected front end, with request tracing
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host());

        let app = match self.exposure {
            Exposure::StoreApi => RestExposure::build_router(host, custom_routes)?,
            Exposure::ProductFunctions => FunctionsExposure::build_router(host, custom_routes)?,
        };

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let service = self.exposure.service_name();
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("{} listening on {}", service, addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("{} shutdown complete", service);
        Ok(())
    }
}


/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
