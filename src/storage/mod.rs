//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryDatabase;
#[cfg(feature = "postgres")]
pub use postgres::PgDatabase;

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::core::Database;
use anyhow::Result;
use std::sync::Arc;

/// Open the database described by the configuration
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn Database>> {
    match config.backend {
        DatabaseBackend::InMemory => {
            tracing::info!("Using in-memory storage");
            Ok(Arc::new(InMemoryDatabase::new()))
        }
        #[cfg(feature = "postgres")]
        DatabaseBackend::Postgres => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("database.url is required for the postgres backend"))?;
            tracing::info!(max_connections = config.max_connections, "Connecting to PostgreSQL");
            let db = PgDatabase::connect(url, config.max_connections).await?;
            Ok(Arc::new(db))
        }
        #[cfg(not(feature = "postgres"))]
        DatabaseBackend::Postgres => Err(anyhow::anyhow!(
            "the postgres backend requires building with the `postgres` feature"
        )),
    }
}
