//! Product function app
//!
//! Serves `/products` on `server.functions_bind`.

use anyhow::Result;
use store_manager::config::ServiceConfig;
use store_manager::server::{Exposure, ServerBuilder, init_tracing};
use store_manager::storage;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::load()?;
    init_tracing(&config.logging);

    let addr = config.server.functions_addr()?;
    let database = storage::connect(&config.database).await?;

    ServerBuilder::new(Exposure::ProductFunctions)
        .with_shared_database(database)
        .serve(&addr.to_string())
        .await
}
