//! API exposure modules for the two front ends
//!
//! Each exposure consumes a `ServerHost` and produces an Axum router:
//! - [`RestExposure`]: the store web API under `/api/store`
//! - [`FunctionsExposure`]: the product function app under `/products`

pub mod functions;
pub mod rest;

pub use functions::FunctionsExposure;
pub use rest::RestExposure;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// The front end a server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    /// Controller-style store API
    StoreApi,
    /// Function-style product app
    ProductFunctions,
}

impl Exposure {
    /// Name reported by the health routes and the logs
    pub fn service_name(&self) -> &'static str {
        match self {
            Exposure::StoreApi => "store-api",
            Exposure::ProductFunctions => "product-functions",
        }
    }
}

/// Build health check routes
pub(crate) fn health_routes(exposure: Exposure) -> Router {
    let service = exposure.service_name();
    let health_check = move || async move { Json(health_body(service)) };

    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

fn health_body(service: &str) -> Value {
    json!({
        "status": "ok",
        "service": service
    })
}
