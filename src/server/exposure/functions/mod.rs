//! Function-app exposure of the product service
//!
//! Each route is one function. Unlike the store API, the functions check
//! the request shape themselves: a create or update without a body, or an
//! update without an `id`, is answered with 400 before the service is
//! called.

use super::super::host::ServerHost;
use super::{Exposure, health_routes};
use crate::core::{CatalogError, EntityId, OptionalJson, ProductService, RequestError};
use crate::entities::{Product, ProductInput};
use anyhow::Result;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, Router, routing::get};
use std::sync::Arc;

/// Base path of the product functions
pub const PRODUCT_ROUTE: &str = "/products";

type Products = State<Arc<dyn ProductService>>;

/// Function-app exposure of the product service
pub struct FunctionsExposure;

impl FunctionsExposure {
    /// Build the product function router from a host
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let products = host.product_service()?;

        let product_routes = Router::new()
            .route(
                PRODUCT_ROUTE,
                get(get_products).post(create_product).put(update_product),
            )
            .route(
                &format!("{}/{{id}}", PRODUCT_ROUTE),
                get(get_product_by_id).delete(delete_product),
            )
            .route(
                &format!("{}/store/{{store_id}}", PRODUCT_ROUTE),
                get(get_products_by_store),
            )
            .with_state(products);

        let mut app = health_routes(Exposure::ProductFunctions).merge(product_routes);
        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app)
    }
}

async fn get_products(State(products): Products) -> Result<Json<Vec<Product>>, CatalogError> {
    Ok(Json(products.get_all().await?))
}

async fn get_product_by_id(
    State(products): Products,
    EntityId(id): EntityId,
) -> Result<Json<Product>, CatalogError> {
    Ok(Json(products.get_by_id(id).await?))
}

async fn get_products_by_store(
    State(products): Products,
    EntityId(store_id): EntityId,
) -> Result<Json<Vec<Product>>, CatalogError> {
    Ok(Json(products.get_by_store(store_id).await?))
}

async fn create_product(
    State(products): Products,
    OptionalJson(input): OptionalJson<ProductInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let input = input.ok_or(RequestError::MissingBody)?;
    let product = products.create(Some(input)).await?;
    let location = match product.id {
        Some(id) => format!("{}/{}", PRODUCT_ROUTE, id),
        None => PRODUCT_ROUTE.to_string(),
    };

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

async fn update_product(
    State(products): Products,
    OptionalJson(product): OptionalJson<Product>,
) -> Result<StatusCode, CatalogError> {
    let product = product.ok_or(RequestError::MissingBody)?;
    if product.id.is_none() {
        return Err(RequestError::MissingField {
            field: "id".to_string(),
        }
        .into());
    }

    products.update(Some(product)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_product(
    State(products): Products,
    EntityId(id): EntityId,
) -> Result<StatusCode, CatalogError> {
    products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
