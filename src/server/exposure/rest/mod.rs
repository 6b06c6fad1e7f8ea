//! REST exposure of the store web API
//!
//! | Method & path                       | Success                 |
//! |-------------------------------------|-------------------------|
//! | `GET /api/store`                    | 200 + stores            |
//! | `GET /api/store/{id}`               | 200 + store             |
//! | `GET /api/store/company/{companyId}`| 200 + stores            |
//! | `POST /api/store`                   | 201 + store + Location  |
//! | `PUT /api/store`                    | 204                     |
//! | `DELETE /api/store/{id}`            | 204                     |
//!
//! Failures are rendered by [`CatalogError`]'s `IntoResponse`.

use super::super::host::ServerHost;
use super::{Exposure, health_routes};
use crate::core::{CatalogError, EntityId, OptionalJson, StoreService};
use crate::entities::{Store, StoreInput};
use anyhow::Result;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, Router, routing::get};
use std::sync::Arc;

/// Base path of the store routes
pub const STORE_ROUTE: &str = "/api/store";

type Stores = State<Arc<dyn StoreService>>;

/// REST API exposure of the store service
pub struct RestExposure;

impl RestExposure {
    /// Build the store API router from a host
    ///
    /// Returns a router with the health routes, the store routes and any
    /// custom routes merged in.
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let stores = host.store_service()?;

        let store_routes = Router::new()
            .route(
                STORE_ROUTE,
                get(list_stores).post(create_store).put(update_store),
            )
            .route(
                &format!("{}/{{id}}", STORE_ROUTE),
                get(get_store).delete(delete_store),
            )
            .route(
                &format!("{}/company/{{company_id}}", STORE_ROUTE),
                get(list_company_stores),
            )
            .with_state(stores);

        let mut app = health_routes(Exposure::StoreApi).merge(store_routes);
        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app)
    }
}

async fn get_store(
    State(stores): Stores,
    EntityId(id): EntityId,
) -> Result<Json<Store>, CatalogError> {
    Ok(Json(stores.get_by_id(id).await?))
}

async fn list_stores(State(stores): Stores) -> Result<Json<Vec<Store>>, CatalogError> {
    Ok(Json(stores.get_all().await?))
}

async fn list_company_stores(
    State(stores): Stores,
    EntityId(company_id): EntityId,
) -> Result<Json<Vec<Store>>, CatalogError> {
    Ok(Json(stores.get_by_company(company_id).await?))
}

async fn create_store(
    State(stores): Stores,
    OptionalJson(input): OptionalJson<StoreInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let store = stores.create(input).await?;
    let location = format!("{}/{}", STORE_ROUTE, store.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(store),
    ))
}

async fn update_store(
    State(stores): Stores,
    OptionalJson(store): OptionalJson<Store>,
) -> Result<StatusCode, CatalogError> {
    stores.update(store).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_store(
    State(stores): Stores,
    EntityId(id): EntityId,
) -> Result<StatusCode, CatalogError> {
    stores.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
