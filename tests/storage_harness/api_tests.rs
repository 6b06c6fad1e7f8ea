//! HTTP integration test macro for storage backends.
//!
//! The `api_integration_tests!` macro generates HTTP-level tests that drive
//! both front ends against one shared `Database`:
//! JSON → HTTP request → handler → domain service → unit of work → JSON.

/// Generate an HTTP integration test suite for a storage backend.
///
/// `$db_factory` must produce an `impl Database + 'static`.
///
/// # Generated Tests
///
/// ## Store web API
/// - `test_store_create_and_get`: POST 201 + Location, then GET 200
/// - `test_store_list_and_by_company`
/// - `test_store_update_replaces`: PUT 204, GET shows new fields
/// - `test_store_delete`: DELETE 204, then GET 404
/// - `test_store_create_invalid`: blank name → 400 INVALID_ARGUMENT
/// - `test_store_update_unknown`: PUT unknown id → 404
/// - `test_store_unknown_product_listing`: → 500 integrity error
/// - `test_store_null_listings`: `"productStore": null` on POST and PUT
/// - `test_store_price_round_trip`: 201 body matches a later GET
/// - `test_store_price_precision_rejected`: three decimals → 400
/// - `test_store_price_too_large_rejected`
///
/// ## Product function app
/// - `test_product_create_and_get`
/// - `test_product_update_keeps_name_when_blank`
/// - `test_product_update_keeps_name_when_null`
/// - `test_product_by_store`
/// - `test_product_delete_unlists_everywhere`
/// - `test_product_missing_body`
#[macro_export]
macro_rules! api_integration_tests {
    ($db_factory:expr) => {
        mod api_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};
            use std::sync::Arc;
            use store_manager::core::Database;
            use store_manager::server::{Exposure, ServerBuilder};
            use uuid::Uuid;

            struct Servers {
                stores: TestServer,
                products: TestServer,
            }

            async fn make_servers() -> Servers {
                let db: Arc<dyn Database> = Arc::new($db_factory);

                let store_api = ServerBuilder::new(Exposure::StoreApi)
                    .with_shared_database(db.clone())
                    .build()
                    .unwrap();
                let functions = ServerBuilder::new(Exposure::ProductFunctions)
                    .with_shared_database(db)
                    .build()
                    .unwrap();

                Servers {
                    stores: TestServer::new(store_api),
                    products: TestServer::new(functions),
                }
            }

            async fn create_product(servers: &Servers, name: &str) -> String {
                let response = servers
                    .products
                    .post("/products")
                    .json(&json!({ "name": name }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                body["id"].as_str().unwrap().to_string()
            }

            async fn create_store(servers: &Servers, body: Value) -> Value {
                let response = servers.stores.post("/api/store").json(&body).await;
                response.assert_status(StatusCode::CREATED);
                response.json()
            }

            fn store_body(name: &str, company_id: Uuid) -> Value {
                json!({
                    "name": name,
                    "location": "New York",
                    "companyId": company_id,
                })
            }

            // ==================================================================
            // Store web API
            // ==================================================================

            #[tokio::test]
            async fn test_store_create_and_get() {
                let servers = make_servers().await;
                let widget = create_product(&servers, "Widget").await;

                let response = servers
                    .stores
                    .post("/api/store")
                    .json(&json!({
                        "name": "Main Street",
                        "location": "New York",
                        "companyId": Uuid::new_v4(),
                        "productStore": [
                            { "productId": widget, "stockQuantity": 5, "price": 9.99 }
                        ],
                    }))
                    .await;
                response.assert_status(StatusCode::CREATED);

                let created: Value = response.json();
                let id = created["id"].as_str().unwrap().to_string();
                assert_eq!(
                    response.header("location").to_str().unwrap(),
                    format!("/api/store/{}", id)
                );
                assert_eq!(created["productStore"][0]["storeId"], json!(id));

                let response = servers.stores.get(&format!("/api/store/{}", id)).await;
                response.assert_status_ok();
                let fetched: Value = response.json();
                assert_eq!(fetched["name"], "Main Street");
                assert_eq!(fetched["productStore"][0]["productId"], json!(widget));
                assert_eq!(fetched["productStore"][0]["stockQuantity"], 5);
                assert_eq!(fetched["productStore"][0]["price"], 9.99);
            }

            #[tokio::test]
            async fn test_store_list_and_by_company() {
                let servers = make_servers().await;
                let company_id = Uuid::new_v4();
                create_store(&servers, store_body("A", company_id)).await;
                create_store(&servers, store_body("B", company_id)).await;
                create_store(&servers, store_body("C", Uuid::new_v4())).await;

                let all: Vec<Value> = servers.stores.get("/api/store").await.json();
                assert_count(&all, 3);

                let response = servers
                    .stores
                    .get(&format!("/api/store/company/{}", company_id))
                    .await;
                response.assert_status_ok();
                let owned: Vec<Value> = response.json();
                assert_count(&owned, 2);
                assert!(owned.iter().all(|s| s["companyId"] == json!(company_id)));
            }

            #[tokio::test]
            async fn test_store_update_replaces() {
                let servers = make_servers().await;
                let widget = create_product(&servers, "Widget").await;
                let mut created = create_store(&servers, store_body("A", Uuid::new_v4())).await;
                let id = created["id"].as_str().unwrap().to_string();

                created["name"] = json!("A renamed");
                created["location"] = json!("Boston");
                created["productStore"] =
                    json!([{ "productId": widget, "stockQuantity": 2, "price": 1.5 }]);

                let response = servers.stores.put("/api/store").json(&created).await;
                response.assert_status(StatusCode::NO_CONTENT);

                let fetched: Value = servers
                    .stores
                    .get(&format!("/api/store/{}", id))
                    .await
                    .json();
                assert_eq!(fetched["name"], "A renamed");
                assert_eq!(fetched["location"], "Boston");
                assert_eq!(fetched["productStore"][0]["storeId"], json!(id));
            }

            #[tokio::test]
            async fn test_store_delete() {
                let servers = make_servers().await;
                let created = create_store(&servers, store_body("A", Uuid::new_v4())).await;
                let path = format!("/api/store/{}", created["id"].as_str().unwrap());

                servers
                    .stores
                    .delete(&path)
                    .await
                    .assert_status(StatusCode::NO_CONTENT);

                let response = servers.stores.get(&path).await;
                response.assert_status_not_found();
                assert_eq!(response.text(), "Store not found.");
            }

            #[tokio::test]
            async fn test_store_create_invalid() {
                let servers = make_servers().await;
                let response = servers
                    .stores
                    .post("/api/store")
                    .json(&store_body("", Uuid::new_v4()))
                    .await;
                response.assert_status_bad_request();

                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_ARGUMENT");
                assert_eq!(body["message"], "The store provided is invalid.");

                let all: Vec<Value> = servers.stores.get("/api/store").await.json();
                assert!(all.is_empty());
            }

            #[tokio::test]
            async fn test_store_update_unknown() {
                let servers = make_servers().await;
                let mut body = store_body("Ghost", Uuid::new_v4());
                body["id"] = json!(Uuid::new_v4());

                let response = servers.stores.put("/api/store").json(&body).await;
                response.assert_status_not_found();
            }

            #[tokio::test]
            async fn test_store_unknown_product_listing() {
                let servers = make_servers().await;
                let mut body = store_body("A", Uuid::new_v4());
                body["productStore"] =
                    json!([{ "productId": Uuid::new_v4(), "stockQuantity": 1, "price": 1.0 }]);

                let response = servers.stores.post("/api/store").json(&body).await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                let error: Value = response.json();
                assert_eq!(error["code"], "STORAGE_INTEGRITY_ERROR");

                let all: Vec<Value> = servers.stores.get("/api/store").await.json();
                assert!(all.is_empty());
            }

            #[tokio::test]
            async fn test_store_null_listings() {
                let servers = make_servers().await;
                let mut body = store_body("A", Uuid::new_v4());
                body["productStore"] = Value::Null;

                let mut created = create_store(&servers, body).await;
                assert_eq!(created["productStore"], json!([]));

                created["name"] = json!("A renamed");
                created["productStore"] = Value::Null;
                servers
                    .stores
                    .put("/api/store")
                    .json(&created)
                    .await
                    .assert_status(StatusCode::NO_CONTENT);

                let fetched: Value = servers
                    .stores
                    .get(&format!("/api/store/{}", created["id"].as_str().unwrap()))
                    .await
                    .json();
                assert_eq!(fetched["name"], "A renamed");
                assert_eq!(fetched["productStore"], json!([]));
            }

            #[tokio::test]
            async fn test_store_price_round_trip() {
                let servers = make_servers().await;
                let widget = create_product(&servers, "Widget").await;
                let mut body = store_body("A", Uuid::new_v4());
                body["productStore"] = json!([
                    { "productId": widget, "stockQuantity": 1, "price": 12345.67 }
                ]);

                let created = create_store(&servers, body).await;
                let fetched: Value = servers
                    .stores
                    .get(&format!("/api/store/{}", created["id"].as_str().unwrap()))
                    .await
                    .json();
                assert_eq!(fetched["productStore"], created["productStore"]);
            }

            #[tokio::test]
            async fn test_store_price_precision_rejected() {
                let servers = make_servers().await;
                let widget = create_product(&servers, "Widget").await;
                let mut body = store_body("A", Uuid::new_v4());
                body["productStore"] =
                    json!([{ "productId": widget, "stockQuantity": 1, "price": 9.999 }]);

                let response = servers.stores.post("/api/store").json(&body).await;
                response.assert_status_bad_request();
                let error: Value = response.json();
                assert_eq!(error["code"], "INVALID_ARGUMENT");
                assert_eq!(error["details"]["fields"][0]["field"], "product_store[0].price");

                let all: Vec<Value> = servers.stores.get("/api/store").await.json();
                assert!(all.is_empty());
            }

            #[tokio::test]
            async fn test_store_price_too_large_rejected() {
                let servers = make_servers().await;
                let widget = create_product(&servers, "Widget").await;
                let mut body = store_body("A", Uuid::new_v4());
                body["productStore"] =
                    json!([{ "productId": widget, "stockQuantity": 1, "price": 1e16 }]);

                let response = servers.stores.post("/api/store").json(&body).await;
                response.assert_status_bad_request();
                assert_eq!(response.json::<Value>()["code"], "INVALID_ARGUMENT");
            }

            // ==================================================================
            // Product function app
            // ==================================================================

            #[tokio::test]
            async fn test_product_create_and_get() {
                let servers = make_servers().await;
                let response = servers
                    .products
                    .post("/products")
                    .json(&json!({ "name": "Widget" }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let created: Value = response.json();
                let id = created["id"].as_str().unwrap();
                assert_eq!(
                    response.header("location").to_str().unwrap(),
                    format!("/products/{}", id)
                );

                let fetched: Value = servers
                    .products
                    .get(&format!("/products/{}", id))
                    .await
                    .json();
                assert_eq!(fetched["name"], "Widget");
                assert_eq!(fetched["productStore"], json!([]));

                let all: Vec<Value> = servers.products.get("/products").await.json();
                assert_count(&all, 1);
            }

            #[tokio::test]
            async fn test_product_update_keeps_name_when_blank() {
                let servers = make_servers().await;
                let id = create_product(&servers, "Widget").await;

                servers
                    .products
                    .put("/products")
                    .json(&json!({ "id": id, "name": "" }))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);
                let fetched: Value = servers
                    .products
                    .get(&format!("/products/{}", id))
                    .await
                    .json();
                assert_eq!(fetched["name"], "Widget");

                servers
                    .products
                    .put("/products")
                    .json(&json!({ "id": id, "name": "Widget Pro" }))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);
                let fetched: Value = servers
                    .products
                    .get(&format!("/products/{}", id))
                    .await
                    .json();
                assert_eq!(fetched["name"], "Widget Pro");
            }

            #[tokio::test]
            async fn test_product_update_keeps_name_when_null() {
                let servers = make_servers().await;
                let id = create_product(&servers, "Widget").await;

                servers
                    .products
                    .put("/products")
                    .json(&json!({ "id": id, "name": null, "productStore": null }))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);

                let fetched: Value = servers
                    .products
                    .get(&format!("/products/{}", id))
                    .await
                    .json();
                assert_eq!(fetched["name"], "Widget");
            }

            #[tokio::test]
            async fn test_product_by_store() {
                let servers = make_servers().await;
                let widget = create_product(&servers, "Widget").await;
                create_product(&servers, "Unlisted").await;

                let mut body = store_body("A", Uuid::new_v4());
                body["productStore"] =
                    json!([{ "productId": widget, "stockQuantity": 3, "price": 2.25 }]);
                let store = create_store(&servers, body).await;

                let response = servers
                    .products
                    .get(&format!("/products/store/{}", store["id"].as_str().unwrap()))
                    .await;
                response.assert_status_ok();
                let carried: Vec<Value> = response.json();
                assert_count(&carried, 1);
                assert_eq!(carried[0]["id"], json!(widget));
                assert_eq!(carried[0]["productStore"][0]["storeId"], store["id"]);
            }

            #[tokio::test]
            async fn test_product_delete_unlists_everywhere() {
                let servers = make_servers().await;
                let widget = create_product(&servers, "Widget").await;
                let mut body = store_body("A", Uuid::new_v4());
                body["productStore"] =
                    json!([{ "productId": widget, "stockQuantity": 3, "price": 2.25 }]);
                let store = create_store(&servers, body).await;

                servers
                    .products
                    .delete(&format!("/products/{}", widget))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);
                servers
                    .products
                    .get(&format!("/products/{}", widget))
                    .await
                    .assert_status_not_found();

                let fetched: Value = servers
                    .stores
                    .get(&format!("/api/store/{}", store["id"].as_str().unwrap()))
                    .await
                    .json();
                assert_eq!(fetched["productStore"], json!([]));
            }

            #[tokio::test]
            async fn test_product_missing_body() {
                let servers = make_servers().await;
                let response = servers.products.post("/products").await;
                response.assert_status_bad_request();

                let body: Value = response.json();
                assert_eq!(body["code"], "MISSING_BODY");

                let all: Vec<Value> = servers.products.get("/products").await.json();
                assert!(all.is_empty());
            }
        }
    };
}
