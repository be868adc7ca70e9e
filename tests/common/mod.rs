#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use modulaptop_store::{config::AppConfig, db, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness for spinning up the application against a fresh SQLite
/// database in a temporary directory.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let url = format!("sqlite://{}/test.db?mode=rwc", dir.path().display());

        let mut cfg = AppConfig::with_database_url(url);
        cfg.environment = "test".to_string();
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(pool, cfg).expect("failed to build app state");
        let router = modulaptop_store::build_router(state.clone());

        Self {
            router,
            state,
            _dir: dir,
        }
    }

    /// Sends a request through the full router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Sends a request and decodes the JSON body.
    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        (status, response_json(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::DELETE, uri, None).await
    }

    /// Creates a record through the API and returns its `data` object.
    pub async fn create(&self, uri: &str, body: Value) -> Value {
        let (status, json) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::CREATED, "create {uri} failed: {json}");
        json["data"].clone()
    }

    pub async fn create_customer(&self) -> Value {
        self.create(
            "/api/customers",
            json!({"first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"}),
        )
        .await
    }

    pub async fn create_shipment(&self, status: &str) -> Value {
        self.create(
            "/api/shipments",
            json!({
                "shipment_date": "2024-03-02",
                "shipment_status": status,
                "shipment_address": "1 Analytical Engine Way"
            }),
        )
        .await
    }

    pub async fn create_order(&self, customer_id: &Value, shipment_id: Option<&Value>) -> Value {
        let mut body = json!({
            "order_date": "2024-03-01",
            "order_status": "pending",
            "customer_id": customer_id,
        });
        if let Some(shipment_id) = shipment_id {
            body["shipment_id"] = shipment_id.clone();
        }
        self.create("/api/orders", body).await
    }

    pub async fn create_laptop(&self) -> Value {
        self.create(
            "/api/laptops",
            json!({"manufacturer": "Framework", "model": "13", "make_year": 2023}),
        )
        .await
    }

    pub async fn create_component(&self) -> Value {
        self.create(
            "/api/components",
            json!({"type": "RAM", "description": "32GB DDR5", "make_year": 2023}),
        )
        .await
    }
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not JSON")
    }
}

/// `id` of a created record as a path segment.
pub fn id_of(record: &Value, key: &str) -> String {
    record[key]
        .as_str()
        .unwrap_or_else(|| panic!("record has no {key}: {record}"))
        .to_string()
}
