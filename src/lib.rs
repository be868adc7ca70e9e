//! Modulaptop Store API library
//!
//! CRUD REST API for a laptop store. Every request runs in one database
//! transaction; see [`db::request_scope`].
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod common;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod http_client;
pub mod middleware_helpers;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{http::StatusCode, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::ToSchema;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<config::AppConfig>,
    pub http_client: http_client::HttpClient,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: config::AppConfig) -> Result<Self, errors::ServiceError> {
        let http_client = http_client::HttpClient::from_app_config(&config)?;
        Ok(Self {
            db: Arc::new(db),
            config: Arc::new(config),
            http_client,
        })
    }
}

/// Success envelope shared by every resource handler.
///
/// `status` repeats the HTTP status except for the no-op update, which
/// carries 400 inside an HTTP 200.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }
}

/// Resource routes under `/api`, without middleware.
pub fn api_routes() -> Router<AppState> {
    use handlers::{components, customers, health, laptops, orders, shipments};

    Router::new()
        .nest("/customers", customers::customer_routes())
        .nest("/shipments", shipments::shipment_routes())
        .nest("/orders", orders::order_routes())
        .nest("/laptops", laptops::laptop_routes())
        .nest("/components", components::component_routes())
        .merge(health::health_routes())
}

/// Full application: API, Swagger UI and the middleware stack.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout();

    Router::new()
        .nest("/api", api_routes())
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(TraceLayer::new_for_http().make_span_with(crate::tracing::RequestSpanMaker))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}
