mod common;

use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn healthcheck_reports_working_database() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/healthcheck").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_database_working"], true);
    assert_eq!(body["output"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/customers"].is_object());
}
