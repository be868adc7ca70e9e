mod common;

use axum::http::StatusCode;
use common::{id_of, TestApp};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn create_and_get_shipment() {
    let app = TestApp::new().await;

    let shipment = app.create_shipment("pending").await;
    assert_eq!(shipment["shipment_status"], "pending");
    assert_eq!(shipment["shipment_date"], "2024-03-02");

    let id = id_of(&shipment, "shipment_id");
    let (status, body) = app.get(&format!("/api/shipments/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Shipment retrieved");
    assert_eq!(body["data"], shipment);
}

#[tokio::test]
async fn shipment_address_is_limited() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post(
            "/api/shipments",
            json!({
                "shipment_date": "2024-03-02",
                "shipment_status": "pending",
                "shipment_address": "a".repeat(101),
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "shipment_address"]));
}

#[tokio::test]
async fn filter_by_status() {
    let app = TestApp::new().await;
    let pending = app.create_shipment("pending").await;
    app.create_shipment("delivered").await;

    let (status, body) = app.get("/api/shipments/status/pending").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Shipments filtered successfully");
    assert_eq!(body["data"], json!([pending]));

    let (_, body) = app.get("/api/shipments/status/shipped").await;
    assert_eq!(body["data"], json!([]));

    let (status, _) = app.get("/api/shipments/status/teleported").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn shipment_with_orders() {
    let app = TestApp::new().await;
    let customer = app.create_customer().await;
    let shipment = app.create_shipment("shipped").await;
    let order = app
        .create_order(&customer["customer_id"], Some(&shipment["shipment_id"]))
        .await;

    let (status, body) = app
        .get(&format!("/api/shipments/{}/orders", id_of(&shipment, "shipment_id")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["orders"], json!([order]));

    let (_, body) = app.get("/api/shipments/orders").await;
    assert_eq!(body["data"][0]["orders"], json!([order]));
}

#[tokio::test]
async fn patch_shipment() {
    let app = TestApp::new().await;
    let shipment = app.create_shipment("pending").await;
    let id = id_of(&shipment, "shipment_id");

    let (status, body) = app
        .patch(&format!("/api/shipments/{id}"), json!({"shipment_status": "delivered"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Shipment updated successfully");
    assert_eq!(body["data"]["shipment_status"], "delivered");
    assert_eq!(body["data"]["shipment_address"], shipment["shipment_address"]);

    let (status, body) = app
        .patch(&format!("/api/shipments/{id}"), json!({"not_a_field": 1}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": 400, "message": "No data to update, please check your data."})
    );
}

#[tokio::test]
async fn delete_shipment_removes_its_orders() {
    let app = TestApp::new().await;
    let customer = app.create_customer().await;
    let shipment = app.create_shipment("pending").await;
    let id = id_of(&shipment, "shipment_id");
    app.create_order(&customer["customer_id"], Some(&shipment["shipment_id"]))
        .await;
    let unshipped = app.create_order(&customer["customer_id"], None).await;

    let (status, body) = app.delete(&format!("/api/shipments/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Shipment deleted successfully");

    let (_, body) = app.get("/api/orders").await;
    assert_eq!(body["data"], json!([unshipped]));

    let (status, _) = app
        .delete(&format!("/api/shipments/{}", Uuid::new_v4()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
