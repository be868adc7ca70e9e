mod common;

use axum::http::StatusCode;
use common::{id_of, TestApp};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn create_customer_generates_id() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/customers",
            json!({"first_name": "Grace", "last_name": "Hopper", "unknown_field": "ignored"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "Customer created successfully");
    assert_eq!(body["data"]["first_name"], "Grace");
    assert_eq!(body["data"]["email"], serde_json::Value::Null);
    assert!(body["data"].get("unknown_field").is_none());
    let id = id_of(&body["data"], "customer_id");
    assert!(Uuid::parse_str(&id).is_ok());
}

#[tokio::test]
async fn create_customer_validates_fields() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/customers",
            json!({"first_name": "x".repeat(51), "last_name": "Hopper", "email": "not-an-email"}),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let locs: Vec<_> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["loc"].clone())
        .collect();
    assert!(locs.contains(&json!(["body", "email"])));
    assert!(locs.contains(&json!(["body", "first_name"])));
}

#[tokio::test]
async fn missing_required_field_is_unprocessable() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/customers", json!({"first_name": "Grace"})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body"]));
}

#[tokio::test]
async fn list_and_get_customers() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/customers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let customer = app.create_customer().await;
    let id = id_of(&customer, "customer_id");

    let (status, body) = app.get("/api/customers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customers retrieved");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app.get(&format!("/api/customers/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer retrieved");
    assert_eq!(body["data"], customer);
}

#[tokio::test]
async fn unknown_customer_is_not_found() {
    let app = TestApp::new().await;
    let (status, body) = app.get(&format!("/api/customers/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn malformed_id_is_unprocessable() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/customers/not-a-uuid").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["path"]));
}

#[tokio::test]
async fn customer_with_orders() {
    let app = TestApp::new().await;
    let customer = app.create_customer().await;
    let id = id_of(&customer, "customer_id");
    let order = app.create_order(&customer["customer_id"], None).await;

    let (status, body) = app.get(&format!("/api/customers/{id}/orders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["customer_id"], customer["customer_id"]);
    assert_eq!(body["data"]["orders"], json!([order]));

    let (status, body) = app.get("/api/customers/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["orders"][0]["order_id"], order["order_id"]);
}

#[tokio::test]
async fn patch_updates_only_sent_fields() {
    let app = TestApp::new().await;
    let customer = app.create_customer().await;
    let id = id_of(&customer, "customer_id");

    let (status, body) = app
        .patch(&format!("/api/customers/{id}"), json!({"first_name": "Augusta"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer updated successfully");
    assert_eq!(body["data"]["first_name"], "Augusta");
    assert_eq!(body["data"]["last_name"], customer["last_name"]);
    assert_eq!(body["data"]["email"], customer["email"]);

    let (status, body) = app
        .patch(&format!("/api/customers/{id}"), json!({"email": null}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], serde_json::Value::Null);
}

#[tokio::test]
async fn patch_rejects_null_for_required_field() {
    let app = TestApp::new().await;
    let customer = app.create_customer().await;
    let id = id_of(&customer, "customer_id");

    let (status, _) = app
        .patch(&format!("/api/customers/{id}"), json!({"first_name": null}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn empty_patch_reports_nothing_to_update() {
    let app = TestApp::new().await;
    let customer = app.create_customer().await;
    let id = id_of(&customer, "customer_id");

    let (status, body) = app.patch(&format!("/api/customers/{id}"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": 400, "message": "No data to update, please check your data."})
    );

    let (status, _) = app
        .patch(&format!("/api/customers/{}", Uuid::new_v4()), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_customer_removes_its_orders() {
    let app = TestApp::new().await;
    let customer = app.create_customer().await;
    let id = id_of(&customer, "customer_id");
    let order = app.create_order(&customer["customer_id"], None).await;
    let laptop = app.create_laptop().await;
    app.create(
        "/api/orders/laptop",
        json!({"order_id": order["order_id"], "laptop_id": laptop["laptop_id"], "quantity": 2}),
    )
    .await;

    let (status, body) = app.delete(&format!("/api/customers/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": 200, "message": "Customer deleted successfully"})
    );

    let (status, _) = app.get(&format!("/api/customers/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = app.get("/api/orders").await;
    assert_eq!(body["data"], json!([]));

    let (_, body) = app
        .get(&format!("/api/laptops/{}/orders", id_of(&laptop, "laptop_id")))
        .await;
    assert_eq!(body["data"]["orders"], json!([]));

    let (status, _) = app.delete(&format!("/api/customers/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::new().await;
    let response = app
        .request(axum::http::Method::GET, "/api/customers", None)
        .await;
    assert!(response.headers().contains_key("x-request-id"));
}
